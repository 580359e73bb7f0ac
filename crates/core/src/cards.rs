use serde::{Deserialize, Serialize};
use std::fmt;

/// Trump suit chosen for an Old Hell hand. Serialized as its one-letter code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Suit {
    #[serde(rename = "S")]
    Spades,
    #[serde(rename = "H")]
    Hearts,
    #[serde(rename = "C")]
    Clubs,
    #[serde(rename = "D")]
    Diamonds,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    pub fn code(self) -> &'static str {
        match self {
            Suit::Spades => "S",
            Suit::Hearts => "H",
            Suit::Clubs => "C",
            Suit::Diamonds => "D",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "S" | "SPADES" => Some(Suit::Spades),
            "H" | "HEARTS" => Some(Suit::Hearts),
            "C" | "CLUBS" => Some(Suit::Clubs),
            "D" | "DIAMONDS" => Some(Suit::Diamonds),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for suit in Suit::ALL {
            assert_eq!(Suit::from_code(suit.code()), Some(suit));
        }
        assert_eq!(Suit::from_code("hearts"), Some(Suit::Hearts));
        assert_eq!(Suit::from_code("x"), None);
    }

    #[test]
    fn serializes_as_code() {
        let body = serde_json::to_string(&Suit::Diamonds).expect("serialize");
        assert_eq!(body, "\"D\"");
    }
}
