use crate::Player;

pub const HEARTS_POINTS: i64 = 26;
pub const SPADES_TRICKS: i64 = 13;
pub const OLD_HELL_MADE_BONUS: i64 = 10;
pub const NIL_VALUE: i64 = 100;
pub const BLIND_NIL_VALUE: i64 = 200;
pub const BAG_LIMIT: i64 = 10;
pub const BAG_PENALTY: i64 = 100;
/// Largest magnitude accepted for a single score, bid or trick entry.
pub const MAX_ENTRY: i64 = 1_000_000;

/// Index of the player who shot the moon, if the hand was entered as one
/// player taking all 26 points.
pub fn moon_shooter(inputs: &[i64]) -> Option<usize> {
    let sum: i64 = inputs.iter().sum();
    if sum != HEARTS_POINTS {
        return None;
    }
    let mut shooters = inputs.iter().enumerate().filter(|(_, v)| **v == HEARTS_POINTS);
    match (shooters.next(), shooters.next()) {
        (Some((idx, _)), None) => Some(idx),
        _ => None,
    }
}

pub fn hearts_round(inputs: &[i64]) -> Vec<i64> {
    match moon_shooter(inputs) {
        Some(shooter) => (0..inputs.len())
            .map(|idx| if idx == shooter { 0 } else { HEARTS_POINTS })
            .collect(),
        None => inputs.to_vec(),
    }
}

/// Winner (the single zero) collects everyone's tiles; the rest pay theirs.
pub fn rummikub_round(inputs: &[i64]) -> Vec<i64> {
    let winner = inputs.iter().position(|value| *value == 0);
    let pot: i64 = inputs.iter().sum();
    inputs
        .iter()
        .enumerate()
        .map(|(idx, value)| if Some(idx) == winner { pot } else { -value })
        .collect()
}

pub fn old_hell_score(bid: i64, made: bool) -> i64 {
    if made {
        OLD_HELL_MADE_BONUS.saturating_add(bid)
    } else {
        0
    }
}

fn nil_score(player: &Player, tricks: i64) -> Option<i64> {
    let value = if player.is_blind_nil {
        BLIND_NIL_VALUE
    } else if player.bid == 0 {
        NIL_VALUE
    } else {
        return None;
    };
    Some(if tricks == 0 { value } else { -value })
}

fn settle_bags(bags: &mut i64) -> i64 {
    if *bags >= BAG_LIMIT {
        *bags -= BAG_LIMIT;
        -BAG_PENALTY
    } else {
        0
    }
}

/// Spades hand for one player; overtricks go into the player's bags.
pub fn spades_individual(player: &mut Player, tricks: i64) -> i64 {
    let score = match nil_score(player, tricks) {
        Some(score) => score,
        None if tricks >= player.bid => {
            let over = tricks.saturating_sub(player.bid);
            player.bags = player.bags.saturating_add(over);
            player.bid.saturating_mul(10).saturating_add(over)
        }
        None => player.bid.saturating_mul(-10),
    };
    score.saturating_add(settle_bags(&mut player.bags))
}

/// Spades hand for a partnership. Nil calls are scored on their own; the
/// remaining bids must be covered by the partners' combined tricks. Bags are
/// kept on the first partner.
pub fn spades_team(first: &mut Player, second: &Player, tricks: (i64, i64)) -> i64 {
    let mut score = 0;
    let mut required = 0;
    for (player, taken) in [(&*first, tricks.0), (second, tricks.1)] {
        match nil_score(player, taken) {
            Some(nil) => score += nil,
            None => required = player.bid.saturating_add(required),
        }
    }
    if required > 0 {
        let combined = tricks.0 + tricks.1;
        if combined >= required {
            let over = combined - required;
            score += required * 10 + over;
            first.bags = first.bags.saturating_add(over);
        } else {
            score = score.saturating_sub(required.saturating_mul(10));
        }
    }
    score.saturating_add(settle_bags(&mut first.bags))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bidder(bid: i64) -> Player {
        Player {
            bid,
            ..Player::new("p")
        }
    }

    #[test]
    fn moon_needs_a_single_26() {
        assert_eq!(moon_shooter(&[0, 26, 0, 0]), Some(1));
        assert_eq!(moon_shooter(&[5, 5, 8, 8]), None);
        assert_eq!(hearts_round(&[0, 26, 0, 0]), [26, 0, 26, 26]);
        assert_eq!(hearts_round(&[5, 5, 8, 8]), [5, 5, 8, 8]);
    }

    #[test]
    fn rummikub_winner_takes_pot() {
        assert_eq!(rummikub_round(&[0, 12, 8]), [20, -12, -8]);
    }

    #[test]
    fn old_hell_made_is_ten_plus_bid() {
        assert_eq!(old_hell_score(3, true), 13);
        assert_eq!(old_hell_score(0, true), 10);
        assert_eq!(old_hell_score(5, false), 0);
    }

    #[test]
    fn spades_nil_and_blind_nil() {
        let mut nil = bidder(0);
        assert_eq!(spades_individual(&mut nil, 0), 100);
        assert_eq!(nil.bags, 0);
        assert_eq!(spades_individual(&mut nil, 2), -100);
        let mut blind = Player {
            is_blind_nil: true,
            ..bidder(0)
        };
        assert_eq!(spades_individual(&mut blind, 0), 200);
        assert_eq!(spades_individual(&mut blind, 1), -200);
    }

    #[test]
    fn spades_overtricks_become_bags_with_penalty() {
        let mut player = bidder(4);
        player.bags = 8;
        assert_eq!(spades_individual(&mut player, 7), 40 + 3 - 100);
        assert_eq!(player.bags, 1);
        let mut set = bidder(5);
        assert_eq!(spades_individual(&mut set, 4), -50);
        assert_eq!(set.bags, 0);
    }

    #[test]
    fn spades_team_combines_tricks() {
        let mut first = bidder(3);
        let second = bidder(2);
        assert_eq!(spades_team(&mut first, &second, (1, 5)), 50 + 1);
        assert_eq!(first.bags, 1);

        let mut nil_partner = bidder(0);
        let carrier = bidder(4);
        assert_eq!(spades_team(&mut nil_partner, &carrier, (0, 4)), 100 + 40);
        assert_eq!(nil_partner.bags, 0);

        let mut short = bidder(4);
        let partner = bidder(4);
        assert_eq!(spades_team(&mut short, &partner, (3, 3)), -80);
    }
}
