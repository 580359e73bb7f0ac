use crate::RecordKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Event {
    BidsLocked { label: u32, bids: Vec<i64> },
    RoundScored {
        label: u32,
        scores: Vec<i64>,
        totals: Vec<i64>,
    },
    RoundUndone { label: u32, kind: RecordKind },
    GameOver { winners: Vec<String> },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
