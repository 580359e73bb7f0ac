use crate::{SyncError, ViewerId};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

pub type ClaimsListener = Arc<dyn Fn(&[Option<ViewerId>]) + Send + Sync>;

#[derive(Default)]
struct ClaimState {
    slots: Vec<Option<ViewerId>>,
    listeners: Vec<ClaimsListener>,
}

/// Seat ownership for viewers. Each seat is claimed by at most one viewer
/// and each viewer holds at most one seat.
#[derive(Default)]
pub struct ClaimBoard {
    state: Mutex<ClaimState>,
}

impl ClaimBoard {
    pub fn new(slots: usize) -> Self {
        Self {
            state: Mutex::new(ClaimState {
                slots: vec![None; slots],
                listeners: Vec::new(),
            }),
        }
    }

    pub fn claims(&self) -> Vec<Option<ViewerId>> {
        self.state.lock().slots.clone()
    }

    pub fn owner(&self, slot: usize) -> Option<ViewerId> {
        self.state.lock().slots.get(slot).copied().flatten()
    }

    pub fn slot_of(&self, viewer: ViewerId) -> Option<usize> {
        self.state
            .lock()
            .slots
            .iter()
            .position(|owner| *owner == Some(viewer))
    }

    /// Compare-and-set: succeeds iff the seat was unclaimed and the viewer
    /// holds no other seat.
    pub fn claim_slot(&self, viewer: ViewerId, slot: usize) -> Result<bool, SyncError> {
        let (claimed, notify) = {
            let mut state = self.state.lock();
            let slots = state.slots.len();
            if slot >= slots {
                return Err(SyncError::SlotOutOfRange { slot, slots });
            }
            if state.slots[slot].is_some() || state.slots.contains(&Some(viewer)) {
                (false, None)
            } else {
                state.slots[slot] = Some(viewer);
                (true, Some(snapshot(&state)))
            }
        };
        debug!(%viewer, slot, claimed, "claim attempt");
        if let Some((slots, listeners)) = notify {
            fire(&listeners, &slots);
        }
        Ok(claimed)
    }

    /// Frees `slot` if `viewer` owns it. Returns whether anything changed.
    pub fn release_slot(&self, viewer: ViewerId, slot: usize) -> bool {
        let notify = {
            let mut state = self.state.lock();
            match state.slots.get_mut(slot) {
                Some(owner) if *owner == Some(viewer) => {
                    *owner = None;
                    Some(snapshot(&state))
                }
                _ => None,
            }
        };
        match notify {
            Some((slots, listeners)) => {
                fire(&listeners, &slots);
                true
            }
            None => false,
        }
    }

    /// Frees every seat held by `viewer` (disconnect).
    pub fn release_viewer(&self, viewer: ViewerId) -> bool {
        let notify = {
            let mut state = self.state.lock();
            let mut changed = false;
            for owner in state.slots.iter_mut().filter(|owner| **owner == Some(viewer)) {
                *owner = None;
                changed = true;
            }
            changed.then(|| snapshot(&state))
        };
        match notify {
            Some((slots, listeners)) => {
                fire(&listeners, &slots);
                true
            }
            None => false,
        }
    }

    /// Grows or shrinks the board to the roster size. Claims on removed
    /// seats are dropped.
    pub fn resize(&self, slots: usize) {
        let notify = {
            let mut state = self.state.lock();
            if state.slots.len() == slots {
                None
            } else {
                state.slots.resize(slots, None);
                Some(snapshot(&state))
            }
        };
        if let Some((slots, listeners)) = notify {
            fire(&listeners, &slots);
        }
    }

    /// Registers a listener and calls it once with the current claims.
    pub fn on_claims_changed<F>(&self, listener: F)
    where
        F: Fn(&[Option<ViewerId>]) + Send + Sync + 'static,
    {
        let listener: ClaimsListener = Arc::new(listener);
        let slots = {
            let mut state = self.state.lock();
            state.listeners.push(listener.clone());
            state.slots.clone()
        };
        listener(&slots);
    }
}

fn snapshot(state: &ClaimState) -> (Vec<Option<ViewerId>>, Vec<ClaimsListener>) {
    (state.slots.clone(), state.listeners.clone())
}

fn fire(listeners: &[ClaimsListener], slots: &[Option<ViewerId>]) {
    for listener in listeners {
        listener(slots);
    }
}
