//! Two-step confirmation for destructive clear-all.
//!
//! The first press arms the gate until a deadline; a second press before the
//! deadline confirms. Once the deadline passes the gate reads as unarmed again,
//! so nothing has to run in the background to disarm it.

use std::time::Duration;
use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    Unarmed,
    Armed { expires_at: Instant },
}

/// What a press of the gate resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// First press: the caller should ask for confirmation.
    Armed { expires_at: Instant },
    /// Second press inside the window: the destructive action may proceed.
    Confirmed,
}

#[derive(Debug)]
pub struct ClearAllGate {
    window: Duration,
    state: Mutex<GateState>,
}

impl ClearAllGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: Mutex::new(GateState::Unarmed),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Registers a press at the current time.
    pub fn press(&self) -> GateOutcome {
        let now = Instant::now();
        let mut state = self.state.lock();
        match *state {
            GateState::Armed { expires_at } if now < expires_at => {
                *state = GateState::Unarmed;
                debug!("Clear-all confirmed");
                GateOutcome::Confirmed
            }
            _ => {
                let expires_at = now + self.window;
                *state = GateState::Armed { expires_at };
                debug!("Clear-all armed for {:?}", self.window);
                GateOutcome::Armed { expires_at }
            }
        }
    }

    /// Whether a press right now would confirm.
    pub fn is_armed(&self) -> bool {
        let mut state = self.state.lock();
        match *state {
            GateState::Armed { expires_at } if Instant::now() < expires_at => true,
            GateState::Armed { .. } => {
                *state = GateState::Unarmed;
                debug!("Clear-all confirmation expired");
                false
            }
            GateState::Unarmed => false,
        }
    }

    /// Time left before an armed gate disarms itself.
    pub fn remaining(&self) -> Option<Duration> {
        match *self.state.lock() {
            GateState::Armed { expires_at } => {
                let now = Instant::now();
                (now < expires_at).then(|| expires_at - now)
            }
            GateState::Unarmed => None,
        }
    }
}
