//! Readiness handshake state.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    #[default]
    NotReady,
    /// Terminal: a companion restart is not modeled.
    Ready,
}

/// Tracks whether the companion has announced itself.
#[derive(Debug, Clone, Default)]
pub struct ReadinessGate {
    state: Readiness,
}

impl ReadinessGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Readiness {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == Readiness::Ready
    }

    /// Moves to `Ready`. Returns `true` only for the first transition.
    pub fn open(&mut self) -> bool {
        let first = self.state == Readiness::NotReady;
        self.state = Readiness::Ready;
        first
    }
}
