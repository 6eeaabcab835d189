//! Depth-one outbound slot.
//!
//! The request itself lives in the transport's outbox; this only records
//! that one is outstanding. Two axes are kept apart: `pending` means staged
//! but held back until the companion is ready, `in_flight` means transmitted
//! and awaiting the host's delivery verdict.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutboundQueue {
    pending: bool,
    in_flight: bool,
}

impl OutboundQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A deferred request is waiting for the handshake.
    pub fn is_busy(&self) -> bool {
        self.pending
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Marks a staged request as deferred. Returns `false`, changing
    /// nothing, when the slot is already taken.
    pub fn defer(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Clears the deferred slot, returning whether it was set.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn mark_in_flight(&mut self) {
        self.in_flight = true;
    }

    /// Clears the in-flight marker, returning whether it was set.
    pub fn settle(&mut self) -> bool {
        std::mem::take(&mut self.in_flight)
    }
}
