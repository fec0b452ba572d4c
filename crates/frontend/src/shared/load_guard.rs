//! Discards responses that arrive after the requester moved on.
//!
//! Each load takes a ticket; starting another load or tearing the component
//! down invalidates older tickets, and their results are dropped instead of
//! being written into signals.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Default)]
pub struct LoadGuard {
    generation: Arc<AtomicU64>,
}

impl LoadGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load, invalidating every earlier ticket
    pub fn begin(&self) -> LoadTicket {
        LoadTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Invalidate all outstanding tickets (component teardown)
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_wins() {
        let guard = LoadGuard::new();
        let first = guard.begin();
        assert!(guard.is_current(first));

        let second = guard.begin();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn test_cancel_invalidates() {
        let guard = LoadGuard::new();
        let ticket = guard.begin();
        guard.clone().cancel();
        assert!(!guard.is_current(ticket));
    }
}
