//! Single-slot mailbox for `no_std` environments.
//!
//! Holds at most one pending value. Posting while a value is pending replaces
//! it, so the receiver always sees the latest value and never a stale one.
//! Interrupt and thread safe via critical sections.

use core::cell::Cell;

use critical_section::Mutex;

/// A last-write-wins slot shared between contexts
pub struct Mailbox<T> {
    slot: Mutex<Cell<Option<T>>>,
}

impl<T> Mailbox<T> {
    /// Create an empty mailbox.
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Cell::new(None)),
        }
    }

    /// Post a value, replacing any pending one.
    ///
    /// Returns the value that was overwritten, if any.
    pub fn post(&self, value: T) -> Option<T> {
        critical_section::with(|cs| self.slot.borrow(cs).replace(Some(value)))
    }

    /// Take the pending value, leaving the mailbox empty.
    pub fn take(&self) -> Option<T> {
        critical_section::with(|cs| self.slot.borrow(cs).take())
    }

    /// Drop the pending value, if any.
    pub fn clear(&self) {
        let _ = self.take();
    }
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Mailbox;

    #[test]
    fn test_post_replaces_pending() {
        let mailbox = Mailbox::new();
        assert_eq!(mailbox.post(1), None);
        assert_eq!(mailbox.post(2), Some(1));
        assert_eq!(mailbox.take(), Some(2));
        assert_eq!(mailbox.take(), None);
    }

    #[test]
    fn test_clear() {
        let mailbox = Mailbox::new();
        mailbox.post("pending");
        mailbox.clear();
        assert_eq!(mailbox.take(), None);
    }
}
