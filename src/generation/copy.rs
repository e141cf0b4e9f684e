//! Transient "Copied!" indicator for the text panel.
//!
//! Each `mark` bumps a token and hands it back; the expiry timer sends
//! that token back through `expire`. Only the newest token clears the
//! flag, so repeated copies keep restarting the display interval.

use std::time::Duration;

/// Default time the indicator stays on.
pub const COPIED_DISPLAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyTicket(u64);

#[derive(Debug, Clone)]
pub struct CopyIndicator {
    copied: bool,
    latest: u64,
    display: Duration,
}

impl Default for CopyIndicator {
    fn default() -> Self {
        Self::new(COPIED_DISPLAY)
    }
}

impl CopyIndicator {
    pub fn new(display: Duration) -> Self {
        Self {
            copied: false,
            latest: 0,
            display,
        }
    }

    /// Turn the indicator on and return the ticket that may turn it off.
    pub fn mark(&mut self) -> CopyTicket {
        self.latest += 1;
        self.copied = true;
        CopyTicket(self.latest)
    }

    /// Turn the indicator off if `ticket` is the newest one.
    pub fn expire(&mut self, ticket: CopyTicket) -> bool {
        if ticket.0 != self.latest {
            return false;
        }
        self.copied = false;
        true
    }

    pub fn is_copied(&self) -> bool {
        self.copied
    }

    pub fn display(&self) -> Duration {
        self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_then_expire() {
        let mut ind = CopyIndicator::default();
        assert!(!ind.is_copied());
        let t = ind.mark();
        assert!(ind.is_copied());
        assert!(ind.expire(t));
        assert!(!ind.is_copied());
    }

    #[test]
    fn older_ticket_does_not_clear() {
        let mut ind = CopyIndicator::default();
        let first = ind.mark();
        let second = ind.mark();
        assert!(!ind.expire(first));
        assert!(ind.is_copied());
        assert!(ind.expire(second));
        assert!(!ind.is_copied());
    }
}
