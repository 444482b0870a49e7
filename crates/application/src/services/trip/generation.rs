//! Generation tokens for last-request-wins dispatch

use std::fmt;

/// Identity of one dispatched request within its operation class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic token source for one operation class (search or routing)
///
/// Only the most recently issued token is current. A settlement is applied
/// at most once and only for the current token.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: u64,
    pending: bool,
}

impl RequestSequence {
    /// Create an empty sequence
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: 0,
            pending: false,
        }
    }

    /// Issue a new token; every earlier token becomes stale
    pub const fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        self.pending = true;
        RequestToken(self.latest)
    }

    /// Make every issued token stale without dispatching a new request
    pub const fn invalidate(&mut self) {
        self.latest += 1;
        self.pending = false;
    }

    /// The newest token issued so far
    #[must_use]
    pub const fn current(&self) -> RequestToken {
        RequestToken(self.latest)
    }

    /// Whether `token` is the newest one issued
    #[must_use]
    pub const fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    /// Whether the current request has not settled yet
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Mark the current request settled
    ///
    /// Returns `false` (and changes nothing) when `token` is stale or was
    /// already settled; the caller must then discard the response.
    pub const fn settle(&mut self, token: RequestToken) -> bool {
        if self.is_current(token) && self.pending {
            self.pending = false;
            true
        } else {
            false
        }
    }
}
