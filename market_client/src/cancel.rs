//! Cancellation tokens for in-flight requests.
//!
//! Every request gets its own `CancelToken`, derived from the session root. Cancelling
//! the root (Ctrl+C) cancels every token derived from it; cancelling a single token
//! only discards that request's result.
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared cancellation flag with an optional parent.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    parent: Option<Box<CancelToken>>,
}

impl CancelToken {
    /// Creates a root token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a token that is also cancelled when `self` or any of its ancestors is.
    pub fn child(&self) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            parent: Some(Box::new(self.clone())),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
            || self
                .parent
                .as_ref()
                .is_some_and(|parent| parent.is_cancelled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_cancels_children() {
        let root = CancelToken::new();
        let a = root.child();
        let b = root.child();
        assert!(!a.is_cancelled());
        root.cancel();
        assert!(a.is_cancelled());
        assert!(b.is_cancelled());
    }

    #[test]
    fn root_cancels_grandchildren() {
        let root = CancelToken::new();
        let child = root.child();
        let grandchild = child.child();
        assert!(!grandchild.is_cancelled());
        root.cancel();
        assert!(grandchild.is_cancelled());

        let other = CancelToken::new().child();
        let nested = other.child();
        other.cancel();
        assert!(nested.is_cancelled());
    }

    #[test]
    fn child_cancel_does_not_leak() {
        let root = CancelToken::new();
        let a = root.child();
        let b = root.child();
        a.cancel();
        assert!(a.is_cancelled());
        assert!(!b.is_cancelled());
        assert!(!root.is_cancelled());
    }

    #[test]
    fn clones_share_state() {
        let token = CancelToken::new().child();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }
}
