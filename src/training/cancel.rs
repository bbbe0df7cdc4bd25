//! Cooperative cancellation for training runs

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag checked between epochs
///
/// Clones observe the same flag, so one clone can be handed to whoever
/// needs to stop the run.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; takes effect before the next epoch
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_flag() {
        let token = CancelToken::new();
        let handle = token.clone();
        assert!(!token.is_cancelled());
        handle.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancel_from_other_thread() {
        let token = CancelToken::new();
        let handle = token.clone();
        std::thread::spawn(move || handle.cancel()).join().unwrap();
        assert!(token.is_cancelled());
    }
}
