//! One-shot cooperative stop flag shared by all session threads.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Signal that the session should terminate.
///
/// Set once by the control thread, checked by every worker loop at its
/// iteration boundary. There is no reset: a signal is good for exactly one
/// session. Clones share the same underlying flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    stopped: Arc<AtomicBool>,
}

impl ShutdownSignal {
    /// Creates a new, unset signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request termination.
    ///
    /// Returns `true` for the call that actually flipped the flag, `false`
    /// for every later call.
    pub fn request_stop(&self) -> bool {
        !self.stopped.swap(true, Ordering::SeqCst)
    }

    /// Whether termination has been requested.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_signal_starts_unset() {
        let signal = ShutdownSignal::new();
        assert!(!signal.is_stopped());
    }

    #[test]
    fn test_request_stop_sets_flag() {
        let signal = ShutdownSignal::new();
        assert!(signal.request_stop());
        assert!(signal.is_stopped());
    }

    #[test]
    fn test_request_stop_is_one_shot() {
        let signal = ShutdownSignal::new();
        assert!(signal.request_stop());
        assert!(!signal.request_stop());
        assert!(signal.is_stopped());
    }

    #[test]
    fn test_clones_share_the_flag() {
        let signal = ShutdownSignal::new();
        let observer = signal.clone();
        signal.request_stop();
        assert!(observer.is_stopped());
    }

    #[test]
    fn test_visible_across_threads() {
        let signal = ShutdownSignal::new();
        let worker_signal = signal.clone();

        let handle = thread::spawn(move || {
            while !worker_signal.is_stopped() {
                thread::yield_now();
            }
            true
        });

        signal.request_stop();
        assert!(handle.join().unwrap());
    }
}
