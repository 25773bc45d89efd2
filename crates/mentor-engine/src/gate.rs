//! Busy flag that keeps at most one request outstanding per session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared idle/busy flag.
///
/// Cloning a gate yields another handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct Gate {
    busy: Arc<AtomicBool>,
}

impl Gate {
    /// Create an idle gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the gate if it is idle.
    ///
    /// Returns `None` when a request is already outstanding. The gate stays
    /// busy until the returned permit is released or dropped.
    pub fn try_enter(&self) -> Option<GatePermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| GatePermit {
                busy: Arc::clone(&self.busy),
            })
    }

    /// Whether a request is currently outstanding.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof that the gate is held. Dropping it clears the busy flag.
#[derive(Debug)]
#[must_use = "dropping the permit releases the gate immediately"]
pub struct GatePermit {
    busy: Arc<AtomicBool>,
}

impl GatePermit {
    /// Release the gate explicitly.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_starts_idle() {
        let gate = Gate::new();
        assert!(!gate.is_busy());
    }

    #[test]
    fn test_second_enter_is_refused() {
        let gate = Gate::new();
        let permit = gate.try_enter().expect("idle gate should admit");
        assert!(gate.is_busy());
        assert!(gate.try_enter().is_none());

        permit.release();
        assert!(!gate.is_busy());
        assert!(gate.try_enter().is_some());
    }

    #[test]
    fn test_drop_releases() {
        let gate = Gate::new();
        {
            let _permit = gate.try_enter().unwrap();
            assert!(gate.is_busy());
        }
        assert!(!gate.is_busy());
    }

    #[test]
    fn test_clones_share_state() {
        let gate = Gate::new();
        let other = gate.clone();
        let _permit = gate.try_enter().unwrap();
        assert!(other.is_busy());
        assert!(other.try_enter().is_none());
    }

    #[tokio::test]
    async fn test_panicking_task_releases() {
        let gate = Gate::new();
        let permit = gate.try_enter().unwrap();

        let handle = tokio::spawn(async move {
            let _permit = permit;
            panic!("request task blew up");
        });
        assert!(handle.await.is_err());
        assert!(!gate.is_busy());
    }
}
