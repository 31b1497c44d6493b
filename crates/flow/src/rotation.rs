//! Rotating example strings.
//!
//! Capabilities may declare example inputs that cycle while their form is
//! open. The timer task is tied to a guard so that closing the form cancels
//! the rotation instead of leaking background updates.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Cycles through a capability's example strings.
#[derive(Debug, Clone)]
pub struct ExampleRotation {
    examples: Vec<String>,
    index: Arc<AtomicUsize>,
}

impl ExampleRotation {
    pub fn new(examples: Vec<String>) -> Self {
        Self {
            examples,
            index: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// The example currently shown, if any exist.
    pub fn current(&self) -> Option<&str> {
        if self.examples.is_empty() {
            return None;
        }

        let index = self.index.load(Ordering::Relaxed) % self.examples.len();
        self.examples.get(index).map(|example| example.as_str())
    }

    /// Step to the next example, wrapping around.
    pub fn advance(&self) {
        if !self.examples.is_empty() {
            self.index.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Spawn a repeating timer that advances the rotation.
    ///
    /// Dropping the returned guard cancels the timer; do this whenever the
    /// owning form closes.
    pub fn spawn(&self, period: Duration) -> RotationGuard {
        let rotation = self.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                rotation.advance();
            }
        });

        RotationGuard { handle }
    }
}

/// Aborts the rotation task when dropped.
pub struct RotationGuard {
    handle: JoinHandle<()>,
}

impl Drop for RotationGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn examples() -> Vec<String> {
        vec!["first".to_string(), "second".to_string()]
    }

    #[test]
    fn test_advance_wraps_around() {
        let rotation = ExampleRotation::new(examples());

        assert_eq!(rotation.current(), Some("first"));
        rotation.advance();
        assert_eq!(rotation.current(), Some("second"));
        rotation.advance();
        assert_eq!(rotation.current(), Some("first"));
    }

    #[test]
    fn test_empty_rotation_has_no_current() {
        let rotation = ExampleRotation::new(Vec::new());

        assert_eq!(rotation.current(), None);
        rotation.advance();
        assert_eq!(rotation.current(), None);
    }

    #[tokio::test]
    async fn test_timer_advances_and_guard_cancels() {
        let rotation = ExampleRotation::new(examples());
        let guard = rotation.spawn(Duration::from_millis(5));

        tokio::time::sleep(Duration::from_millis(40)).await;
        drop(guard);

        // Let the abort settle, then verify the rotation is frozen
        tokio::time::sleep(Duration::from_millis(10)).await;
        let frozen = rotation.index.load(Ordering::Relaxed);
        assert!(frozen > 0);

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(rotation.index.load(Ordering::Relaxed), frozen);
    }
}
