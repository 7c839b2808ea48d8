//! Mount/unmount lifecycle for controllers.
//!
//! A controller is mounted when constructed and unmounted when it is dropped
//! or when any [`LifecycleHandle`] asks for it. Requests still in flight at
//! unmount are abandoned and their responses never reach controller state.

use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Result of a controller operation that was not rejected with an error
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The operation completed and its effect was applied
    Applied(T),
    /// The confirmation gate said no; nothing was sent
    Declined,
    /// The controller was unmounted first; nothing was applied
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            _ => None,
        }
    }
}

/// Owned by a controller; cancels its token on drop
#[derive(Debug)]
pub struct Lifecycle {
    cancel_token: CancellationToken,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::mount()
    }
}

impl Lifecycle {
    pub fn mount() -> Self {
        Self {
            cancel_token: CancellationToken::new(),
        }
    }

    /// Handle the view can keep to unmount the controller later
    pub fn handle(&self) -> LifecycleHandle {
        LifecycleHandle {
            cancel_token: self.cancel_token.clone(),
        }
    }

    pub fn is_mounted(&self) -> bool {
        !self.cancel_token.is_cancelled()
    }

    pub fn unmount(&self) {
        self.cancel_token.cancel();
    }

    /// Drive `future` unless the lifecycle ends first.
    ///
    /// Returns `None` when unmounted before or during the call; the future is
    /// dropped and its result discarded.
    pub async fn run<F: Future>(&self, future: F) -> Option<F::Output> {
        if self.cancel_token.is_cancelled() {
            return None;
        }

        tokio::select! {
            biased;
            _ = self.cancel_token.cancelled() => None,
            output = future => Some(output),
        }
    }
}

impl Drop for Lifecycle {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

/// Cloneable unmount trigger
#[derive(Debug, Clone)]
pub struct LifecycleHandle {
    cancel_token: CancellationToken,
}

impl LifecycleHandle {
    pub fn unmount(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_unmounted(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_completes_while_mounted() {
        let lifecycle = Lifecycle::mount();
        assert_eq!(lifecycle.run(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn test_run_after_unmount_skips_future() {
        let lifecycle = Lifecycle::mount();
        lifecycle.handle().unmount();

        let mut polled = false;
        let result = lifecycle.run(async { polled = true; }).await;
        assert!(result.is_none());
        assert!(!polled);
        assert!(!lifecycle.is_mounted());
    }

    #[tokio::test]
    async fn test_unmount_during_flight_discards_result() {
        let lifecycle = Lifecycle::mount();
        let handle = lifecycle.handle();

        let (result, _) = tokio::join!(
            lifecycle.run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
            async { handle.unmount() }
        );
        assert_eq!(result, None);
    }

    #[test]
    fn test_drop_unmounts_handles() {
        let lifecycle = Lifecycle::mount();
        let handle = lifecycle.handle();
        assert!(!handle.is_unmounted());
        drop(lifecycle);
        assert!(handle.is_unmounted());
    }

    #[test]
    fn test_outcome_accessors() {
        assert!(Outcome::Applied(1).is_applied());
        assert_eq!(Outcome::Applied(1).applied(), Some(1));
        assert_eq!(Outcome::<i32>::Declined.applied(), None);
        assert!(!Outcome::<()>::Cancelled.is_applied());
    }
}
