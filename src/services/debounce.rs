use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Trailing-edge debouncer for free-text search input.
///
/// Each update cancels the pending trigger and reschedules delivery of
/// the new term after the quiet interval, so only the last term of a
/// burst reaches the receiver.
pub struct SearchDebouncer {
    quiet: Duration,
    tx: UnboundedSender<String>,
    pending: Option<JoinHandle<()>>,
}

impl SearchDebouncer {
    /// Creates a debouncer and the channel its triggers arrive on
    pub fn new(quiet: Duration) -> (Self, UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                quiet,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// Schedules `term` for delivery once the quiet interval passes
    /// without another update
    pub fn update(&mut self, term: impl Into<String>) {
        self.cancel();

        let term = term.into();
        let tx = self.tx.clone();
        let quiet = self.quiet;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            // Receiver may already be gone during shutdown
            let _ = tx.send(term);
        }));
    }

    /// Drops any pending trigger without firing it
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(20);

    #[tokio::test]
    async fn test_burst_collapses_to_last_term() {
        let (mut debouncer, mut rx) = SearchDebouncer::new(QUIET);

        debouncer.update("a");
        debouncer.update("al");
        debouncer.update("alien");

        let term = rx.recv().await.unwrap();
        assert_eq!(term, "alien");

        tokio::time::sleep(QUIET * 3).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_separated_updates_each_fire() {
        let (mut debouncer, mut rx) = SearchDebouncer::new(QUIET);

        debouncer.update("first");
        tokio::time::sleep(QUIET * 3).await;
        debouncer.update("second");

        assert_eq!(rx.recv().await.unwrap(), "first");
        assert_eq!(rx.recv().await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_cancel_suppresses_pending_trigger() {
        let (mut debouncer, mut rx) = SearchDebouncer::new(QUIET);

        debouncer.update("doomed");
        debouncer.cancel();

        tokio::time::sleep(QUIET * 3).await;
        assert!(rx.try_recv().is_err());
    }
}
