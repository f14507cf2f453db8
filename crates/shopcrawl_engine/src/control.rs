use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// What a checkpoint decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    Continue,
    Stop,
}

struct Shared {
    paused: watch::Sender<bool>,
    cancel: CancellationToken,
}

/// Cloneable controller for one crawl run.
///
/// Pause and stop are requests: the run honors them at its next
/// checkpoint, between fetches, never mid-fetch. Stop wins over pause,
/// so a paused run stops without being resumed first. Stop is permanent;
/// pause can be flipped any number of times.
#[derive(Clone)]
pub struct RunHandle {
    shared: Arc<Shared>,
}

impl RunHandle {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                paused: watch::Sender::new(false),
                cancel: CancellationToken::new(),
            }),
        }
    }

    pub fn pause(&self) {
        self.shared.paused.send_replace(true);
    }

    pub fn resume(&self) {
        self.shared.paused.send_replace(false);
    }

    /// Flips between paused and running. Returns the new paused state.
    pub fn toggle_pause(&self) -> bool {
        let mut now_paused = false;
        self.shared.paused.send_modify(|paused| {
            *paused = !*paused;
            now_paused = *paused;
        });
        now_paused
    }

    pub fn stop(&self) {
        self.shared.cancel.cancel();
    }

    pub fn is_paused(&self) -> bool {
        *self.shared.paused.borrow()
    }

    pub fn is_stopped(&self) -> bool {
        self.shared.cancel.is_cancelled()
    }

    pub(crate) fn signals(&self) -> RunSignals {
        RunSignals {
            paused: self.shared.paused.subscribe(),
            cancel: self.shared.cancel.clone(),
        }
    }
}

impl Default for RunHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Run-side view of a [`RunHandle`]. Waits on signal changes instead of
/// polling a flag.
pub(crate) struct RunSignals {
    paused: watch::Receiver<bool>,
    cancel: CancellationToken,
}

impl RunSignals {
    /// Returns [`Checkpoint::Stop`] once stop has been requested,
    /// otherwise waits out any pause and returns [`Checkpoint::Continue`].
    pub(crate) async fn checkpoint(&mut self) -> Checkpoint {
        loop {
            if self.cancel.is_cancelled() {
                return Checkpoint::Stop;
            }
            if !*self.paused.borrow_and_update() {
                return Checkpoint::Continue;
            }
            tokio::select! {
                _ = self.cancel.cancelled() => return Checkpoint::Stop,
                changed = self.paused.changed() => {
                    if changed.is_err() {
                        // Every handle is gone; nothing can resume us.
                        return if self.cancel.is_cancelled() {
                            Checkpoint::Stop
                        } else {
                            Checkpoint::Continue
                        };
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn checkpoint_passes_when_nothing_was_requested() {
        let handle = RunHandle::new();
        let mut signals = handle.signals();
        assert_eq!(signals.checkpoint().await, Checkpoint::Continue);
    }

    #[tokio::test]
    async fn checkpoint_blocks_while_paused_and_resumes() {
        let handle = RunHandle::new();
        handle.pause();
        let mut signals = handle.signals();

        let blocked = tokio::time::timeout(Duration::from_millis(50), signals.checkpoint()).await;
        assert!(blocked.is_err(), "checkpoint should wait while paused");

        handle.resume();
        assert_eq!(signals.checkpoint().await, Checkpoint::Continue);
    }

    #[tokio::test]
    async fn stop_releases_a_paused_checkpoint() {
        let handle = RunHandle::new();
        handle.pause();
        let mut signals = handle.signals();

        let waiter = tokio::spawn(async move { signals.checkpoint().await });
        handle.stop();
        assert_eq!(waiter.await.unwrap(), Checkpoint::Stop);
    }

    #[tokio::test]
    async fn stop_wins_even_when_resumed_at_the_same_time() {
        let handle = RunHandle::new();
        handle.pause();
        handle.stop();
        handle.resume();
        let mut signals = handle.signals();
        assert_eq!(signals.checkpoint().await, Checkpoint::Stop);
    }

    #[tokio::test]
    async fn toggle_reports_the_new_state() {
        let handle = RunHandle::new();
        assert!(handle.toggle_pause());
        assert!(handle.is_paused());
        assert!(!handle.toggle_pause());
        assert!(!handle.is_paused());
    }

    #[tokio::test]
    async fn stop_is_visible_on_every_clone() {
        let handle = RunHandle::new();
        let other = handle.clone();
        other.stop();
        assert!(handle.is_stopped());
    }
}
