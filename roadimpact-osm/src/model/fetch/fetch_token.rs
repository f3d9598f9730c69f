use std::sync::Arc;

use tokio::sync::watch;

/// identifies one fetch. the token is cancelled as soon as the tracker that
/// issued it begins a newer fetch or is told to cancel everything.
#[derive(Debug, Clone)]
pub struct FetchToken {
    generation: u64,
    receiver: Option<watch::Receiver<u64>>,
}

impl FetchToken {
    /// a token that is never cancelled, for one-shot callers.
    pub fn detached() -> FetchToken {
        FetchToken {
            generation: 0,
            receiver: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_cancelled(&self) -> bool {
        match &self.receiver {
            Some(rx) => *rx.borrow() != self.generation,
            None => false,
        }
    }

    /// resolves once the token is cancelled. pending forever for detached tokens
    /// or when the tracker is dropped without superseding this fetch.
    pub async fn cancelled(&self) {
        let Some(rx) = &self.receiver else {
            return std::future::pending().await;
        };
        let mut rx = rx.clone();
        let generation = self.generation;
        if rx.wait_for(|current| *current != generation).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// issues fetch tokens. at most one token is live at a time.
#[derive(Debug, Clone)]
pub struct InFlightTracker {
    sender: Arc<watch::Sender<u64>>,
}

impl Default for InFlightTracker {
    fn default() -> Self {
        InFlightTracker::new()
    }
}

impl InFlightTracker {
    pub fn new() -> InFlightTracker {
        let (sender, _) = watch::channel(0);
        InFlightTracker {
            sender: Arc::new(sender),
        }
    }

    /// supersedes any in-flight fetch and returns the token of the new one.
    pub fn begin(&self) -> FetchToken {
        self.sender.send_modify(|generation| *generation += 1);
        let receiver = self.sender.subscribe();
        let generation = *receiver.borrow();
        FetchToken {
            generation,
            receiver: Some(receiver),
        }
    }

    pub fn cancel_all(&self) {
        self.sender.send_modify(|generation| *generation += 1);
    }
}
