use std::sync::Arc;

use log::info;
use rocket::tokio::{
    self,
    sync::watch,
    task::JoinHandle,
    time::{Duration, MissedTickBehavior},
};

use crate::model::{
    election::ElectionStatus,
    store::{ElectionStore, SharedStore},
};

/// A background task that re-derives the election status on a fixed interval
/// and publishes it to subscribers whenever it changes.
/// The task stops when the watcher is stopped or dropped.
pub struct StatusWatcher {
    task_handle: JoinHandle<()>,
    sender: Arc<watch::Sender<ElectionStatus>>,
    receiver: watch::Receiver<ElectionStatus>,
}

impl StatusWatcher {
    /// Start polling `store` every `interval`, beginning from `initial`.
    /// Must be called from within a Tokio runtime.
    pub fn spawn(store: SharedStore, initial: ElectionStatus, interval: Duration) -> Self {
        let (sender, receiver) = watch::channel(initial);
        let sender = Arc::new(sender);

        let task_sender = sender.clone();
        let task_handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let status = store.lock().await.status();
                publish(&task_sender, status);
            }
        });

        Self {
            task_handle,
            sender,
            receiver,
        }
    }

    /// The most recently published status.
    pub fn current(&self) -> ElectionStatus {
        *self.receiver.borrow()
    }

    /// Receive every future status transition.
    pub fn subscribe(&self) -> watch::Receiver<ElectionStatus> {
        self.receiver.clone()
    }

    /// Re-derive immediately after a mutation instead of waiting for the next tick.
    pub fn refresh(&self, store: &ElectionStore) {
        publish(&self.sender, store.status());
    }

    /// Stop polling. Subscribers keep the last published status.
    pub fn stop(&self) {
        self.task_handle.abort();
    }

    pub fn is_stopped(&self) -> bool {
        self.task_handle.is_finished()
    }
}

impl Drop for StatusWatcher {
    fn drop(&mut self) {
        self.task_handle.abort();
    }
}

/// Publish `status` only if it differs from the last published one.
fn publish(sender: &watch::Sender<ElectionStatus>, status: ElectionStatus) {
    sender.send_if_modified(|current| {
        if *current == status {
            return false;
        }
        info!("Election status changed: {current} -> {status}");
        *current = status;
        true
    });
}
