// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

///
/// An AsyncLatch is a simple condition that can be triggered once to release any tasks that are
/// waiting for it.
///
/// Used throughout this crate as the process-wide shutdown flag: every queue push/pop and every
/// accept loop races against `triggered()` so that a single `trigger()` call wakes every blocked
/// worker at once.
///
#[derive(Clone)]
pub struct AsyncLatch {
    sender: Arc<Mutex<Option<watch::Sender<()>>>>,
    receiver: watch::Receiver<()>,
}

impl Default for AsyncLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncLatch {
    pub fn new() -> AsyncLatch {
        let (sender, receiver) = watch::channel(());
        AsyncLatch {
            sender: Arc::new(Mutex::new(Some(sender))),
            receiver,
        }
    }

    ///
    /// Mark this latch triggered, releasing all tasks that are waiting for it to trigger.
    ///
    /// All calls to trigger after the first one are noops.
    ///
    pub fn trigger(&self) {
        // To trigger the latch, we drop the Sender.
        self.sender.lock().take();
    }

    ///
    /// Wait for another task to trigger this latch.
    ///
    pub async fn triggered(&self) {
        let mut receiver = self.receiver.clone();
        while receiver.changed().await.is_ok() {}
    }

    ///
    /// Return true if the latch has been triggered.
    ///
    pub fn poll_triggered(&self) -> bool {
        self.sender.lock().is_none()
    }
}
