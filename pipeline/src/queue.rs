// Copyright 2026 graph-pipeline-server project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! A bounded, named, FIFO queue between two pipeline stages (§3 "Queue", §5 "Shared
//! resources"). Producers block while full, consumers block while empty, and both wake
//! immediately on shutdown.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tokio::sync::Notify;

use async_latch::AsyncLatch;

/// A bounded FIFO queue of capacity `C`. No work is ever done while the internal lock is held
/// beyond the enqueue/dequeue bookkeeping itself — the bulk of push/pop time is spent
/// suspended on a `Notify`, not spinning on the mutex.
pub struct BoundedQueue<T> {
    name: String,
    capacity: usize,
    items: Mutex<VecDeque<T>>,
    not_empty: Notify,
    not_full: Notify,
    shutdown: AsyncLatch,
}

impl<T> BoundedQueue<T> {
    pub fn new(name: impl Into<String>, capacity: usize, shutdown: AsyncLatch) -> Self {
        assert!(capacity > 0, "queue capacity must be positive");
        BoundedQueue {
            name: name.into(),
            capacity,
            items: Mutex::new(VecDeque::with_capacity(capacity)),
            not_empty: Notify::new(),
            not_full: Notify::new(),
            shutdown,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pushes `item` onto the back of the queue, suspending while it is full. Returns the item
    /// back to the caller if shutdown was observed before room became available: the caller
    /// (an acceptor, or the previous stage's worker) owns abandoning it.
    pub async fn push(&self, item: T) -> Result<(), T> {
        loop {
            {
                let mut guard = self.items.lock();
                if guard.len() < self.capacity {
                    guard.push_back(item);
                    drop(guard);
                    self.not_empty.notify_one();
                    return Ok(());
                }
            }
            if self.shutdown.poll_triggered() {
                return Err(item);
            }
            tokio::select! {
                _ = self.not_full.notified() => {}
                _ = self.shutdown.triggered() => {
                    return Err(item);
                }
            }
            // Loop around: either there may now be room, or we are shutting down and the top
            // of the loop will observe that and return the item.
        }
    }

    /// Pops the front item, suspending while empty. Returns `None` once shutdown has been
    /// observed and the queue has drained, per §4.4's shutdown semantics.
    pub async fn pop(&self) -> Option<T> {
        loop {
            {
                let mut guard = self.items.lock();
                if let Some(item) = guard.pop_front() {
                    drop(guard);
                    self.not_full.notify_one();
                    return Some(item);
                }
            }
            if self.shutdown.poll_triggered() {
                // A final check: a push racing with the shutdown trigger may have landed just
                // before we observed the flag.
                let mut guard = self.items.lock();
                if let Some(item) = guard.pop_front() {
                    drop(guard);
                    return Some(item);
                }
                return None;
            }
            tokio::select! {
                _ = self.not_empty.notified() => {}
                _ = self.shutdown.triggered() => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn fifo_order_is_preserved() {
        let shutdown = AsyncLatch::new();
        let q = BoundedQueue::new("q", 4, shutdown);
        q.push(1).await.unwrap();
        q.push(2).await.unwrap();
        q.push(3).await.unwrap();
        assert_eq!(q.pop().await, Some(1));
        assert_eq!(q.pop().await, Some(2));
        assert_eq!(q.pop().await, Some(3));
    }

    #[tokio::test]
    async fn push_blocks_when_full_until_a_pop_frees_room() {
        let shutdown = AsyncLatch::new();
        let q = Arc::new(BoundedQueue::new("q", 1, shutdown));
        q.push(1).await.unwrap();

        let q2 = q.clone();
        let pusher = tokio::spawn(async move { q2.push(2).await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!pusher.is_finished());

        assert_eq!(q.pop().await, Some(1));
        tokio::time::timeout(Duration::from_secs(5), pusher)
            .await
            .expect("pusher should have unblocked")
            .unwrap()
            .unwrap();
        assert_eq!(q.pop().await, Some(2));
    }

    #[tokio::test]
    async fn pop_blocks_when_empty_until_a_push_arrives() {
        let shutdown = AsyncLatch::new();
        let q = Arc::new(BoundedQueue::new("q", 4, shutdown));
        let q2 = q.clone();
        let popper = tokio::spawn(async move { q2.pop().await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!popper.is_finished());

        q.push(42).await.unwrap();
        let result = tokio::time::timeout(Duration::from_secs(5), popper)
            .await
            .expect("popper should have unblocked")
            .unwrap();
        assert_eq!(result, Some(42));
    }

    #[tokio::test]
    async fn shutdown_wakes_a_blocked_pop_with_none() {
        let shutdown = AsyncLatch::new();
        let q = Arc::new(BoundedQueue::<i32>::new("q", 4, shutdown.clone()));
        let q2 = q.clone();
        let popper = tokio::spawn(async move { q2.pop().await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        shutdown.trigger();

        let result = tokio::time::timeout(Duration::from_secs(5), popper)
            .await
            .expect("popper should have unblocked on shutdown")
            .unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn shutdown_wakes_a_blocked_push_and_returns_the_item() {
        let shutdown = AsyncLatch::new();
        let q = Arc::new(BoundedQueue::new("q", 1, shutdown.clone()));
        q.push("first").await.unwrap();

        let q2 = q.clone();
        let pusher = tokio::spawn(async move { q2.push("second").await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        shutdown.trigger();

        let result = tokio::time::timeout(Duration::from_secs(5), pusher)
            .await
            .expect("pusher should have unblocked on shutdown")
            .unwrap();
        assert_eq!(result, Err("second"));
    }

    #[tokio::test]
    async fn push_after_shutdown_fails_immediately() {
        let shutdown = AsyncLatch::new();
        shutdown.trigger();
        let q = BoundedQueue::new("q", 4, shutdown);
        assert_eq!(q.push(1).await, Err(1));
    }
}
