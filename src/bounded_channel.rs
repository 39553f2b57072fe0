// SPDX-License-Identifier: Apache-2.0

//! Bounded FIFO hand-off queue between the discovery actor and reader
//! workers.
//!
//! Discovery pushes ready jobs with [`BoundedSender::send_blocking`]; when the
//! queue is full the push blocks, which is the system's backpressure
//! mechanism (discovery throttles when readers fall behind). Readers pull
//! from dedicated OS threads with [`BoundedReceiver::recv_blocking`], or
//! asynchronously with [`BoundedReceiver::next`].

use flume::{Receiver, Sender};
use std::fmt;
use std::time::Duration;

/// The receiving side of the channel was dropped. Carries the undelivered
/// item back to the caller so an owned job is never silently lost.
pub struct Disconnected<T>(pub T);

impl<T> fmt::Debug for Disconnected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Disconnected(..)")
    }
}

impl<T> fmt::Display for Disconnected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("channel disconnected")
    }
}

pub struct BoundedSender<T> {
    tx: Sender<T>,
}

impl<T> BoundedSender<T> {
    pub async fn send(&self, item: T) -> Result<(), Disconnected<T>> {
        self.tx
            .send_async(item)
            .await
            .map_err(|e| Disconnected(e.into_inner()))
    }

    /// Blocking send, for non-async contexts (dedicated OS threads).
    /// Blocks until there is capacity in the channel.
    pub fn send_blocking(&self, item: T) -> Result<(), Disconnected<T>> {
        self.tx.send(item).map_err(|e| Disconnected(e.into_inner()))
    }

    pub fn len(&self) -> usize {
        self.tx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.is_empty()
    }
}

impl<T> Clone for BoundedSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

#[derive(Clone)]
pub struct BoundedReceiver<T> {
    rx: Receiver<T>,
}

impl<T> BoundedReceiver<T> {
    /// Returns `None` once every sender is dropped and the queue is drained.
    pub async fn next(&mut self) -> Option<T> {
        self.rx.recv_async().await.ok()
    }

    /// Blocking receive, for non-async contexts (dedicated OS threads).
    pub fn recv_blocking(&self) -> Option<T> {
        self.rx.recv().ok()
    }

    /// Non-blocking receive. Returns `None` if no item is available or the
    /// channel is disconnected.
    pub fn try_recv(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Blocking receive with timeout. Returns `None` on timeout or
    /// disconnect.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<T> {
        self.rx.recv_timeout(timeout).ok()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

pub fn bounded<T>(size: usize) -> (BoundedSender<T>, BoundedReceiver<T>) {
    let (tx, rx) = flume::bounded::<T>(size);

    (BoundedSender { tx }, BoundedReceiver { rx })
}
