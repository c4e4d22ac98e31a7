/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Zero-buffer channel where the sender blocks until the receiver asks.
//!
//! A regular bounded channel lets the producer run one item ahead of the
//! consumer. For pagination that means one speculative network round trip
//! past what the caller asked for. The channel here closes that gap: `send`
//! hands the item over and then parks until the receiver polls for more, so
//! the producer only advances on explicit demand.

use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc::error::SendError;
use tokio::sync::Semaphore;

/// Creates a connected rendezvous sender/receiver pair.
pub fn channel<T>() -> (Sender<T>, Receiver<T>) {
    let (tx, rx) = tokio::sync::mpsc::channel(1);
    let demand = Arc::new(Semaphore::new(0));
    (
        Sender {
            demand: demand.clone(),
            chan: tx,
        },
        Receiver {
            demand,
            chan: rx,
            needs_permit: false,
        },
    )
}

/// Producer half of a rendezvous channel.
#[derive(Debug)]
pub struct Sender<T> {
    demand: Arc<Semaphore>,
    chan: tokio::sync::mpsc::Sender<T>,
}

impl<T> Sender<T> {
    /// Delivers `item`, then waits for the receiver to signal further demand.
    ///
    /// An `Err` means the receiver is gone; the producer must stop.
    pub async fn send(&self, item: T) -> Result<(), SendError<T>> {
        let result = self.chan.send(item).await;
        // The key here is that we block _after_ the send until more demand exists
        self.demand
            .acquire()
            .await
            .expect("semaphore is never closed")
            .forget();
        result
    }
}

/// Consumer half of a rendezvous channel.
#[derive(Debug)]
pub struct Receiver<T> {
    demand: Arc<Semaphore>,
    chan: tokio::sync::mpsc::Receiver<T>,
    needs_permit: bool,
}

impl<T> Receiver<T> {
    /// Polls for the next item, granting one unit of demand when the channel
    /// turns out to be empty.
    pub fn poll_recv(&mut self, cx: &mut Context<'_>) -> Poll<Option<T>> {
        let result = self.chan.poll_recv(cx);
        // Empty channel while we are actively reading: let the sender produce one more.
        if self.needs_permit && matches!(result, Poll::Pending) {
            self.needs_permit = false;
            self.demand.add_permits(1);
        }

        if matches!(result, Poll::Ready(_)) {
            // An item was handed over; no new demand until we come up empty again.
            self.needs_permit = true;
        }
        result
    }
}
