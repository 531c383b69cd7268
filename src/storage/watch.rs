//! Reactive read subscriptions
//!
//! A subscription delivers the current result of its query right away and a
//! fresh result after every write to the owning store. Dropping the
//! [`Subscription`] cancels it: the store notices the closed channel on the
//! next write and forgets the subscriber.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::{SpendlogError, SpendlogResult};

/// Receiving end of a store subscription
#[derive(Debug)]
pub struct Subscription<T> {
    receiver: Receiver<T>,
}

impl<T> Subscription<T> {
    /// Drain pending emissions and return the newest one, if any
    pub fn latest(&self) -> Option<T> {
        let mut newest = None;
        loop {
            match self.receiver.try_recv() {
                Ok(value) => newest = Some(value),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return newest,
            }
        }
    }

    /// Block until the next emission or until `timeout` elapses
    pub fn next_timeout(&self, timeout: Duration) -> Option<T> {
        match self.receiver.recv_timeout(timeout) {
            Ok(value) => Some(value),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

/// Registered subscribers of a store, each with the query it watches
pub(crate) struct Watchers<Q, T> {
    entries: Mutex<Vec<(Q, Sender<T>)>>,
}

impl<Q, T> Watchers<Q, T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Register a subscriber and deliver its first result
    pub(crate) fn add(&self, query: Q, initial: T) -> SpendlogResult<Subscription<T>> {
        let (sender, receiver) = mpsc::channel();
        // The receiver is alive here, so this send cannot fail
        let _ = sender.send(initial);

        let mut entries = self.entries.lock().map_err(|e| {
            SpendlogError::Storage(format!("Failed to acquire subscriber lock: {}", e))
        })?;
        entries.push((query, sender));

        Ok(Subscription { receiver })
    }

    /// Re-run every subscriber's query and push the result, pruning
    /// subscribers whose receiving end has been dropped
    pub(crate) fn notify<F>(&self, mut evaluate: F) -> SpendlogResult<()>
    where
        F: FnMut(&Q) -> T,
    {
        let mut entries = self.entries.lock().map_err(|e| {
            SpendlogError::Storage(format!("Failed to acquire subscriber lock: {}", e))
        })?;
        entries.retain(|(query, sender)| sender.send(evaluate(query)).is_ok());
        Ok(())
    }

    /// Number of live subscribers (as of the last notification)
    pub(crate) fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }
}
