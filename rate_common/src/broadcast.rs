//! Hot multicast of published exchange rates.
//!
//! `RateBroadcaster` keeps one unbounded `crossbeam_channel` sender per
//! subscriber. Publishing clones the value into every live subscriber queue;
//! subscribers whose receiver was dropped are removed on the next publish.
//! Nothing is retained, so a late subscriber only sees what is published after
//! it subscribed.
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, unbounded};

use crate::rate::ExchangeRate;
use crate::result::Result;

/// Identifier handed out by [`RateBroadcaster::subscribe`].
pub type SubscriberId = u64;

/// A live view on the published rates.
pub struct Subscription {
    id: SubscriberId,
    receiver: Receiver<ExchangeRate>,
}

impl Subscription {
    /// Identifier used to unsubscribe.
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Underlying receiver, e.g. for `crossbeam_channel::select!`.
    pub fn receiver(&self) -> &Receiver<ExchangeRate> {
        &self.receiver
    }

    /// Next rate if one is already queued.
    pub fn try_next(&self) -> Option<ExchangeRate> {
        match self.receiver.try_recv() {
            Ok(rate) => Some(rate),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Waits up to `timeout` for the next rate.
    pub fn next_timeout(&self, timeout: Duration) -> Option<ExchangeRate> {
        match self.receiver.recv_timeout(timeout) {
            Ok(rate) => Some(rate),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Everything queued right now, in publish order.
    pub fn drain(&self) -> Vec<ExchangeRate> {
        self.receiver.try_iter().collect()
    }
}

/// Publish/subscribe hub for rates.
#[derive(Default)]
pub struct RateBroadcaster {
    next_id: AtomicU64,
    subscribers: Mutex<HashMap<SubscriberId, Sender<ExchangeRate>>>,
}

impl RateBroadcaster {
    /// Empty broadcaster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber that sees every rate published from now on.
    pub fn subscribe(&self) -> Result<Subscription> {
        let (tx, rx) = unbounded();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.lock()?.insert(id, tx);
        Ok(Subscription { id, receiver: rx })
    }

    /// Removes a subscriber; its receiver disconnects once drained.
    pub fn unsubscribe(&self, id: SubscriberId) -> Result<bool> {
        Ok(self.subscribers.lock()?.remove(&id).is_some())
    }

    /// Delivers `rate` to every live subscriber. Returns how many received it.
    pub fn publish(&self, rate: &ExchangeRate) -> Result<usize> {
        let mut subscribers = self.subscribers.lock()?;
        subscribers.retain(|_, tx| tx.send(rate.clone()).is_ok());
        Ok(subscribers.len())
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> Result<usize> {
        Ok(self.subscribers.lock()?.len())
    }
}
