use bytes::Bytes;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use crate::broker::topic::Topic;
use crate::utils::error::BrokerError;

/// Represents the broker that manages topics and per-subscriber delivery.
///
/// The broker maintains a mapping from topic name to topic state and exposes
/// the four operations of the relay: subscribe, unsubscribe, publish and
/// retrieve. A topic entry exists exactly while it has at least one current
/// subscriber; the first subscribe creates it and the last unsubscribe
/// removes it, together with whatever is left of its queue.
///
/// Concurrency: the registry is a sharded map, so operations on the same
/// topic serialize on its shard lock while operations on distinct topics
/// proceed in parallel. Registry-level creation and removal go through the
/// entry API, so a last-unsubscribe racing a re-subscribe cannot destroy
/// concurrently arriving state. Every operation is a bounded scan over a
/// queue capped at `max_queue_length`; nothing blocks or waits across
/// requests, subscribers poll.
#[derive(Debug)]
pub struct Broker {
    pub topics: DashMap<String, Topic>,
    max_queue_length: usize,
}

impl Broker {
    /// Creates a new broker retaining at most `max_queue_length` messages
    /// per topic. The bound must be positive; configuration loading rejects
    /// zero before a broker is ever constructed.
    pub fn new(max_queue_length: usize) -> Self {
        debug_assert!(max_queue_length > 0, "queue bound must be positive");
        Self {
            topics: DashMap::new(),
            max_queue_length,
        }
    }

    /// Subscribes `user` to a topic. Automatically creates the topic if it
    /// doesn't exist. Idempotent: subscribing twice has no further effect,
    /// and the operation never fails.
    pub fn subscribe(&self, topic: &str, user: &str) {
        self.topics
            .entry(topic.to_string())
            .or_insert_with(|| Topic::new(topic))
            .subscribe(user.to_string());
    }

    /// Unsubscribes `user` from a topic.
    ///
    /// The departing user is released from every queued message first; if
    /// the subscriber set then becomes empty the topic entry is removed
    /// (its queue is necessarily empty at that point, since pending sets
    /// only ever contain current subscribers).
    pub fn unsubscribe(&self, topic: &str, user: &str) -> Result<(), BrokerError> {
        match self.topics.entry(topic.to_string()) {
            Entry::Vacant(_) => Err(BrokerError::TopicNotFound(topic.to_string())),
            Entry::Occupied(mut entry) => {
                let state = entry.get_mut();
                if !state.unsubscribe(user) {
                    return Err(BrokerError::NotSubscribed {
                        topic: topic.to_string(),
                        user: user.to_string(),
                    });
                }
                state.release_pending(user);
                if state.subscribers.is_empty() {
                    entry.remove();
                    debug!("removed topic {} after last unsubscribe", topic);
                }
                Ok(())
            }
        }
    }

    /// Publishes a message to a topic.
    ///
    /// If the topic has never been subscribed to there is no registry entry,
    /// and the message is accepted but dropped: nobody is entitled to
    /// receive it and no entry is created. Otherwise the message is appended
    /// with the current subscriber set snapshotted as its recipients, and
    /// the queue bound is enforced by evicting the oldest message, whether
    /// or not anyone still had it pending.
    pub fn publish(&self, topic: &str, payload: Bytes) {
        let Some(mut state) = self.topics.get_mut(topic) else {
            debug!("dropped message for topic {} with no subscribers", topic);
            return;
        };
        if let Some(evicted) = state.push_message(payload, self.max_queue_length) {
            debug!(
                "topic {} over capacity, evicted oldest message still pending for {} subscriber(s)",
                topic,
                evicted.pending.len()
            );
        }
    }

    /// Retrieves the oldest message still pending for `user` on a topic.
    ///
    /// Returns `Ok(None)` when the subscription is valid but nothing new is
    /// queued for this user, which is distinct from the `Err` cases where
    /// the topic does not exist or the user is not a current subscriber.
    /// Delivery is at-most-once: the returned message is no longer pending
    /// for `user`, and is gone from the queue once every recipient has it.
    pub fn retrieve(&self, topic: &str, user: &str) -> Result<Option<Bytes>, BrokerError> {
        let mut state = self
            .topics
            .get_mut(topic)
            .ok_or_else(|| BrokerError::TopicNotFound(topic.to_string()))?;
        if !state.subscribers.contains(user) {
            return Err(BrokerError::NotSubscribed {
                topic: topic.to_string(),
                user: user.to_string(),
            });
        }
        Ok(state.take_next(user))
    }
}
