use std::collections::{HashSet, VecDeque};

use bytes::Bytes;

use crate::broker::message::PendingMessage;

pub type SubscriberId = String;

/// Represents a topic in the broker system.
///
/// A topic holds the set of currently subscribed usernames and a bounded
/// FIFO queue of messages still pending for at least one of them. The queue
/// is ordered oldest-first; removals during retrieval compact the queue in
/// place and never permute the relative order of surviving messages.
#[derive(Debug, Default)]
pub struct Topic {
    pub name: String,
    pub subscribers: HashSet<SubscriberId>,
    pub queue: VecDeque<PendingMessage>,
}

impl Topic {
    /// Creates a new instance of the Topic with the given name.
    /// Initializes an empty set of subscribers and an empty message queue.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            subscribers: HashSet::new(),
            queue: VecDeque::new(),
        }
    }

    /// Subscribes a new subscriber to the topic.
    /// If the subscriber is already subscribed, it has no effect.
    pub fn subscribe(&mut self, id: SubscriberId) {
        self.subscribers.insert(id);
    }

    /// Unsubscribes a subscriber from the topic.
    /// Returns `false` if the subscriber was not subscribed.
    pub fn unsubscribe(&mut self, id: &str) -> bool {
        self.subscribers.remove(id)
    }

    /// Appends a message to the tail of the queue, snapshotting the current
    /// subscriber set as its pending recipients. Returns the evicted oldest
    /// message if the queue exceeded `max_queue_length`.
    pub fn push_message(&mut self, payload: Bytes, max_queue_length: usize) -> Option<PendingMessage> {
        self.queue
            .push_back(PendingMessage::new(payload, &self.subscribers));
        if self.queue.len() > max_queue_length {
            self.queue.pop_front()
        } else {
            None
        }
    }

    /// Finds the oldest message still pending for `user`, marks it as
    /// delivered to them, and returns its payload. A message whose pending
    /// set empties is removed from the queue entirely, freeing its capacity.
    pub fn take_next(&mut self, user: &str) -> Option<Bytes> {
        let index = self.queue.iter().position(|m| m.pending.contains(user))?;
        let message = &mut self.queue[index];
        message.pending.remove(user);
        let payload = message.payload.clone();
        if message.pending.is_empty() {
            self.queue.remove(index);
        }
        Some(payload)
    }

    /// Removes `user` from the pending set of every queued message, dropping
    /// messages that no longer have any pending recipient. Without this a
    /// departed user's reservation on old messages would never be released
    /// and the queue capacity would leak.
    pub fn release_pending(&mut self, user: &str) {
        self.queue.retain_mut(|message| {
            message.pending.remove(user);
            !message.pending.is_empty()
        });
    }
}
