use std::collections::HashSet;

use bytes::Bytes;

use crate::broker::topic::SubscriberId;

/// A published message waiting to be picked up by its recipients.
///
/// The payload is an opaque byte sequence; the broker never inspects it.
/// `pending` is an independent snapshot of the topic's subscriber set taken
/// at publish time, so users who subscribe later never see this message.
/// Users are removed from `pending` as they retrieve the message (or when
/// they unsubscribe), and once the set empties the message is dropped from
/// its topic's queue.
#[derive(Debug, Clone)]
pub struct PendingMessage {
    pub payload: Bytes,
    pub pending: HashSet<SubscriberId>,
}

impl PendingMessage {
    /// Creates a new pending message, snapshotting the given subscriber set.
    pub fn new(payload: Bytes, subscribers: &HashSet<SubscriberId>) -> Self {
        Self {
            payload,
            pending: subscribers.clone(),
        }
    }
}
