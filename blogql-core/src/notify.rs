//! Topic-based publish/subscribe.
//!
//! Every subscriber owns one unbounded channel. Publishing fans the event out
//! to the live channels of one topic and forgets it; late subscribers never
//! see earlier events. A subscription removes its channel, and the topic once
//! nobody listens on it, when it is cancelled or dropped.

use crate::events::{Event, Topic};
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::stream::{FusedStream, Stream};
use log::trace;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::{Arc, Weak};
use std::task::{Context, Poll};

type Topics = Mutex<HashMap<String, Vec<UnboundedSender<Event>>>>;

/// Registry of subscribers, keyed by topic name.
#[derive(Debug, Default)]
pub struct Notifier {
    topics: Arc<Topics>,
}

impl Notifier {
    pub fn new() -> Self {
        Notifier::default()
    }

    /// Starts listening on `topic`. Events published from now on are queued
    /// until the subscription is polled, cancelled, or dropped.
    pub fn subscribe(&self, topic: &Topic) -> Subscription {
        let name = topic.to_string();
        let (sender, receiver) = mpsc::unbounded();

        self.topics.lock().entry(name.clone()).or_default().push(sender);

        trace!("topic {}: subscribed", name);
        Subscription {
            topic: name,
            receiver,
            registry: Arc::downgrade(&self.topics),
        }
    }

    /// Delivers `event` to every current subscriber of `topic`, returning how
    /// many received it.
    pub fn publish(&self, topic: &Topic, event: Event) -> usize {
        let name = topic.to_string();
        let mut topics = self.topics.lock();

        let delivered = match topics.get_mut(&name) {
            Some(subscribers) => {
                subscribers.retain(|sender| sender.unbounded_send(event.clone()).is_ok());
                subscribers.len()
            }
            None => 0,
        };

        if delivered == 0 {
            topics.remove(&name);
        }

        trace!("topic {}: {} delivered to {} subscribers", name, event.event_type(), delivered);
        delivered
    }

    /// The number of subscriptions on `topic` that are still listening.
    pub fn subscriber_count(&self, topic: &Topic) -> usize {
        self.topics
            .lock()
            .get(&topic.to_string())
            .map_or(0, |subscribers| subscribers.iter().filter(|sender| !sender.is_closed()).count())
    }

    /// The number of topics with at least one registered channel.
    pub fn topic_count(&self) -> usize {
        self.topics.lock().len()
    }
}

/// A live feed of the events published on one topic.
///
/// The stream ends only once it is cancelled (after yielding anything already
/// queued) or the [`Notifier`] is gone. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    topic: String,
    receiver: UnboundedReceiver<Event>,
    registry: Weak<Topics>,
}

impl Subscription {
    /// The name of the topic being listened to.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Stops listening. Nothing published after this point is received.
    pub fn cancel(&mut self) {
        trace!("topic {}: cancelled", self.topic);
        self.receiver.close();
        self.unregister();
    }

    /// Drops closed channels of this topic, and the topic itself once empty.
    /// Expects the receiver to be closed already.
    fn unregister(&self) {
        let registry = match self.registry.upgrade() {
            Some(registry) => registry,
            None => return,
        };
        let mut topics = registry.lock();

        let empty = match topics.get_mut(&self.topic) {
            Some(subscribers) => {
                subscribers.retain(|sender| !sender.is_closed());
                subscribers.is_empty()
            }
            None => false,
        };

        if empty {
            topics.remove(&self.topic);
            trace!("topic {}: no subscribers left", self.topic);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.receiver.close();
        self.unregister();
    }
}

impl Stream for Subscription {
    type Item = Event;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.receiver).poll_next(cx)
    }
}

impl FusedStream for Subscription {
    fn is_terminated(&self) -> bool {
        self.receiver.is_terminated()
    }
}
