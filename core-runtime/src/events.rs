//! # Event Bus System
//!
//! Multicast notifications built on `tokio::sync::broadcast`.
//!
//! ## Overview
//!
//! - **EventBus**: a cloneable sender side; every [`EventBus::emit`] reaches all
//!   subscribers that exist at that moment
//! - **EventStream**: a subscription with optional filtering, consumable with
//!   `recv()` or as a `futures::Stream`
//!
//! Subscribers only see events emitted after they subscribed. There is no
//! replay buffer for late subscribers.
//!
//! ```text
//! ┌──────────────┐  emit   ┌───────────┐  subscribe  ┌────────────┐
//! │ Sign-in core ├────────>│ EventBus  ├────────────>│ Subscriber │
//! └──────────────┘         │ (broadcast│             └────────────┘
//!                          │  channel) ├────────────>┌────────────┐
//!                          └───────────┘             │ Subscriber │
//!                                                    └────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::EventBus;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let bus: EventBus<Option<String>> = EventBus::new(16);
//! let mut stream = bus.stream();
//!
//! bus.emit(Some("user-1".to_string())).ok();
//! bus.emit(None).ok();
//!
//! assert_eq!(stream.recv().await.unwrap(), Some("user-1".to_string()));
//! assert_eq!(stream.recv().await.unwrap(), None);
//! # }
//! ```
//!
//! ## Error Handling
//!
//! - **`RecvError::Lagged(n)`**: the subscriber fell more than `capacity`
//!   events behind and missed `n` of them. Non-fatal.
//! - **`RecvError::Closed`**: every sender was dropped.
//!
//! `emit` returns an error when nobody is subscribed. Publishers that do not
//! care whether anyone is listening ignore it.

use futures::stream::{self, Stream};
use std::fmt;
use tokio::sync::broadcast;

pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for an event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 64;

/// Cloneable broadcast sender for events of type `E`.
pub struct EventBus<E> {
    sender: broadcast::Sender<E>,
}

impl<E: Clone> EventBus<E> {
    /// Creates a new event bus.
    ///
    /// `capacity` is the number of events a subscriber may fall behind
    /// before it starts receiving `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an event to all current subscribers.
    ///
    /// Returns the number of subscribers that will see it, or an error if
    /// there are none.
    pub fn emit(&self, event: E) -> Result<usize, SendError<E>> {
        self.sender.send(event)
    }

    /// Creates a raw receiver for future events.
    pub fn subscribe(&self) -> Receiver<E> {
        self.sender.subscribe()
    }

    /// Creates a filtering-capable stream for future events.
    pub fn stream(&self) -> EventStream<E> {
        EventStream::new(self.subscribe())
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<E: Clone> Default for EventBus<E> {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<E> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.sender.receiver_count())
            .finish()
    }
}

type EventFilter<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;

/// A subscription to an [`EventBus`] with optional filtering.
pub struct EventStream<E> {
    receiver: Receiver<E>,
    filter: Option<EventFilter<E>>,
}

impl<E: Clone> EventStream<E> {
    pub fn new(receiver: Receiver<E>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    /// Only events matching `predicate` are returned from now on.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    fn accepts(&self, event: &E) -> bool {
        self.filter.as_ref().map_or(true, |f| f(event))
    }

    /// Receives the next event that passes the filter.
    ///
    /// # Errors
    ///
    /// `RecvError::Lagged(n)` if `n` events were missed, `RecvError::Closed`
    /// once all senders are gone.
    pub async fn recv(&mut self) -> Result<E, RecvError> {
        loop {
            let event = self.receiver.recv().await?;
            if self.accepts(&event) {
                return Ok(event);
            }
        }
    }

    /// Returns the next buffered matching event without waiting.
    ///
    /// `None` when nothing is buffered.
    pub fn try_recv(&mut self) -> Option<Result<E, RecvError>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.accepts(&event) {
                        return Some(Ok(event));
                    }
                }
                Err(broadcast::error::TryRecvError::Empty) => return None,
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    return Some(Err(RecvError::Lagged(n)))
                }
                Err(broadcast::error::TryRecvError::Closed) => return Some(Err(RecvError::Closed)),
            }
        }
    }
}

impl<E: Clone + Send + 'static> EventStream<E> {
    /// Converts the subscription into a `futures::Stream`.
    ///
    /// Lagged gaps are skipped; the stream ends when the bus is closed.
    pub fn into_stream(self) -> impl Stream<Item = E> + Send {
        stream::unfold(self, |mut events| async move {
            loop {
                match events.recv().await {
                    Ok(event) => return Some((event, events)),
                    Err(RecvError::Lagged(missed)) => {
                        tracing::warn!(missed, "Event subscriber lagged");
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        })
    }
}

impl<E> fmt::Debug for EventStream<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}
