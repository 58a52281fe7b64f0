//! In-process publish/subscribe channel for [`GuiEvent`]s.
//!
//! Backed by a `tokio` broadcast channel: every subscriber sees every event
//! published after it subscribed, in publish order. Nothing is promised about
//! the relative order in which different subscribers observe an event.

use tokio::sync::broadcast;
use tracing::{trace, warn};

use crate::error::EventError;
use crate::events::GuiEvent;

/// Configuration for an [`EventChannel`].
#[derive(Debug, Clone)]
pub struct EventChannelConfig {
    /// Events buffered per subscriber before the oldest are overwritten.
    pub capacity: usize,
}

impl EventChannelConfig {
    /// Default buffer size.
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Override the buffer size. Must be non-zero.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }
}

impl Default for EventChannelConfig {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
        }
    }
}

/// Publishing end of the event channel. Cheap to clone.
#[derive(Debug, Clone)]
pub struct EventChannel {
    sender: broadcast::Sender<GuiEvent>,
}

impl EventChannel {
    /// Create a channel with the given configuration.
    #[must_use]
    pub fn new(config: EventChannelConfig) -> Self {
        let (sender, _) = broadcast::channel(config.capacity.max(1));
        Self { sender }
    }

    /// Publish an event to every current subscriber.
    ///
    /// Returns the number of subscribers that will see it.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::NoSubscribers`] if nobody is listening; the event
    /// is dropped.
    pub fn publish(&self, event: impl Into<GuiEvent>) -> Result<usize, EventError> {
        let event = event.into();
        let kind = event.kind();
        let receivers = self
            .sender
            .send(event)
            .map_err(|_| EventError::NoSubscribers)?;
        trace!(?kind, receivers, "published event");
        Ok(receivers)
    }

    /// Subscribe to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> EventSubscriber {
        EventSubscriber {
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new(EventChannelConfig::default())
    }
}

/// Receiving end of the event channel.
#[derive(Debug)]
pub struct EventSubscriber {
    receiver: broadcast::Receiver<GuiEvent>,
}

impl EventSubscriber {
    /// Wait for the next event.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Lagged`] if events were overwritten before this
    /// subscriber read them (the next call resumes at the oldest retained
    /// event), or [`EventError::Closed`] once every publisher is gone.
    pub async fn recv(&mut self) -> Result<GuiEvent, EventError> {
        self.receiver.recv().await.map_err(Self::map_recv_error)
    }

    /// Take the next event if one is ready.
    ///
    /// # Errors
    ///
    /// Same as [`recv`](Self::recv).
    pub fn try_recv(&mut self) -> Result<Option<GuiEvent>, EventError> {
        match self.receiver.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(broadcast::error::TryRecvError::Empty) => Ok(None),
            Err(broadcast::error::TryRecvError::Lagged(n)) => {
                warn!(skipped = n, "event subscriber lagged");
                Err(EventError::Lagged(n))
            }
            Err(broadcast::error::TryRecvError::Closed) => Err(EventError::Closed),
        }
    }

    fn map_recv_error(err: broadcast::error::RecvError) -> EventError {
        match err {
            broadcast::error::RecvError::Lagged(n) => {
                warn!(skipped = n, "event subscriber lagged");
                EventError::Lagged(n)
            }
            broadcast::error::RecvError::Closed => EventError::Closed,
        }
    }
}
