//! Event channel error types.

/// Errors returned by [`EventChannel`](crate::EventChannel) and
/// [`EventSubscriber`](crate::EventSubscriber).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// An event was published while nobody was subscribed; it is dropped.
    #[error("no subscribers for event")]
    NoSubscribers,

    /// The subscriber fell behind and this many events were overwritten.
    #[error("subscriber lagged behind by {0} events")]
    Lagged(u64),

    /// Every sender is gone and the buffer is drained.
    #[error("event channel closed")]
    Closed,
}
