//! The item type flowing from producers to the pool.
//!
//! The two control sentinels are variants rather than reserved magic values,
//! so they can never collide with a legitimate payload and need no identity
//! comparison against a process-wide singleton.

/// A produced value or one of the two control sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal<T> {
    /// A real work item, dispatched to the consumer.
    Payload(T),
    /// Nothing to process this cycle. Skipped by the dispatch loop without
    /// consuming a worker slot.
    Empty,
    /// The stream is permanently exhausted. The pool stops the producer and
    /// exits its dispatch loop; in-flight work finishes naturally.
    EndOfStream,
}

impl<T> Signal<T> {
    /// Whether this signal terminates the stream.
    #[must_use]
    pub const fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }

    /// The payload, if this signal carries one.
    pub fn into_payload(self) -> Option<T> {
        match self {
            Self::Payload(item) => Some(item),
            Self::Empty | Self::EndOfStream => None,
        }
    }
}
