use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    /// Pop from a queue with no entries.  The main loop treats this as clean
    /// termination, not a failure.
    #[error("queue is empty")]
    Empty,

    /// An exact-time or identity removal found no matching entry.
    #[error("no queue entry matches {0}")]
    NotFound(String),
}

pub type QueueResult<T> = Result<T, QueueError>;
