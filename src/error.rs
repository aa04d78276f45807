use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueueError>;

/// What an allocation was needed for when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocation {
    Node,
    StringCopy,
}

impl std::fmt::Display for Allocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Allocation::Node => write!(f, "node"),
            Allocation::StringCopy => write!(f, "string copy"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("could not allocate {what}")]
    AllocationFailure { what: Allocation },

    #[error("operation on a queue that does not exist")]
    InvalidHandle,

    #[error("queue is empty")]
    EmptyQueue,

    #[error("output buffer has zero capacity")]
    ZeroCapacity,

    #[error("configuration error: {0}")]
    Config(String),
}

impl QueueError {
    pub(crate) fn alloc(what: Allocation) -> Self {
        QueueError::AllocationFailure { what }
    }
}

impl From<serde_json::Error> for QueueError {
    fn from(err: serde_json::Error) -> Self {
        QueueError::Config(err.to_string())
    }
}
