use crate::domain::MessageId;

/// Core error type.
///
/// The adapter crate maps its platform errors into `Delivery` so the relay
/// core handles failures consistently. A lookup miss is *not* an error: the
/// store returns `Option::None` for it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    /// A second insert for a group message id that already has a record.
    /// Must not happen under correct sequencing; callers should surface it
    /// as a logic error, never swallow it.
    #[error("duplicate forward record for group message {0:?}")]
    DuplicateKey(MessageId),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("delivery error: {0}")]
    Delivery(String),
}

pub type Result<T> = std::result::Result<T, Error>;
