use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageId, MessageRef, Reaction},
    Result,
};

/// Outbound delivery port.
///
/// Telegram is the first implementation; the shape is deliberately small so
/// another platform adapter can fit behind it. All three operations may fail
/// (network, permissions, deleted message) and the core performs no retries
/// of its own.
#[async_trait]
pub trait DeliverySink: Send + Sync {
    /// Re-send `src` into `dest`, keeping forwarded-from attribution.
    /// Returns the id of the new message in `dest`.
    async fn forward(&self, dest: ChatId, src: MessageRef) -> Result<MessageId>;

    /// Re-send the content of `src` into `dest` without attribution.
    /// Returns the id of the new message in `dest`.
    async fn copy(&self, dest: ChatId, src: MessageRef) -> Result<MessageId>;

    /// Replace the reaction set on `message_id` in `dest`.
    async fn set_reaction(
        &self,
        dest: ChatId,
        message_id: MessageId,
        reactions: &[Reaction],
    ) -> Result<()>;
}
