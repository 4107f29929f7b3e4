//! Telegram adapter (teloxide).
//!
//! Implements the `prx-core` DeliverySink over the Telegram Bot API and hosts
//! the update classifier and the dispatcher.

use async_trait::async_trait;

use teloxide::{prelude::*, types::ReactionType};

use tokio::time::sleep;

pub mod classify;
pub mod handlers;
pub mod router;

use prx_core::{
    domain::{ChatId, MessageId, MessageRef, Reaction},
    errors::Error,
    ports::DeliverySink,
    Result,
};

#[derive(Clone)]
pub struct TelegramSink {
    bot: Bot,
}

impl TelegramSink {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn tg_msg_id(message_id: MessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(message_id.0)
    }

    fn tg_reactions(reactions: &[Reaction]) -> Vec<ReactionType> {
        reactions
            .iter()
            .map(|r| match r {
                Reaction::Emoji(emoji) => ReactionType::Emoji {
                    emoji: emoji.clone(),
                },
                Reaction::CustomEmoji(id) => ReactionType::CustomEmoji {
                    custom_emoji_id: id.clone(),
                },
            })
            .collect()
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::Delivery(format!("telegram error: {e}"))
    }

    /// Single retry on flood-wait (`RetryAfter`); every other failure
    /// propagates so the relay core can report it unmodified.
    async fn with_retry<T, Fut>(&self, mut op: impl FnMut() -> Fut) -> Result<T>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, teloxide::RequestError>>,
        Fut::IntoFuture: Send,
    {
        const MAX_RETRIES: usize = 1;
        let mut attempts = 0usize;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) => match e {
                    teloxide::RequestError::RetryAfter(d) if attempts < MAX_RETRIES => {
                        attempts += 1;
                        sleep(d.duration()).await;
                        continue;
                    }
                    other => return Err(Self::map_err(other)),
                },
            }
        }
    }
}

#[async_trait]
impl DeliverySink for TelegramSink {
    async fn forward(&self, dest: ChatId, src: MessageRef) -> Result<MessageId> {
        let msg = self
            .with_retry(|| {
                self.bot.forward_message(
                    Self::tg_chat(dest),
                    Self::tg_chat(src.chat_id),
                    Self::tg_msg_id(src.message_id),
                )
            })
            .await?;
        Ok(MessageId(msg.id.0))
    }

    async fn copy(&self, dest: ChatId, src: MessageRef) -> Result<MessageId> {
        let id = self
            .with_retry(|| {
                self.bot.copy_message(
                    Self::tg_chat(dest),
                    Self::tg_chat(src.chat_id),
                    Self::tg_msg_id(src.message_id),
                )
            })
            .await?;
        Ok(MessageId(id.0))
    }

    async fn set_reaction(
        &self,
        dest: ChatId,
        message_id: MessageId,
        reactions: &[Reaction],
    ) -> Result<()> {
        let tg = Self::tg_reactions(reactions);
        self.with_retry(|| {
            self.bot
                .set_message_reaction(Self::tg_chat(dest), Self::tg_msg_id(message_id))
                .reaction(tg.clone())
        })
        .await?;
        Ok(())
    }
}
