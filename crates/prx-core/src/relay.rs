use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    domain::{ChatId, MessageId, MessageRef, Reaction},
    events::{CommandKind, RelayEvent},
    ports::DeliverySink,
    store::ForwardStore,
    Result,
};

/// What the engine decided to do with one inbound event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// User message forwarded into the group; the ref is the group-side copy.
    Forwarded(MessageRef),
    /// Admin reply copied into the originating private chat.
    Copied(MessageRef),
    /// Reaction mirrored onto the original private message.
    ReactionMirrored,
    /// Command; the adapter owns the reply text.
    CannedReply(CommandKind),
    /// Not a bridged message; nothing to do.
    Ignored,
}

/// The relay decision logic.
///
/// Stateless apart from the injected correlation store; invoked once per
/// classified event and issues at most one sink call. Sink failures propagate
/// to the caller unretried, and the store is only written after a successful
/// forward, so a failed delivery never leaves a record behind.
pub struct RelayEngine {
    store: ForwardStore,
    sink: Arc<dyn DeliverySink>,
    group_chat: ChatId,
}

impl RelayEngine {
    pub fn new(store: ForwardStore, sink: Arc<dyn DeliverySink>, group_chat: ChatId) -> Self {
        Self {
            store,
            sink,
            group_chat,
        }
    }

    pub async fn handle(&self, event: RelayEvent) -> Result<Outcome> {
        match event {
            RelayEvent::UserDirectMessage { origin } => self.forward_user_message(origin).await,
            RelayEvent::GroupReply {
                reply_target,
                message_id,
            } => self.copy_reply(reply_target, message_id).await,
            RelayEvent::ReactionUpdate {
                message_id,
                reactions,
            } => self.mirror_reaction(message_id, &reactions).await,
            RelayEvent::Command { kind, .. } => Ok(Outcome::CannedReply(kind)),
        }
    }

    async fn forward_user_message(&self, origin: MessageRef) -> Result<Outcome> {
        let group_message_id = self.sink.forward(self.group_chat, origin).await?;

        // The mapping exists only for messages that actually reached the
        // group. If this insert fails the forward is not compensated; the
        // group copy then behaves like any unbridged message.
        self.store
            .insert(group_message_id, origin.chat_id, origin.message_id)
            .await?;

        info!(
            user_chat = origin.chat_id.0,
            group_message = group_message_id.0,
            "forwarded user message into group"
        );
        Ok(Outcome::Forwarded(MessageRef {
            chat_id: self.group_chat,
            message_id: group_message_id,
        }))
    }

    async fn copy_reply(
        &self,
        reply_target: MessageId,
        message_id: MessageId,
    ) -> Result<Outcome> {
        let Some(record) = self.store.lookup(reply_target).await? else {
            debug!(group_message = reply_target.0, "reply target not bridged");
            return Ok(Outcome::Ignored);
        };

        let copied = self
            .sink
            .copy(
                record.user_chat_id,
                MessageRef {
                    chat_id: self.group_chat,
                    message_id,
                },
            )
            .await?;

        info!(
            user_chat = record.user_chat_id.0,
            group_message = reply_target.0,
            "copied admin reply to user"
        );
        Ok(Outcome::Copied(MessageRef {
            chat_id: record.user_chat_id,
            message_id: copied,
        }))
    }

    async fn mirror_reaction(
        &self,
        message_id: MessageId,
        reactions: &[Reaction],
    ) -> Result<Outcome> {
        let Some(record) = self.store.lookup(message_id).await? else {
            debug!(group_message = message_id.0, "reaction target not bridged");
            return Ok(Outcome::Ignored);
        };

        self.sink
            .set_reaction(record.user_chat_id, record.origin_message_id, reactions)
            .await?;

        info!(
            user_chat = record.user_chat_id.0,
            origin_message = record.origin_message_id.0,
            "mirrored reaction onto origin message"
        );
        Ok(Outcome::ReactionMirrored)
    }
}
