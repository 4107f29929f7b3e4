use crate::domain::{ChatId, MessageId, MessageRef, Reaction};

/// Classified inbound event.
///
/// Produced exactly once at the classifier boundary in the adapter crate;
/// the relay engine never inspects raw platform updates. Anything that does
/// not fit one of these variants (group chatter without a reply target,
/// bot-authored messages, unknown commands) never reaches the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayEvent {
    /// A private message from an end user, to be forwarded into the group.
    UserDirectMessage { origin: MessageRef },

    /// A message in the admin group replying to `reply_target`.
    GroupReply {
        reply_target: MessageId,
        message_id: MessageId,
    },

    /// The reaction set on a group message changed. `reactions` is the full
    /// new set, so an empty vec mirrors as "reactions cleared".
    ReactionUpdate {
        message_id: MessageId,
        reactions: Vec<Reaction>,
    },

    /// `/start` or `/help` from an end user.
    Command { chat_id: ChatId, kind: CommandKind },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    Start,
    Help,
}
