/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Telegram message id (numeric, unique per chat).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// One row of the `forwards` correlation table.
///
/// `group_message_id` is the id the platform assigned when the user's message
/// was forwarded into the admin group; it is the sole join key between the
/// group side and the private side of a bridged message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForwardRecord {
    pub group_message_id: MessageId,
    pub user_chat_id: ChatId,
    pub origin_message_id: MessageId,
}

/// A reaction as it crosses the bridge.
///
/// Anything the platform reports that is neither a plain emoji nor a custom
/// emoji is dropped at the classifier boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reaction {
    Emoji(String),
    CustomEmoji(String),
}
