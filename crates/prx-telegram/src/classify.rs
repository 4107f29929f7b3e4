//! Update classification boundary.
//!
//! Turns raw teloxide updates into the closed `RelayEvent` enum consumed by
//! the relay engine. All sender filtering happens here: bot-authored and
//! via-bot traffic never reaches the engine, so the bridge cannot feed its
//! own outbound copies back into itself.

use teloxide::types::{Message, MessageReactionUpdated, ReactionType};

use prx_core::{
    domain::{ChatId, MessageId, MessageRef, Reaction},
    events::{CommandKind, RelayEvent},
};

/// Classify a regular message update. `None` means "not an event the relay
/// handles" (ordinary group chatter, bot traffic, unknown commands).
pub fn classify_message(msg: &Message, group_chat: ChatId) -> Option<RelayEvent> {
    let chat_id = ChatId(msg.chat.id.0);

    if chat_id == group_chat {
        // Group traffic only matters when it replies to a (possibly bridged)
        // message; anything else is chatter between admins.
        let reply_target = msg.reply_to_message()?;
        return Some(RelayEvent::GroupReply {
            reply_target: MessageId(reply_target.id.0),
            message_id: MessageId(msg.id.0),
        });
    }

    if !msg.chat.is_private() {
        return None;
    }

    let from = msg.from.as_ref()?;
    if !is_end_user(from.is_bot, msg.via_bot.is_some()) {
        return None;
    }

    if let Some(text) = msg.text() {
        if let Some(kind) = parse_command(text) {
            return Some(RelayEvent::Command { chat_id, kind });
        }
        if is_command_like(text) {
            // Unknown command; not bridged.
            return None;
        }
    }

    Some(RelayEvent::UserDirectMessage {
        origin: MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        },
    })
}

/// Classify a reaction update. Only reactions inside the admin group are
/// relay events; the engine decides whether the target was bridged.
pub fn classify_reaction(update: &MessageReactionUpdated, group_chat: ChatId) -> Option<RelayEvent> {
    if ChatId(update.chat.id.0) != group_chat {
        return None;
    }

    Some(RelayEvent::ReactionUpdate {
        message_id: MessageId(update.message_id.0),
        reactions: update.new_reaction.iter().filter_map(core_reaction).collect(),
    })
}

fn core_reaction(r: &ReactionType) -> Option<Reaction> {
    match r {
        ReactionType::Emoji { emoji } => Some(Reaction::Emoji(emoji.clone())),
        ReactionType::CustomEmoji { custom_emoji_id } => {
            Some(Reaction::CustomEmoji(custom_emoji_id.clone()))
        }
        _ => None,
    }
}

/// Sender filter: only genuine human users get bridged.
fn is_end_user(sender_is_bot: bool, via_bot: bool) -> bool {
    !sender_is_bot && !via_bot
}

fn is_command_like(text: &str) -> bool {
    text.trim_start().starts_with('/')
}

/// Parse `/start` / `/help`, tolerating a `@botname` suffix and trailing
/// arguments (Telegram sends `/cmd@botname arg ...` in some clients).
fn parse_command(text: &str) -> Option<CommandKind> {
    let first = text.trim().split_whitespace().next()?;
    let cmd = first
        .strip_prefix('/')?
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    match cmd.as_str() {
        "start" => Some(CommandKind::Start),
        "help" => Some(CommandKind::Help),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_command("/start"), Some(CommandKind::Start));
        assert_eq!(parse_command("/help"), Some(CommandKind::Help));
        assert_eq!(parse_command("/START@proxybot now"), Some(CommandKind::Start));
        assert_eq!(parse_command("  /help@proxybot"), Some(CommandKind::Help));
    }

    #[test]
    fn rejects_unknown_and_plain_text() {
        assert_eq!(parse_command("/stop"), None);
        assert_eq!(parse_command("hello"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("start"), None);
    }

    #[test]
    fn command_like_detection() {
        assert!(is_command_like("/anything"));
        assert!(is_command_like("  /spaced"));
        assert!(!is_command_like("plain message"));
    }

    #[test]
    fn sender_filter_excludes_bot_traffic() {
        assert!(is_end_user(false, false));
        assert!(!is_end_user(true, false));
        assert!(!is_end_user(false, true));
    }

    #[test]
    fn reaction_mapping_keeps_emoji_kinds() {
        let emoji = ReactionType::Emoji {
            emoji: "👍".to_string(),
        };
        assert_eq!(
            core_reaction(&emoji),
            Some(Reaction::Emoji("👍".to_string()))
        );

        let custom = ReactionType::CustomEmoji {
            custom_emoji_id: "abc123".to_string(),
        };
        assert_eq!(
            core_reaction(&custom),
            Some(Reaction::CustomEmoji("abc123".to_string()))
        );
    }
}
