//! Telegram update handlers.
//!
//! Thin glue between the dispatcher and the relay engine: classify the
//! update, hand it to the engine, log the outcome. Canned command replies
//! live here so the core never carries UI-facing text.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{Message, MessageReactionUpdated, ParseMode, User},
    utils::html::escape,
};

use tracing::{error, info};

use prx_core::{events::CommandKind, relay::Outcome};

use crate::{classify, router::AppState};

pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(event) = classify::classify_message(&msg, state.group_chat) else {
        return Ok(());
    };

    match state.engine.handle(event).await {
        Ok(Outcome::CannedReply(kind)) => send_canned_reply(&bot, &msg, kind).await,
        Ok(Outcome::Ignored) => Ok(()),
        Ok(outcome) => {
            info!(?outcome, "relayed message update");
            Ok(())
        }
        Err(e) => {
            error!("relay failed for message {}: {e}", msg.id.0);
            Ok(())
        }
    }
}

pub async fn handle_reaction(
    update: MessageReactionUpdated,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let Some(event) = classify::classify_reaction(&update, state.group_chat) else {
        return Ok(());
    };

    match state.engine.handle(event).await {
        Ok(Outcome::Ignored) => {}
        Ok(outcome) => info!(?outcome, "relayed reaction update"),
        Err(e) => error!("relay failed for reaction on {}: {e}", update.message_id.0),
    }
    Ok(())
}

async fn send_canned_reply(bot: &Bot, msg: &Message, kind: CommandKind) -> ResponseResult<()> {
    match kind {
        CommandKind::Start => {
            let greeting = msg
                .from
                .as_ref()
                .map(mention_html)
                .unwrap_or_else(|| "there".to_string());
            bot.send_message(
                msg.chat.id,
                format!("Hi {greeting}! Messages you send here are relayed to our admins."),
            )
            .parse_mode(ParseMode::Html)
            .await?;
        }
        CommandKind::Help => {
            bot.send_message(
                msg.chat.id,
                "Send any message here and it will be forwarded to the admins. \
                 Their replies (and reactions) come back to you in this chat.",
            )
            .await?;
        }
    }
    Ok(())
}

fn mention_html(user: &User) -> String {
    format!(
        "<a href=\"tg://user?id={}\">{}</a>",
        user.id,
        escape(&user.first_name)
    )
}
