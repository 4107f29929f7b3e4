use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use tracing::{info, warn};

use prx_core::{
    config::Config, domain::ChatId, ports::DeliverySink, relay::RelayEngine, store::ForwardStore,
};

use crate::{handlers, TelegramSink};

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RelayEngine>,
    pub group_chat: ChatId,
}

pub async fn run_polling(cfg: Arc<Config>, store: ForwardStore) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.bot_token.clone());

    match bot.get_me().await {
        Ok(me) => info!("prx started: @{}", me.username()),
        Err(e) => warn!("get_me failed (token problem?): {e}"),
    }
    info!("admin group: {}", cfg.group_chat_id.0);

    let sink: Arc<dyn DeliverySink> = Arc::new(TelegramSink::new(bot.clone()));
    let engine = Arc::new(RelayEngine::new(store, sink, cfg.group_chat_id));

    let state = Arc::new(AppState {
        engine,
        group_chat: cfg.group_chat_id,
    });

    // The dispatcher derives its allowed-updates set from these branches, so
    // reaction updates are requested from the Bot API automatically.
    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handlers::handle_message))
        .branch(Update::filter_message_reaction_updated().endpoint(handlers::handle_reaction));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
