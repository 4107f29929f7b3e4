use std::sync::Arc;

use prx_core::{config::Config, store::ForwardStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    prx_core::logging::init("prx")?;

    let cfg = Arc::new(Config::load()?);

    let store = ForwardStore::open(&cfg.db_path, cfg.db_max_connections).await?;
    store.initialize().await?;

    prx_telegram::router::run_polling(cfg, store).await
}
