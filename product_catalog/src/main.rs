use anyhow::{Context, Result};
use product_catalog::cfg::Config;
use product_catalog::logging;
use product_catalog::server::Server;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::oneshot;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().context("Invalid CATALOG_* configuration")?;
    logging::init(&config.log_level);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to the catalog database")?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received");
            let _ = shutdown_tx.send(());
        }
    });

    Server::new(pool).start(&config.addr(), shutdown_rx).await
}
