//! Herald bot entry point
//!
//! Wires configuration, the activity log, the keep-alive endpoint, and
//! the gateway client together, then hands control to the gateway.

use std::sync::Arc;

use anyhow::Context as _;
use serenity::prelude::*;
use tracing::error;
use tracing_subscriber::EnvFilter;

use herald::domain::LogKind;
use herald::services::LogStore;

mod adapters;
mod commands;
mod config;
mod gateway;
mod keepalive;

use config::BotConfig;
use gateway::{Handler, ShardManagerContainer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Missing token is startup-fatal: bail with a non-zero exit.
    let config = BotConfig::from_env()?;
    let logs = Arc::new(LogStore::new());

    let port = config.port;
    tokio::spawn(async move {
        if let Err(err) = keepalive::serve(port).await {
            error!(error = %err, "Keep-alive server terminated");
        }
    });

    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS | GatewayIntents::GUILD_MESSAGES;
    let mut client = Client::builder(&config.token, intents)
        .event_handler(Handler::new(logs.clone()))
        .await
        .context("failed to build gateway client")?;

    {
        let mut data = client.data.write().await;
        data.insert::<ShardManagerContainer>(client.shard_manager.clone());
    }

    if let Err(err) = client.start().await {
        logs.append(LogKind::Error, format!("Client error: {err}"));
        return Err(err.into());
    }

    Ok(())
}
