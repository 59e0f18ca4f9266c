//! Gateway event handling
//!
//! Bridges serenity's event stream into the domain: the ready event
//! records the start instant and registers the slash commands; command
//! interactions are translated into `Invocation`s and handed to the
//! router together with port adapters built around the gateway's HTTP
//! client.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serenity::async_trait;
use serenity::gateway::ShardManager;
use serenity::model::application::{Command, CommandInteraction, Interaction, ResolvedValue};
use serenity::model::gateway::Ready;
use serenity::prelude::*;

use herald::domain::{Invocation, LogKind, RoleRef, StatusSnapshot};
use herald::ports::Reply;
use herald::services::{BulkDmDispatcher, CommandRouter, LogStore};

use crate::adapters::{DiscordMessenger, GuildDirectory, InteractionReply};
use crate::commands;

/// Shard manager handle, stored in the client data map so the status
/// handler can read gateway latency.
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<ShardManager>;
}

pub struct Handler {
    logs: Arc<LogStore>,
    started_at: RwLock<Option<DateTime<Utc>>>,
}

impl Handler {
    pub fn new(logs: Arc<LogStore>) -> Self {
        Self {
            logs,
            started_at: RwLock::new(None),
        }
    }

    fn started_at(&self) -> Option<DateTime<Utc>> {
        *self.started_at.read().expect("start instant lock poisoned")
    }

    async fn status_snapshot(
        &self,
        ctx: &Context,
        interaction: &CommandInteraction,
    ) -> StatusSnapshot {
        let server_label = match interaction.guild_id {
            Some(guild_id) => ctx
                .http
                .get_guild(guild_id)
                .await
                .map(|guild| guild.name)
                .unwrap_or_else(|_| guild_id.to_string()),
            None => "direct message".to_string(),
        };

        StatusSnapshot {
            started_at: self.started_at(),
            server_label,
            latency_ms: gateway_latency(ctx).await,
        }
    }

    async fn build_invocation(
        &self,
        ctx: &Context,
        interaction: &CommandInteraction,
    ) -> Invocation {
        let mut invocation =
            Invocation::new(interaction.data.name.clone(), interaction.user.tag());

        if let Some(guild_id) = interaction.guild_id {
            invocation = invocation.with_guild(guild_id.to_string());
        }

        for option in interaction.data.options() {
            match (option.name, option.value) {
                ("role", ResolvedValue::Role(role)) => {
                    invocation =
                        invocation.with_role(RoleRef::new(role.id.to_string(), role.name.clone()));
                }
                ("message", ResolvedValue::String(message)) => {
                    invocation = invocation.with_message(message);
                }
                ("filter", ResolvedValue::String(filter)) => {
                    invocation = invocation.with_filter(filter);
                }
                _ => {}
            }
        }

        // Only the status handler reads the snapshot; skip the guild
        // lookup for everything else.
        if invocation.command == herald::services::router::STATUS {
            invocation = invocation.with_status(self.status_snapshot(ctx, interaction).await);
        }

        invocation
    }
}

/// Current latency of this shard's heartbeat, once one has been measured
async fn gateway_latency(ctx: &Context) -> Option<u64> {
    let shard_manager = {
        let data = ctx.data.read().await;
        data.get::<ShardManagerContainer>()?.clone()
    };
    let runners = shard_manager.runners.lock().await;
    let info = runners.get(&ctx.shard_id)?;
    info.latency.map(|latency| latency.as_millis() as u64)
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        *self
            .started_at
            .write()
            .expect("start instant lock poisoned") = Some(Utc::now());
        self.logs
            .append(LogKind::Info, format!("Logged in as {}", ready.user.tag()));

        match Command::set_global_commands(&ctx.http, commands::definitions()).await {
            Ok(_) => self
                .logs
                .append(LogKind::Info, "Slash commands registered successfully"),
            Err(err) => self.logs.append(
                LogKind::Error,
                format!("Failed to register slash commands: {err}"),
            ),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(interaction) = interaction else {
            return;
        };

        let invocation = self.build_invocation(&ctx, &interaction).await;

        let directory = GuildDirectory::new(ctx.http.clone());
        let dispatcher = BulkDmDispatcher::new(
            DiscordMessenger::new(ctx.http.clone()),
            self.logs.clone(),
        );
        let router = CommandRouter::new(self.logs.clone(), directory, dispatcher);
        let mut reply = Reply::new(InteractionReply::new(ctx.http.clone(), interaction));

        router.route(invocation, &mut reply).await;
    }
}
