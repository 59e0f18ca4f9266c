//! Serenity implementations of the domain ports
//!
//! Direct-message delivery, fresh role-membership lookup, and the
//! interaction reply channel, all over the gateway's HTTP client.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::builder::{
    CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse,
};
use serenity::http::Http;
use serenity::model::application::CommandInteraction;
use serenity::model::id::{GuildId, RoleId, UserId};
use tracing::debug;

use herald::domain::{DomainError, Recipient};
use herald::ports::{DirectMessenger, ReplyTransport, RoleDirectory};

/// Gateway page size for member listing
const MEMBER_PAGE_SIZE: u64 = 1000;

fn parse_snowflake(value: &str, what: &str) -> Result<u64, DomainError> {
    value
        .parse()
        .map_err(|_| DomainError::Validation(format!("invalid {what} id: {value}")))
}

/// Delivers direct messages through the user's DM channel
pub struct DiscordMessenger {
    http: Arc<Http>,
}

impl DiscordMessenger {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl DirectMessenger for DiscordMessenger {
    async fn send_direct(&self, recipient: &Recipient, body: &str) -> Result<(), DomainError> {
        let user = UserId::new(parse_snowflake(&recipient.id, "user")?);
        debug!(user_id = %user, "Sending direct message");

        let channel = user
            .create_dm_channel(&self.http)
            .await
            .map_err(|err| DomainError::Delivery(err.to_string()))?;
        channel
            .id
            .say(&self.http, body)
            .await
            .map_err(|err| DomainError::Delivery(err.to_string()))?;

        Ok(())
    }
}

/// Fetches current role membership, page by page, never from a cache
pub struct GuildDirectory {
    http: Arc<Http>,
}

impl GuildDirectory {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl RoleDirectory for GuildDirectory {
    async fn members_with_role(
        &self,
        guild_id: &str,
        role_id: &str,
    ) -> Result<Vec<Recipient>, DomainError> {
        let guild = GuildId::new(parse_snowflake(guild_id, "guild")?);
        let role = RoleId::new(parse_snowflake(role_id, "role")?);

        let mut recipients = Vec::new();
        let mut after: Option<UserId> = None;

        loop {
            let page = guild
                .members(&self.http, Some(MEMBER_PAGE_SIZE), after)
                .await
                .map_err(|err| {
                    DomainError::ExternalService(format!("member fetch failed: {err}"))
                })?;
            let Some(last) = page.last() else {
                break;
            };
            after = Some(last.user.id);

            let full_page = page.len() as u64 == MEMBER_PAGE_SIZE;
            for member in page {
                if member.roles.contains(&role) {
                    recipients.push(Recipient::new(member.user.id.to_string(), member.user.tag()));
                }
            }
            if !full_page {
                break;
            }
        }

        debug!(
            guild_id = %guild,
            role_id = %role,
            count = recipients.len(),
            "Resolved role membership"
        );
        Ok(recipients)
    }
}

/// Reply channel of one command interaction
///
/// Initial and placeholder responses are ephemeral, matching the
/// operator-only nature of all three commands.
pub struct InteractionReply {
    http: Arc<Http>,
    interaction: CommandInteraction,
}

impl InteractionReply {
    pub fn new(http: Arc<Http>, interaction: CommandInteraction) -> Self {
        Self { http, interaction }
    }
}

fn gateway_error(err: serenity::Error) -> DomainError {
    DomainError::Gateway(err.to_string())
}

#[async_trait]
impl ReplyTransport for InteractionReply {
    async fn defer(&self) -> Result<(), DomainError> {
        let response =
            CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new().ephemeral(true));
        self.interaction
            .create_response(&self.http, response)
            .await
            .map_err(gateway_error)
    }

    async fn send_initial(&self, content: &str) -> Result<(), DomainError> {
        let message = CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true);
        self.interaction
            .create_response(&self.http, CreateInteractionResponse::Message(message))
            .await
            .map_err(gateway_error)
    }

    async fn edit(&self, content: &str) -> Result<(), DomainError> {
        self.interaction
            .edit_response(&self.http, EditInteractionResponse::new().content(content))
            .await
            .map(|_| ())
            .map_err(gateway_error)
    }
}
