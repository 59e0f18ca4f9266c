//! Slash command definitions
//!
//! Declarative descriptions of the three commands, registered globally
//! once the gateway connection is ready.

use herald::services::router::{DM_ROLE, LOGS, STATUS};
use serenity::builder::{CreateCommand, CreateCommandOption};
use serenity::model::application::CommandOptionType;

pub fn definitions() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new(DM_ROLE)
            .description("Send a DM to all users with a specific role")
            .add_option(
                CreateCommandOption::new(CommandOptionType::Role, "role", "The role to send DM to")
                    .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "message",
                    "The message to send",
                )
                .required(true),
            ),
        CreateCommand::new(STATUS).description("Check the bot status"),
        CreateCommand::new(LOGS)
            .description("Check the bot logs")
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "filter", "Filter logs by type")
                    .required(false)
                    .add_string_choice("All", "all")
                    .add_string_choice("Success", "success")
                    .add_string_choice("Error", "error")
                    .add_string_choice("Info", "info"),
            ),
    ]
}
