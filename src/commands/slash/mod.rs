//! # Slash Commands (/)
//!
//! Discord native slash command definitions and their registration.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Definitions come from the handler registry; shared option builders
//! - 1.1.0: Guild-scoped registration when a guild id is configured
//! - 1.0.0: Global registration of the status command

use anyhow::Result;
use log::info;
use serenity::builder::{CreateApplicationCommand, CreateApplicationCommandOption};
use serenity::model::application::command::{Command, CommandOptionType};
use serenity::model::id::GuildId;
use serenity::prelude::Context;

use super::registry::CommandRegistry;

/// Name of the title option shared by most commands
pub const TITLE_OPTION: &str = "title";

/// All slash command definitions of the registry, sorted by name
pub fn create_slash_commands(registry: &CommandRegistry) -> Vec<CreateApplicationCommand> {
    registry
        .descriptors()
        .into_iter()
        .map(|descriptor| descriptor.builder)
        .collect()
}

/// Registers all slash commands globally
pub async fn register_global_commands(ctx: &Context, registry: &CommandRegistry) -> Result<()> {
    let slash_commands = create_slash_commands(registry);
    let count = slash_commands.len();

    Command::set_global_application_commands(&ctx.http, |commands| {
        for command in slash_commands {
            commands.add_application_command(command);
        }
        commands
    })
    .await?;

    info!("Global slash commands registered successfully ({count} commands)");
    Ok(())
}

/// Registers all slash commands for a specific guild (faster for testing)
pub async fn register_guild_commands(
    ctx: &Context,
    guild_id: GuildId,
    registry: &CommandRegistry,
) -> Result<()> {
    let slash_commands = create_slash_commands(registry);
    let count = slash_commands.len();

    guild_id
        .set_application_commands(&ctx.http, |commands| {
            for command in slash_commands {
                commands.add_application_command(command);
            }
            commands
        })
        .await?;

    info!("Guild slash commands registered for guild {guild_id} ({count} commands)");
    Ok(())
}

/// Fill in a `title` string option
pub fn title_option<'a>(
    option: &'a mut CreateApplicationCommandOption,
    description: &str,
    required: bool,
) -> &'a mut CreateApplicationCommandOption {
    option
        .name(TITLE_OPTION)
        .description(description)
        .kind(CommandOptionType::String)
        .required(required)
}

/// Fill in a subcommand without options
pub fn subcommand<'a>(
    option: &'a mut CreateApplicationCommandOption,
    name: &str,
    description: &str,
) -> &'a mut CreateApplicationCommandOption {
    option
        .name(name)
        .description(description)
        .kind(CommandOptionType::SubCommand)
}

/// Fill in a subcommand taking a required `title`
pub fn titled_subcommand<'a>(
    option: &'a mut CreateApplicationCommandOption,
    name: &str,
    description: &str,
    title_description: &str,
) -> &'a mut CreateApplicationCommandOption {
    subcommand(option, name, description)
        .create_sub_option(|title| title_option(title, title_description, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::handlers::build_registry;
    use serde_json::Value;

    fn options(command: &CreateApplicationCommand) -> Vec<Value> {
        command
            .0
            .get("options")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    #[test]
    fn test_create_slash_commands_from_registry() {
        let registry = build_registry("kfm").unwrap();
        let commands = create_slash_commands(&registry);
        assert_eq!(commands.len(), 6);

        for command in &commands {
            let name = command.0.get("name").and_then(Value::as_str).unwrap();
            assert!(name.starts_with("kfm-"));
            assert!(name.len() <= 32);
            let description = command.0.get("description").and_then(Value::as_str).unwrap();
            assert!(!description.is_empty() && description.len() <= 100);
        }
    }

    #[test]
    fn test_titled_subcommand_shape() {
        let command = CreateApplicationCommand::default()
            .name("kfm-sounds")
            .description("sounds")
            .create_option(|o| titled_subcommand(o, "play", "Play a sound", "Sound title"))
            .to_owned();

        let options = options(&command);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0]["name"], "play");
        // Subcommand type = 1, string type = 3
        assert_eq!(options[0]["type"], 1);
        assert_eq!(options[0]["options"][0]["name"], TITLE_OPTION);
        assert_eq!(options[0]["options"][0]["type"], 3);
        assert_eq!(options[0]["options"][0]["required"], true);
    }
}
