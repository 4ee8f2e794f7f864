//! Slash command handler trait and infrastructure
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: One identifier per handler, handlers describe their own command schema
//! - 1.0.0: Initial implementation for modular command handling

use anyhow::Result;
use async_trait::async_trait;
use serenity::builder::CreateApplicationCommand;
use std::sync::Arc;

use super::context::CommandContext;
use super::interaction::InteractionContext;

/// Trait for slash command handlers
///
/// Each handler serves exactly one command identifier (e.g. `kfm-status`) and is
/// registered with a [`CommandRegistry`](super::CommandRegistry) under it.
///
/// Handlers own the whole response: they defer, talk to the remote-control API and
/// edit the deferred reply, turning remote failures into user-facing messages
/// themselves. An `Err` return is treated as a fault by the dispatcher.
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler {
///     name: String,
/// }
///
/// #[async_trait]
/// impl SlashCommandHandler for PingHandler {
///     fn identifier(&self) -> &str {
///         &self.name
///     }
///
///     fn create_command(&self) -> CreateApplicationCommand {
///         CreateApplicationCommand::default()
///             .name(&self.name)
///             .description("Ping")
///             .to_owned()
///     }
///
///     async fn handle(
///         &self,
///         _ctx: Arc<CommandContext>,
///         interaction: &InteractionContext,
///     ) -> Result<()> {
///         interaction.reply("Pong!", false).await
///     }
/// }
/// ```
#[async_trait]
pub trait SlashCommandHandler: Send + Sync {
    /// Command name this handler processes, unique across the registry
    fn identifier(&self) -> &str;

    /// Slash-command definition pushed to Discord at registration
    fn create_command(&self) -> CreateApplicationCommand;

    /// Handle one invocation of the command
    ///
    /// # Arguments
    ///
    /// * `ctx` - Shared command context with configuration and remote services
    /// * `interaction` - The interaction to answer
    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        interaction: &InteractionContext,
    ) -> Result<()>;
}

/// The closed set of commands this bot serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    List,
    Play,
    Search,
    Sounds,
    Status,
    Tracks,
}

impl CommandKind {
    pub const ALL: [CommandKind; 6] = [
        CommandKind::List,
        CommandKind::Play,
        CommandKind::Search,
        CommandKind::Sounds,
        CommandKind::Status,
        CommandKind::Tracks,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            CommandKind::List => "list",
            CommandKind::Play => "play",
            CommandKind::Search => "search",
            CommandKind::Sounds => "sounds",
            CommandKind::Status => "status",
            CommandKind::Tracks => "tracks",
        }
    }

    /// Full command name for a configured prefix, e.g. `kfm-status`
    pub fn identifier(self, prefix: &str) -> String {
        format!("{prefix}-{}", self.suffix())
    }
}
