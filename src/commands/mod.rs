//! # Command System
//!
//! Slash command (/) handling for Discord interactions.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Interaction lifecycle tracking and dispatcher with failure fallback
//! - 1.1.0: Configurable command prefix
//! - 1.0.0: Handler trait, context and registry for the status command

pub mod context;
pub mod dispatcher;
pub mod handler;
pub mod handlers;
pub mod interaction;
pub mod registry;
pub mod slash;

#[cfg(test)]
mod testing;

// Re-export handler infrastructure
pub use context::CommandContext;
pub use dispatcher::{DispatchState, Dispatcher};
pub use handler::{CommandKind, SlashCommandHandler};
pub use handlers::{build_registry, create_all_handlers};
pub use interaction::{CommandInvocation, InteractionContext, InteractionResponder, ResponseState};
pub use registry::{CommandDescriptor, CommandRegistry};

// Re-export commonly used items from submodules
pub use slash::{create_slash_commands, register_global_commands, register_guild_commands};
