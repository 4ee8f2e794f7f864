//! Command handler registry
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Reject duplicate identifiers, expose command descriptors for registration
//! - 1.0.0: Initial implementation for handler dispatch

use anyhow::{bail, Result};
use serenity::builder::CreateApplicationCommand;
use std::collections::HashMap;
use std::sync::Arc;

use super::handler::SlashCommandHandler;

/// A command as announced to Discord
#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    pub identifier: String,
    pub builder: CreateApplicationCommand,
}

/// Registry mapping command identifiers to handlers
///
/// Built once during startup, then shared read-only. Each identifier maps to
/// exactly one handler; registering a second handler under the same identifier
/// is an error rather than a silent replacement.
///
/// # Example
///
/// ```ignore
/// let mut registry = CommandRegistry::new();
/// registry.register(Arc::new(StatusHandler::new("kfm")))?;
///
/// if let Some(handler) = registry.resolve("kfm-status") {
///     handler.handle(ctx, &interaction).await?;
/// }
/// ```
#[derive(Clone, Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, Arc<dyn SlashCommandHandler>>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its identifier
    pub fn register(&mut self, handler: Arc<dyn SlashCommandHandler>) -> Result<()> {
        let identifier = handler.identifier().to_string();
        if self.handlers.contains_key(&identifier) {
            bail!("Duplicate command identifier: {identifier}");
        }
        self.handlers.insert(identifier, handler);
        Ok(())
    }

    /// Get the handler for a command identifier
    ///
    /// Returns None if no handler is registered for the given name.
    pub fn resolve(&self, identifier: &str) -> Option<Arc<dyn SlashCommandHandler>> {
        self.handlers.get(identifier).cloned()
    }

    /// Check if a command is registered
    pub fn contains(&self, identifier: &str) -> bool {
        self.handlers.contains_key(identifier)
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered identifiers, sorted
    pub fn identifiers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Descriptors of all commands, sorted by identifier
    pub fn descriptors(&self) -> Vec<CommandDescriptor> {
        self.identifiers()
            .into_iter()
            .filter_map(|name| {
                self.handlers.get(name).map(|handler| CommandDescriptor {
                    identifier: name.to_string(),
                    builder: handler.create_command(),
                })
            })
            .collect()
    }
}
