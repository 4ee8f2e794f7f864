//! Interaction dispatcher
//!
//! Routes one inbound interaction to its handler and contains handler faults:
//! a failing handler yields exactly one generic failure message.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use log::{debug, error, info, warn};
use std::fmt;
use std::sync::Arc;

use super::context::CommandContext;
use super::interaction::{InteractionContext, ResponseState};
use super::registry::CommandRegistry;

/// Lifecycle of one dispatch
///
/// `Received -> Resolved | Unresolved`, then `Resolved -> Executing -> Completed | Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Received,
    Resolved,
    Unresolved,
    Executing,
    Completed,
    Failed,
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DispatchState::Received => "received",
            DispatchState::Resolved => "resolved",
            DispatchState::Unresolved => "unresolved",
            DispatchState::Executing => "executing",
            DispatchState::Completed => "completed",
            DispatchState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Generic message sent when a handler fails
pub fn fallback_message(command: &str) -> String {
    format!("Error: There was an exception when executing command {command}, see KenkuChat logs!")
}

/// Looks up handlers by command name and runs them
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    context: Arc<CommandContext>,
}

impl Dispatcher {
    pub fn new(registry: Arc<CommandRegistry>, context: Arc<CommandContext>) -> Self {
        Self { registry, context }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Dispatch one interaction and return its terminal state
    ///
    /// Never returns an error: handler faults are logged and answered with
    /// [`fallback_message`], and a failure to deliver that message is only logged.
    pub async fn dispatch(&self, interaction: &InteractionContext) -> DispatchState {
        let request_id = interaction.request_id();
        let command = interaction.command_name();
        let mut state = DispatchState::Received;
        debug!("[{request_id}] Dispatch /{command} {state}");

        let Some(handler) = self.registry.resolve(command) else {
            state = self.advance(interaction, state, DispatchState::Unresolved);
            warn!("[{request_id}] No handler registered for /{command}, ignoring interaction");
            return state;
        };
        state = self.advance(interaction, state, DispatchState::Resolved);

        info!(
            "[{request_id}] Executing /{command} for user {}",
            interaction.invocation().user
        );
        state = self.advance(interaction, state, DispatchState::Executing);

        match handler.handle(self.context.clone(), interaction).await {
            Ok(()) => self.advance(interaction, state, DispatchState::Completed),
            Err(e) => {
                error!("[{request_id}] Command /{command} failed: {e:#}");
                self.send_fallback(interaction).await;
                self.advance(interaction, state, DispatchState::Failed)
            }
        }
    }

    fn advance(
        &self,
        interaction: &InteractionContext,
        from: DispatchState,
        to: DispatchState,
    ) -> DispatchState {
        debug!(
            "[{}] Dispatch /{} {from} -> {to}",
            interaction.request_id(),
            interaction.command_name()
        );
        to
    }

    /// Reply if nothing was sent yet, otherwise follow up
    async fn send_fallback(&self, interaction: &InteractionContext) {
        let message = fallback_message(interaction.command_name());
        let result = match interaction.state().await {
            ResponseState::Pending => interaction.reply(&message, true).await,
            ResponseState::Deferred | ResponseState::Replied => {
                interaction.follow_up(&message, true).await
            }
        };

        if let Err(e) = result {
            error!(
                "[{}] Failed to send failure message for /{}: {e:#}",
                interaction.request_id(),
                interaction.command_name()
            );
        }
    }
}
