//! Per-command handler implementations
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Remote-control commands (list, play, search, sounds, status, tracks)
//!   under a configurable prefix
//! - 1.1.0: Shared deferred-response flow and classified failure replies
//! - 1.0.0: Status command

pub mod list;
pub mod play;
pub mod search;
pub mod sounds;
pub mod status;
pub mod tracks;

use anyhow::Result;
use log::{debug, error};
use std::future::Future;
use std::sync::Arc;

use super::handler::{CommandKind, SlashCommandHandler};
use super::interaction::InteractionContext;
use super::registry::CommandRegistry;
use crate::core::italic;
use crate::kenku::models::Titled;
use crate::kenku::{ClassifiedFailure, FailureKind};

/// Create the handler for one command kind
pub fn create_handler(kind: CommandKind, prefix: &str) -> Arc<dyn SlashCommandHandler> {
    match kind {
        CommandKind::List => Arc::new(list::ListHandler::new(prefix)),
        CommandKind::Play => Arc::new(play::PlayHandler::new(prefix)),
        CommandKind::Search => Arc::new(search::SearchHandler::new(prefix)),
        CommandKind::Sounds => Arc::new(sounds::SoundsHandler::new(prefix)),
        CommandKind::Status => Arc::new(status::StatusHandler::new(prefix)),
        CommandKind::Tracks => Arc::new(tracks::TracksHandler::new(prefix)),
    }
}

/// Create all command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers(prefix: &str) -> Vec<Arc<dyn SlashCommandHandler>> {
    CommandKind::ALL
        .iter()
        .map(|kind| create_handler(*kind, prefix))
        .collect()
}

/// Registry with every command registered under `prefix`
pub fn build_registry(prefix: &str) -> Result<CommandRegistry> {
    let mut registry = CommandRegistry::new();
    for handler in create_all_handlers(prefix) {
        registry.register(handler)?;
    }
    Ok(registry)
}

/// Defer, run the remote work, then edit the deferred reply with its outcome
///
/// `work` is not polled before the deferral went out, so no remote call can
/// happen ahead of it. Classified failures become a user-facing message;
/// platform errors propagate to the dispatcher.
pub async fn respond_deferred<F>(interaction: &InteractionContext, work: F) -> Result<()>
where
    F: Future<Output = Result<String, ClassifiedFailure>> + Send,
{
    interaction.defer().await?;

    let content = match work.await {
        Ok(content) => content,
        Err(failure) => {
            error!(
                "[{}] /{} remote call failed ({}): {failure}",
                interaction.request_id(),
                interaction.command_name(),
                failure.kind()
            );
            failure_reply(&failure)
        }
    };

    debug!(
        "[{}] /{} reply: {content}",
        interaction.request_id(),
        interaction.command_name()
    );
    interaction.edit_reply(&content).await
}

/// User-facing message for a classified remote failure
pub fn failure_reply(failure: &ClassifiedFailure) -> String {
    match failure.kind() {
        FailureKind::NetworkUnavailable => {
            "Warning: KenkuFM remote-control API is unavailable, see KenkuChat logs!".to_string()
        }
        FailureKind::Timeout => {
            "Warning: KenkuFM remote-control API did not answer in time, see KenkuChat logs!"
                .to_string()
        }
        FailureKind::HttpError { status, .. } => format!(
            "Error: KenkuFM remote-control API answered with HTTP {status}, see KenkuChat logs!"
        ),
        FailureKind::GenericError | FailureKind::Unknown => {
            "Error: Caught an unknown exception, see KenkuChat logs!".to_string()
        }
    }
}

/// Reply for a title that matched nothing
pub(crate) fn not_found(what: &str, title: &str) -> String {
    format!(
        "Warning: Could not find any {what} matching {}",
        italic(title)
    )
}

/// One bullet per entry: italic title followed by the id
pub(crate) fn bullet_list<'a, T: Titled + 'a>(items: impl IntoIterator<Item = &'a T>) -> String {
    items
        .into_iter()
        .map(|item| format!("- {} `{}`", italic(item.title()), item.id()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::interaction::CommandInvocation;
    use crate::commands::testing::{interaction, Recorded};
    use std::sync::atomic::{AtomicBool, Ordering};

    fn failure(kind: FailureKind) -> ClassifiedFailure {
        ClassifiedFailure {
            kind,
            message: "test".to_string(),
            cause: None,
        }
    }

    #[test]
    fn test_registry_contains_every_command() {
        let registry = build_registry("kfm").unwrap();
        assert_eq!(
            registry.identifiers(),
            vec![
                "kfm-list",
                "kfm-play",
                "kfm-search",
                "kfm-sounds",
                "kfm-status",
                "kfm-tracks"
            ]
        );
    }

    #[test]
    fn test_prefix_is_applied() {
        let registry = build_registry("dnd").unwrap();
        assert!(registry.contains("dnd-status"));
        assert!(!registry.contains("kfm-status"));
    }

    #[test]
    fn test_failure_replies_by_kind() {
        let unavailable = failure_reply(&failure(FailureKind::NetworkUnavailable));
        let timeout = failure_reply(&failure(FailureKind::Timeout));
        assert!(unavailable.starts_with("Warning:"));
        assert!(timeout.starts_with("Warning:"));
        assert_ne!(unavailable, timeout);

        let http = failure_reply(&failure(FailureKind::HttpError {
            status: 503,
            body: None,
        }));
        assert!(http.starts_with("Error:"));
        assert!(http.contains("503"));

        assert_eq!(
            failure_reply(&failure(FailureKind::GenericError)),
            failure_reply(&failure(FailureKind::Unknown))
        );
    }

    #[tokio::test]
    async fn test_respond_deferred_edits_with_outcome() {
        let (ctx, responder) = interaction(CommandInvocation::new("kfm-status"));

        respond_deferred(&ctx, async { Ok::<_, ClassifiedFailure>("all quiet".to_string()) })
            .await
            .unwrap();

        assert_eq!(
            responder.calls(),
            vec![Recorded::Defer, Recorded::EditReply("all quiet".to_string())]
        );
    }

    #[tokio::test]
    async fn test_respond_deferred_defers_before_work_runs() {
        let (ctx, responder) = interaction(CommandInvocation::new("kfm-status"));
        let observer = responder.clone();

        respond_deferred(&ctx, async move {
            // Only the deferral may have gone out at this point
            assert_eq!(observer.calls(), vec![Recorded::Defer]);
            Err::<String, _>(failure(FailureKind::Timeout))
        })
        .await
        .unwrap();

        assert_eq!(
            responder.final_reply(),
            Some(failure_reply(&failure(FailureKind::Timeout)))
        );
    }

    #[tokio::test]
    async fn test_failed_defer_skips_work() {
        let (ctx, responder) = interaction(CommandInvocation::new("kfm-status"));
        responder.fail_next_call();

        let ran = AtomicBool::new(false);

        let result = respond_deferred(&ctx, async {
            ran.store(true, Ordering::SeqCst);
            Ok::<_, ClassifiedFailure>("unreachable".to_string())
        })
        .await;

        assert!(result.is_err());
        assert!(!ran.load(Ordering::SeqCst));
        assert!(responder.calls().is_empty());
    }
}
