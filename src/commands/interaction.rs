//! Interaction lifecycle for one slash-command invocation
//!
//! Discord allows exactly one initial response per interaction: either an immediate
//! reply or a deferral. After that only edits of the original response and follow-up
//! messages are accepted. [`InteractionContext`] tracks this as a [`ResponseState`] and
//! rejects illegal calls before they reach the platform.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use serenity::http::Http;
use serenity::model::application::command::CommandOptionType;
use serenity::model::application::interaction::application_command::{
    ApplicationCommandInteraction, CommandData, CommandDataOption,
};
use serenity::model::application::interaction::InteractionResponseType;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::truncate_for_message;

/// Where an interaction is in its response lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseState {
    /// Nothing sent yet; `defer` or `reply` are legal
    Pending,
    /// Receipt acknowledged, content still to come via edit or follow-up
    Deferred,
    /// Initial response content delivered
    Replied,
}

/// The four ways of responding to an interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseAction {
    Defer,
    Reply,
    EditReply,
    FollowUp,
}

impl fmt::Display for ResponseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseState::Pending => write!(f, "pending"),
            ResponseState::Deferred => write!(f, "deferred"),
            ResponseState::Replied => write!(f, "replied"),
        }
    }
}

impl fmt::Display for ResponseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseAction::Defer => write!(f, "defer"),
            ResponseAction::Reply => write!(f, "reply to"),
            ResponseAction::EditReply => write!(f, "edit the reply of"),
            ResponseAction::FollowUp => write!(f, "follow up on"),
        }
    }
}

/// A response call that the platform would reject in the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {action} an interaction that is {state}")]
pub struct IllegalTransition {
    pub action: ResponseAction,
    pub state: ResponseState,
}

impl ResponseState {
    /// State after performing `action`, or the reason it is not allowed
    pub fn after(self, action: ResponseAction) -> Result<ResponseState, IllegalTransition> {
        use ResponseAction::*;
        use ResponseState::*;

        match (self, action) {
            (Pending, Defer) => Ok(Deferred),
            (Pending, Reply) => Ok(Replied),
            (Deferred | Replied, EditReply) => Ok(Replied),
            (Deferred, FollowUp) => Ok(Deferred),
            (Replied, FollowUp) => Ok(Replied),
            (state, action) => Err(IllegalTransition { action, state }),
        }
    }

    /// True once the initial response (deferral or reply) has been sent
    pub fn is_acknowledged(self) -> bool {
        !matches!(self, ResponseState::Pending)
    }
}

/// Platform operations for answering one interaction
///
/// Implemented over serenity in production and by a recording double in tests.
#[async_trait]
pub trait InteractionResponder: Send + Sync {
    async fn defer(&self) -> Result<()>;
    async fn reply(&self, content: &str, ephemeral: bool) -> Result<()>;
    async fn edit_reply(&self, content: &str) -> Result<()>;
    async fn follow_up(&self, content: &str, ephemeral: bool) -> Result<()>;
}

/// Parsed command name, subcommand and option values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandInvocation {
    pub name: String,
    pub subcommand: Option<String>,
    pub options: HashMap<String, Value>,
    /// Invoking user, for logs
    pub user: String,
}

impl CommandInvocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_subcommand(mut self, subcommand: impl Into<String>) -> Self {
        self.subcommand = Some(subcommand.into());
        self
    }

    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    /// Flatten serenity's nested option tree (subcommands carry their own options)
    pub fn from_command_data(data: &CommandData, user: impl Into<String>) -> Self {
        let mut invocation = Self::new(data.name.clone());
        invocation.user = user.into();
        invocation.collect(&data.options);
        invocation
    }

    fn collect(&mut self, options: &[CommandDataOption]) {
        for option in options {
            match option.kind {
                CommandOptionType::SubCommand | CommandOptionType::SubCommandGroup => {
                    self.subcommand = Some(match self.subcommand.take() {
                        Some(group) => format!("{group} {}", option.name),
                        None => option.name.clone(),
                    });
                    self.collect(&option.options);
                }
                _ => {
                    if let Some(value) = &option.value {
                        self.options.insert(option.name.clone(), value.clone());
                    }
                }
            }
        }
    }

    pub fn subcommand(&self) -> Option<&str> {
        self.subcommand.as_deref()
    }

    /// String option, trimmed; empty strings count as absent
    pub fn string_option(&self, name: &str) -> Option<String> {
        self.options
            .get(name)
            .and_then(|val| val.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// String option the platform marks as required
    pub fn required_string(&self, name: &str) -> Result<String> {
        self.string_option(name)
            .ok_or_else(|| anyhow!("Missing {name} argument for /{}", self.name))
    }

}

/// One inbound interaction: its invocation, its responder and its response state
pub struct InteractionContext {
    request_id: Uuid,
    invocation: CommandInvocation,
    responder: Box<dyn InteractionResponder>,
    state: Mutex<ResponseState>,
}

impl InteractionContext {
    pub fn new(invocation: CommandInvocation, responder: Box<dyn InteractionResponder>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            invocation,
            responder,
            state: Mutex::new(ResponseState::Pending),
        }
    }

    /// Wrap a serenity slash-command interaction
    pub fn from_serenity(http: Arc<Http>, command: ApplicationCommandInteraction) -> Self {
        let invocation = CommandInvocation::from_command_data(&command.data, command.user.tag());
        Self::new(invocation, Box::new(SerenityResponder { http, command }))
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn invocation(&self) -> &CommandInvocation {
        &self.invocation
    }

    pub fn command_name(&self) -> &str {
        &self.invocation.name
    }

    pub async fn state(&self) -> ResponseState {
        *self.state.lock().await
    }

    /// Acknowledge receipt; content follows via [`edit_reply`](Self::edit_reply)
    pub async fn defer(&self) -> Result<()> {
        self.transition(ResponseAction::Defer, self.responder.defer())
            .await
    }

    pub async fn reply(&self, content: &str, ephemeral: bool) -> Result<()> {
        let content = truncate_for_message(content);
        self.transition(
            ResponseAction::Reply,
            self.responder.reply(&content, ephemeral),
        )
        .await
    }

    pub async fn edit_reply(&self, content: &str) -> Result<()> {
        let content = truncate_for_message(content);
        self.transition(ResponseAction::EditReply, self.responder.edit_reply(&content))
            .await
    }

    pub async fn follow_up(&self, content: &str, ephemeral: bool) -> Result<()> {
        let content = truncate_for_message(content);
        self.transition(
            ResponseAction::FollowUp,
            self.responder.follow_up(&content, ephemeral),
        )
        .await
    }

    /// Check legality, perform the platform call, then commit the new state.
    ///
    /// The lock is held across the call so responses of one interaction never overlap.
    async fn transition<F>(&self, action: ResponseAction, call: F) -> Result<()>
    where
        F: std::future::Future<Output = Result<()>>,
    {
        let mut state = self.state.lock().await;
        let next = state.after(action)?;
        call.await?;
        debug!(
            "[{}] Interaction /{} {} -> {}",
            self.request_id, self.invocation.name, *state, next
        );
        *state = next;
        Ok(())
    }
}

/// Serenity-backed responder for application command interactions
struct SerenityResponder {
    http: Arc<Http>,
    command: ApplicationCommandInteraction,
}

#[async_trait]
impl InteractionResponder for SerenityResponder {
    async fn defer(&self) -> Result<()> {
        self.command
            .create_interaction_response(&self.http, |r| {
                r.kind(InteractionResponseType::DeferredChannelMessageWithSource)
            })
            .await?;
        Ok(())
    }

    async fn reply(&self, content: &str, ephemeral: bool) -> Result<()> {
        self.command
            .create_interaction_response(&self.http, |r| {
                r.kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|m| m.content(content).ephemeral(ephemeral))
            })
            .await?;
        Ok(())
    }

    async fn edit_reply(&self, content: &str) -> Result<()> {
        self.command
            .edit_original_interaction_response(&self.http, |r| r.content(content))
            .await?;
        Ok(())
    }

    async fn follow_up(&self, content: &str, ephemeral: bool) -> Result<()> {
        self.command
            .create_followup_message(&self.http, |m| m.content(content).ephemeral(ephemeral))
            .await?;
        Ok(())
    }
}
