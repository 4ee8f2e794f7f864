//! Test doubles for the interaction layer

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::context::CommandContext;
use super::interaction::{CommandInvocation, InteractionContext, InteractionResponder};
use crate::core::Config;
use crate::kenku::{KenkuClient, PlaylistService, SoundboardService};

/// A platform call as seen by the responder
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Defer,
    Reply { content: String, ephemeral: bool },
    EditReply(String),
    FollowUp { content: String, ephemeral: bool },
}

/// Responder that records every call instead of talking to Discord
#[derive(Clone, Default)]
pub struct RecordingResponder {
    calls: Arc<Mutex<Vec<Recorded>>>,
    fail_next: Arc<AtomicBool>,
}

impl RecordingResponder {
    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }

    /// Make the next platform call fail (simulates a rejected request)
    pub fn fail_next_call(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Content of the last edit, the usual final answer of a deferred handler
    pub fn final_reply(&self) -> Option<String> {
        self.calls().into_iter().rev().find_map(|call| match call {
            Recorded::EditReply(content) => Some(content),
            _ => None,
        })
    }

    fn record(&self, call: Recorded) -> Result<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(anyhow!("platform rejected {call:?}"));
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl InteractionResponder for RecordingResponder {
    async fn defer(&self) -> Result<()> {
        self.record(Recorded::Defer)
    }

    async fn reply(&self, content: &str, ephemeral: bool) -> Result<()> {
        self.record(Recorded::Reply {
            content: content.to_string(),
            ephemeral,
        })
    }

    async fn edit_reply(&self, content: &str) -> Result<()> {
        self.record(Recorded::EditReply(content.to_string()))
    }

    async fn follow_up(&self, content: &str, ephemeral: bool) -> Result<()> {
        self.record(Recorded::FollowUp {
            content: content.to_string(),
            ephemeral,
        })
    }
}

/// Build an interaction backed by a recording responder
pub fn interaction(invocation: CommandInvocation) -> (InteractionContext, RecordingResponder) {
    let responder = RecordingResponder::default();
    let ctx = InteractionContext::new(invocation, Box::new(responder.clone()));
    (ctx, responder)
}

/// Command context pointing at a (mock) remote-control API
pub fn command_context(url: &str) -> Arc<CommandContext> {
    let client = KenkuClient::new(url, Duration::from_secs(5)).unwrap();
    let config = Config {
        url: url.to_string(),
        discord_token: "test".to_string(),
        ..Config::default()
    };
    Arc::new(CommandContext::new(
        Arc::new(config),
        PlaylistService::new(client.clone()),
        SoundboardService::new(client),
    ))
}

/// URL of a local port nobody listens on
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
