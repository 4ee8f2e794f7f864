//! Bot configuration
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Optional config file (JSON or YAML) below environment overrides
//! - 1.0.0: Initial environment-based configuration

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default location of the KenkuFM remote-control API
pub const DEFAULT_URL: &str = "http://127.0.0.1:3333";
/// Default command-name prefix (`/kfm-status`, `/kfm-play`, ...)
pub const DEFAULT_PREFIX: &str = "kfm";
/// Default config file, silently skipped when absent
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Discord limit on application command names
const MAX_COMMAND_NAME_LEN: usize = 32;
/// Longest suffix appended to the prefix (`-search`, `-sounds`, `-status`, `-tracks`)
const LONGEST_COMMAND_SUFFIX: usize = 7;

/// Runtime configuration, resolved once at startup and passed down explicitly.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the KenkuFM remote-control API
    pub url: String,
    /// Prefix for all registered slash commands
    pub prefix: String,
    /// Default log filter (overridden by `RUST_LOG`)
    #[serde(alias = "logging")]
    pub log_level: String,
    #[serde(alias = "token")]
    pub discord_token: String,
    #[serde(alias = "applicationId")]
    pub application_id: Option<u64>,
    /// Register commands for a single guild instead of globally
    #[serde(alias = "serverId")]
    pub discord_guild_id: Option<String>,
    /// Push slash-command definitions to Discord on startup
    #[serde(alias = "register")]
    pub register_commands: bool,
    /// Per-request timeout for the remote-control API
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            log_level: "info".to_string(),
            discord_token: String::new(),
            application_id: None,
            discord_guild_id: None,
            register_commands: false,
            request_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load configuration from the optional config file and the environment.
    ///
    /// Environment variables win over file values.
    pub fn from_env() -> Result<Self> {
        let path =
            std::env::var("KENKU_CHAT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&path).exists() {
            Self::load(&path)?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON or YAML file (no validation)
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path}"))?;
        Self::parse(&contents).with_context(|| format!("Invalid config file {path}"))
    }

    /// Parse configuration text. JSON is accepted since it is a subset of YAML.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Apply overrides from a key lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("KENKU_URL") {
            self.url = url;
        }
        if let Some(prefix) = lookup("COMMAND_PREFIX") {
            self.prefix = prefix;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(token) = lookup("DISCORD_TOKEN") {
            self.discord_token = token;
        }
        if let Some(id) = lookup("DISCORD_APPLICATION_ID") {
            self.application_id = Some(
                id.parse()
                    .map_err(|_| anyhow!("DISCORD_APPLICATION_ID is not a number: {id}"))?,
            );
        }
        if let Some(guild) = lookup("DISCORD_GUILD_ID") {
            self.discord_guild_id = Some(guild).filter(|g| !g.is_empty());
        }
        if let Some(flag) = lookup("REGISTER_COMMANDS") {
            self.register_commands = parse_flag(&flag)?;
        }
        if let Some(secs) = lookup("KENKU_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = secs
                .parse()
                .map_err(|_| anyhow!("KENKU_REQUEST_TIMEOUT_SECS is not a number: {secs}"))?;
        }
        Ok(())
    }

    /// Validate values that would otherwise fail late (at gateway login or command registration)
    pub fn validate(&self) -> Result<()> {
        if self.discord_token.trim().is_empty() {
            bail!("DISCORD_TOKEN is required");
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            bail!("Remote-control URL must start with http:// or https://: {}", self.url);
        }

        if self.prefix.is_empty()
            || !self
                .prefix
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            bail!(
                "Command prefix must be lowercase letters, digits or underscores: {}",
                self.prefix
            );
        }

        // Discord rejects command names longer than 32 characters
        if self.prefix.len() + LONGEST_COMMAND_SUFFIX > MAX_COMMAND_NAME_LEN {
            bail!(
                "Command prefix too long (max {} chars): {}",
                MAX_COMMAND_NAME_LEN - LONGEST_COMMAND_SUFFIX,
                self.prefix
            );
        }

        if self.request_timeout_secs == 0 {
            bail!("Request timeout must be at least one second");
        }

        if let Some(guild) = &self.discord_guild_id {
            guild
                .parse::<u64>()
                .map_err(|_| anyhow!("DISCORD_GUILD_ID is not a number: {guild}"))?;
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parsed guild id for development-mode command registration
    pub fn guild_id(&self) -> Option<u64> {
        self.discord_guild_id
            .as_ref()
            .and_then(|id| id.parse::<u64>().ok())
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("Invalid boolean flag: {other}"),
    }
}
