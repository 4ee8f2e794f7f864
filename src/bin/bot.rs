use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use serenity::async_trait;
use serenity::model::application::interaction::Interaction;
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;

use kenku_chat::commands::{
    build_registry, register_global_commands, register_guild_commands, CommandContext,
    Dispatcher, InteractionContext,
};
use kenku_chat::core::Config;

struct Handler {
    dispatcher: Dispatcher,
    guild_id: Option<GuildId>,
    register_commands: bool,
}

impl Handler {
    fn new(dispatcher: Dispatcher, config: &Config) -> Self {
        Handler {
            dispatcher,
            guild_id: config.guild_id().map(GuildId),
            register_commands: config.register_commands,
        }
    }

    async fn register(&self, ctx: &Context) {
        let registry = self.dispatcher.registry();

        // Guild commands update instantly, global ones can take up to an hour
        if let Some(guild_id) = self.guild_id {
            info!("Registering commands for guild {guild_id}");
            if let Err(e) = register_guild_commands(ctx, guild_id, registry).await {
                error!("Failed to register guild slash commands: {e}");
            }
        } else {
            info!("Registering commands globally");
            if let Err(e) = register_global_commands(ctx, registry).await {
                error!("Failed to register global slash commands: {e}");
            }
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected and ready!", ready.user.name);
        info!("Connected to {} guilds", ready.guilds.len());
        info!("Bot ID: {}", ready.user.id);

        if let Some(shard) = ready.shard {
            info!("Shard: {}/{}", shard[0] + 1, shard[1]);
        }

        if self.register_commands {
            self.register(&ctx).await;
        } else {
            info!(
                "Skipping command registration ({} commands known)",
                self.dispatcher.registry().len()
            );
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::ApplicationCommand(command) = interaction {
            let interaction = InteractionContext::from_serenity(ctx.http.clone(), command);
            let state = self.dispatcher.dispatch(&interaction).await;
            info!(
                "[{}] /{} finished as {state}",
                interaction.request_id(),
                interaction.command_name()
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let mut config = Config::from_env()?;
    if std::env::args().skip(1).any(|arg| arg == "--register") {
        config.register_commands = true;
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting KenkuChat {}...", env!("CARGO_PKG_VERSION"));
    info!("KenkuFM remote-control API at {}", config.url);

    let config = Arc::new(config);
    let context = Arc::new(CommandContext::from_config(config.clone())?);
    let registry = Arc::new(build_registry(&config.prefix)?);
    info!(
        "Loaded {} commands: {}",
        registry.len(),
        registry.identifiers().join(", ")
    );

    let handler = Handler::new(Dispatcher::new(registry, context), &config);

    let intents = GatewayIntents::GUILDS;

    let mut builder = Client::builder(&config.discord_token, intents).event_handler(handler);
    if let Some(application_id) = config.application_id {
        builder = builder.application_id(application_id);
    }

    let mut client = builder.await.map_err(|e| {
        error!("Failed to create Discord client: {e}");
        anyhow::anyhow!("Client creation failed: {}", e)
    })?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shard_manager.lock().await.shutdown_all().await;
            info!("Closed KenkuChat connection.");
        }
    });

    info!("Establishing WebSocket connection to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
