use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use sqlx::mysql::MySqlPool;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod db;
mod models;
mod services;
mod utils;

use api::bridge::{BridgeConnector, SessionStore};
use api::toncenter::ToncenterClient;

struct Handler;

struct BotData;

impl TypeMapKey for BotData {
    type Value = Instant;
}

struct DatabasePool;

impl TypeMapKey for DatabasePool {
    type Value = MySqlPool;
}

struct WalletBridge;

impl TypeMapKey for WalletBridge {
    type Value = Arc<BridgeConnector>;
}

struct Explorer;

impl TypeMapKey for Explorer {
    type Value = Arc<ToncenterClient>;
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        commands::handle_message(&ctx, &msg).await;
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        // Check for rate limits now that bot is connected
        debug!("Checking Discord rate limit status...");
        match ctx.http.get_current_user().await {
            Ok(_) => {
                info!("No rate limit detected - Bot is fully ready!");
            }
            Err(e) => {
                let error_msg = e.to_string();
                if error_msg.contains("429") || error_msg.contains("rate limit") {
                    warn!("Bot is being rate limited by Discord! Error: {}", error_msg);
                } else {
                    warn!("Failed to check rate limit status: {}", error_msg);
                }
            }
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gram_bot=debug".parse().unwrap())
                .add_directive("serenity=warn".parse().unwrap()),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("🪙 Starting GRAM bot...");
    info!("  GRAM - Guild Remittance and Asset Monitor");
    info!("  Link a TON wallet, watch balances, pay in TON.");
    info!("");

    // Initialize database
    info!("Initializing database...");
    let pool = match db::init_db().await {
        Ok(p) => {
            info!("Database initialized successfully");
            p
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return;
        }
    };

    // Read-only explorer client
    let toncenter_url = std::env::var("TONCENTER_API_URL").ok();
    let toncenter_key = std::env::var("TONCENTER_API_KEY").ok();
    let explorer = Arc::new(match toncenter_url {
        Some(url) => ToncenterClient::with_base_url(toncenter_key, url),
        None => ToncenterClient::new(toncenter_key),
    });

    // Wallet bridge connector; the session secret key must be 32 bytes hex
    let bridge_url = std::env::var("BRIDGE_URL").expect("BRIDGE_URL not set");
    let encryption_key =
        std::env::var("LINK_ENCRYPTION_KEY").expect("LINK_ENCRYPTION_KEY not set");
    let bridge = Arc::new(BridgeConnector::new(
        bridge_url,
        SessionStore::new(pool.clone(), encryption_key),
    ));

    let token = std::env::var("DISCORD_TOKEN").expect("DISCORD_TOKEN not set");
    let intents = GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MESSAGES;

    let mut client = Client::builder(&token, intents)
        .event_handler(Handler)
        .await
        .expect("Failed to create client");

    // Store the start time, database pool and service clients in client data
    {
        let mut data = client.data.write().await;
        data.insert::<BotData>(Instant::now());
        data.insert::<DatabasePool>(pool);
        data.insert::<WalletBridge>(bridge);
        data.insert::<Explorer>(explorer);
    }

    if let Err(e) = client.start().await {
        error!("Client error: {}", e);
    }
}
