use serenity::builder::CreateEmbed;
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::api::bridge::connector::WalletConnector;
use crate::models::notification::connection_prompt;
use crate::utils::format::{network_name, truncate_address};

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    // Get bridge connector from context
    let connector = {
        let data = ctx.data.read().await;
        data.get::<crate::WalletBridge>()
            .ok_or("Wallet bridge not initialized".to_string())?
            .clone()
    };

    let user_id = msg.author.id.get();

    if args.first().map(|a| a.to_lowercase()).as_deref() == Some("status") {
        let state = connector
            .link_state(user_id)
            .await
            .map_err(|e| e.to_string())?;

        let embed = if state.connected {
            CreateEmbed::default()
                .title("🔗 Wallet connected")
                .field(
                    "Address",
                    state
                        .address
                        .as_deref()
                        .map(truncate_address)
                        .unwrap_or_else(|| "-".to_string()),
                    true,
                )
                .field(
                    "Network",
                    state
                        .network
                        .as_deref()
                        .map(network_name)
                        .unwrap_or("Unknown"),
                    true,
                )
                .field(
                    "Wallet",
                    state.app_name.unwrap_or_else(|| "TON Wallet".to_string()),
                    true,
                )
                .color(0x00ff00)
        } else {
            CreateEmbed::default()
                .title("⏳ Pairing pending")
                .description(
                    "Your wallet has not approved the pairing yet. Open the connect link in \
                     your wallet, or run `$connect` to create a fresh one.",
                )
                .color(0xffa500)
        };

        msg.channel_id
            .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
            .await
            .map_err(|e| e.to_string())?;
        return Ok(());
    }

    let stored = connector.stored_state(user_id).await;
    if stored.as_ref().map(|s| s.connected).unwrap_or(false) {
        let state = stored.unwrap_or_default();
        let embed = CreateEmbed::default()
            .title("🔗 Wallet already connected")
            .description(format!(
                "Connected to {} as `{}`. Use `$disconnect` first if you want to link a different wallet.",
                state.app_name.as_deref().unwrap_or("TON Wallet"),
                state
                    .address
                    .as_deref()
                    .map(truncate_address)
                    .unwrap_or_else(|| "-".to_string())
            ))
            .color(0x00b0f4);

        msg.channel_id
            .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
            .await
            .map_err(|e| e.to_string())?;
        return Ok(());
    }

    let link = connector
        .begin_connect(user_id)
        .await
        .map_err(|e| e.to_string())?;

    let embed = CreateEmbed::default()
        .title("🔗 Connect your TON wallet")
        .description(
            "Open the link below in your TON wallet and approve the pairing. \
             Then run `$connect status` to confirm.",
        )
        .field("Connect link", link, false)
        .color(0x00b0f4);

    msg.channel_id
        .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}

pub async fn execute_disconnect(ctx: &Context, msg: &Message) -> Result<(), String> {
    let connector = {
        let data = ctx.data.read().await;
        data.get::<crate::WalletBridge>()
            .ok_or("Wallet bridge not initialized".to_string())?
            .clone()
    };

    connector
        .disconnect(msg.author.id.get())
        .await
        .map_err(|e| e.to_string())?;

    let embed = CreateEmbed::default()
        .title("🔌 Wallet disconnected")
        .description("Your wallet link has been removed.")
        .color(0x00b0f4);

    msg.channel_id
        .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}

/// The embed posted when an action needs a wallet and none is connected.
/// A fresh connect link is attached when the bridge could hand one out.
pub fn create_prompt_embed(connect_link: Option<&str>) -> CreateEmbed {
    let prompt = connection_prompt();
    let mut embed = CreateEmbed::default()
        .title(prompt.title)
        .description(prompt.description)
        .color(prompt.severity.color());

    match connect_link {
        Some(link) => {
            embed = embed.field("Connect link", link.to_string(), false);
        }
        None => {
            embed = embed.field("How", "Run `$connect` to link your wallet", false);
        }
    }

    embed
}
