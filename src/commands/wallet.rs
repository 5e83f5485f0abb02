use serenity::builder::CreateEmbed;
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::api::bridge::connector::WalletConnector;
use crate::commands::connect;
use crate::services::snapshot_service;
use crate::utils::format::{format_ton, network_name};

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    let (connector, explorer) = {
        let data = ctx.data.read().await;
        let connector = data
            .get::<crate::WalletBridge>()
            .ok_or("Wallet bridge not initialized".to_string())?
            .clone();
        let explorer = data
            .get::<crate::Explorer>()
            .ok_or("Explorer client not initialized".to_string())?
            .clone();
        (connector, explorer)
    };

    let user_id = msg.author.id.get();

    // Re-poll the bridge so a freshly approved pairing shows up
    let state = connector
        .link_state(user_id)
        .await
        .map_err(|e| e.to_string())?;

    if !state.connected {
        msg.channel_id
            .send_message(
                ctx,
                serenity::builder::CreateMessage::default()
                    .embed(connect::create_prompt_embed(None)),
            )
            .await
            .map_err(|e| e.to_string())?;
        return Ok(());
    }

    let address = state.address.ok_or("Bridge reported no wallet address".to_string())?;
    let snapshot = snapshot_service::refresh_snapshot(&explorer, &address).await;

    let balance_display = snapshot
        .balance
        .map(format_ton)
        .unwrap_or_else(|| "-".to_string());

    let embed = CreateEmbed::default()
        .title("👛 Wallet Information")
        .field("Address", format!("`{}`", address), false)
        .field(
            "Connection",
            format!(
                "🟢 Connected to {}",
                state.app_name.as_deref().unwrap_or("TON Wallet")
            ),
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
        .field("Balance", balance_display, false)
        .field(
            "Recent Transactions",
            format!("{} fetched (see `$history`)", snapshot.transactions.len()),
            false,
        )
        .color(0x00b0f4);

    msg.channel_id
        .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
