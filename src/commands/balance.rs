use serenity::builder::CreateEmbed;
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::api::bridge::connector::WalletConnector;
use crate::commands::connect;
use crate::services::snapshot_service;
use crate::utils::format::{format_ton, truncate_address};

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

    let connected_address = connector
        .stored_state(user_id)
        .await
        .filter(|state| state.connected)
        .and_then(|state| state.address);

    let Some(address) = connected_address else {
        msg.channel_id
            .send_message(
                ctx,
                serenity::builder::CreateMessage::default()
                    .embed(connect::create_prompt_embed(None)),
            )
            .await
            .map_err(|e| e.to_string())?;
        return Ok(());
    };

    let snapshot = snapshot_service::refresh_snapshot(&explorer, &address).await;

    let balance_display = snapshot
        .balance
        .map(format_ton)
        .unwrap_or_else(|| "unavailable right now".to_string());

    let embed = CreateEmbed::default()
        .title("💰 Balance")
        .field("User", format!("<@{}>", user_id), false)
        .field("Wallet", truncate_address(&address), true)
        .field("Balance", balance_display, true)
        .color(0x00b0f4);

    msg.channel_id
        .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
