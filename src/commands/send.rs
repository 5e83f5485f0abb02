use serenity::model::channel::Message;
use serenity::prelude::Context;
use tracing::{info, warn};

use crate::api::bridge::connector::WalletConnector;
use crate::commands::connect;
use crate::models::notification::report;
use crate::services::transfer_service;
use crate::utils::errors::WalletError;
use crate::utils::format::truncate_address;

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    if args.len() < 2 {
        let help_embed = serenity::builder::CreateEmbed::default()
            .title("💸 Send Command")
            .description("Send TON from your connected wallet to any address")
            .field(
                "Usage",
                "`$send <address> <amount> [comment]`",
                false,
            )
            .field(
                "Examples",
                "`$send EQDrjaLahLkMB-hMCmkzOyBuHJ139ZUYmPHu6RRBKnbdLIYI 1.5`\n\
                 `$send EQDrjaLahLkMB-hMCmkzOyBuHJ139ZUYmPHu6RRBKnbdLIYI 0.1 thanks!`",
                false,
            )
            .field(
                "Notes",
                "• Amount is in TON (1 TON = 10⁹ nanoTON)\n\
                 • Your wallet asks for approval before anything is sent\n\
                 • The request expires after 5 minutes",
                false,
            )
            .color(0x00ff00);

        msg.channel_id
            .send_message(
                ctx,
                serenity::builder::CreateMessage::default().embed(help_embed),
            )
            .await
            .map_err(|e| e.to_string())?;
        return Ok(());
    }

    let destination = args[0];
    let amount: f64 = args[1]
        .parse()
        .map_err(|_| "❌ Invalid amount".to_string())?;
    let comment = if args.len() > 2 {
        Some(args[2..].join(" "))
    } else {
        None
    };

    let connector = {
        let data = ctx.data.read().await;
        data.get::<crate::WalletBridge>()
            .ok_or("Wallet bridge not initialized".to_string())?
            .clone()
    };

    let user_id = msg.author.id.get();

    let result = transfer_service::execute_send(
        connector.as_ref(),
        user_id,
        destination,
        amount,
        comment.as_deref(),
    )
    .await;

    // A missing connection gets the connect prompt (with a fresh link when
    // the bridge can hand one out) instead of a failure notification
    if matches!(result, Err(WalletError::NotConnected)) {
        let link = connector.begin_connect(user_id).await.ok();
        msg.channel_id
            .send_message(
                ctx,
                serenity::builder::CreateMessage::default()
                    .embed(connect::create_prompt_embed(link.as_deref())),
            )
            .await
            .map_err(|e| e.to_string())?;
        return Ok(());
    }

    let notification = report(
        result,
        |boc| {
            info!(
                "Send by user {} confirmed (blob {} bytes)",
                user_id,
                boc.len()
            );
        },
        |error| {
            warn!("Send by user {} failed: {}", user_id, error);
        },
    );

    let embed = transfer_service::create_outcome_embed(&notification)
        .field("To", truncate_address(destination), true)
        .field("Amount", format!("{} TON", amount), true);

    msg.channel_id
        .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
