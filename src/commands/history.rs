use serenity::builder::CreateEmbed;
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::api::bridge::connector::WalletConnector;
use crate::commands::connect;
use crate::services::snapshot_service;
use crate::utils::format::{format_ton, truncate_address};

const PAGE_SIZE: usize = 5;

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
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

    // Check if page number is specified (e.g., "p2" or "2")
    let mut page_num = 1usize;
    if let Some(page_arg) = args.first() {
        let page_arg = page_arg.to_lowercase();
        let page_str = page_arg.strip_prefix('p').unwrap_or(&page_arg);
        page_num = page_str
            .parse::<usize>()
            .map_err(|_| "Invalid page number. Use: `$history` or `$history p2`".to_string())?;
        if page_num == 0 {
            return Err("Invalid page number. Pages start at 1".to_string());
        }
    }

    let snapshot = snapshot_service::refresh_snapshot(&explorer, &address).await;

    if snapshot.transactions.is_empty() {
        let embed = CreateEmbed::default()
            .title("📋 Transaction History")
            .description("No transactions found")
            .color(0xffa500);

        msg.channel_id
            .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
            .await
            .map_err(|e| e.to_string())?;
        return Ok(());
    }

    let total_pages = snapshot.transactions.len().div_ceil(PAGE_SIZE);
    if page_num > total_pages {
        return Err(format!(
            "Page {} does not exist (only {} page{})",
            page_num,
            total_pages,
            if total_pages == 1 { "" } else { "s" }
        ));
    }

    let start = (page_num - 1) * PAGE_SIZE;
    let page = &snapshot.transactions[start..(start + PAGE_SIZE).min(snapshot.transactions.len())];

    let mut embed = CreateEmbed::default()
        .title("📋 Transaction History")
        .description(format!("Wallet `{}`", truncate_address(&address)))
        .color(0x00b0f4);

    for record in page {
        let direction = if record.inbound { "📥 Received" } else { "📤 Sent" };
        let counterparty = record
            .source
            .as_deref()
            .map(truncate_address)
            .unwrap_or_else(|| "-".to_string());
        embed = embed.field(
            format!("{} · {}", direction, record.timestamp()),
            format!("{}\nFrom: {}", format_ton(record.value_nano), counterparty),
            false,
        );
    }

    if total_pages > 1 {
        embed = embed.footer(serenity::builder::CreateEmbedFooter::new(format!(
            "Page {}/{}",
            page_num, total_pages
        )));
    }

    msg.channel_id
        .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
