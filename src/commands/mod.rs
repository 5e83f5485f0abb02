pub mod balance;
pub mod connect;
pub mod help;
pub mod history;
pub mod ping;
pub mod send;
pub mod shop;
pub mod wallet;

use serenity::model::channel::Message;
use serenity::prelude::Context;
use tracing::error;

use crate::utils::ratelimit;

const COMMANDS: &[&str] = &[
    "$ping",
    "$help",
    "$connect",
    "$link",
    "$disconnect",
    "$unlink",
    "$wallet",
    "$balance",
    "$bal",
    "$history",
    "$txs",
    "$send",
    "$pay",
    "$shop",
    "$buy",
];

pub async fn handle_message(ctx: &Context, msg: &Message) {
    if msg.author.bot {
        return;
    }

    // Parse command and arguments
    let parts: Vec<&str> = msg.content.split_whitespace().collect();
    if parts.is_empty() {
        return;
    }

    let command = parts[0];
    let args = &parts[1..];

    // Everything else is normal chat
    if !COMMANDS.contains(&command) {
        return;
    }

    // Check per-user cooldown before processing the command
    if let Err((remaining, should_warn)) = ratelimit::check_cooldown(msg.author.id, command).await {
        if should_warn {
            let _ = msg
                .channel_id
                .send_message(
                    ctx,
                    serenity::builder::CreateMessage::default().embed(
                        serenity::builder::CreateEmbed::default()
                            .title("Command Cooldown")
                            .description(format!(
                                "⏳ Please wait {} seconds before using this command again.",
                                remaining
                            ))
                            .color(0xffa500),
                    ),
                )
                .await;
        }
        return;
    }

    let result = match command {
        "$ping" => ping::execute(ctx, msg).await,
        "$help" => help::execute(ctx, msg).await,
        "$connect" | "$link" => connect::execute(ctx, msg, args).await,
        "$disconnect" | "$unlink" => connect::execute_disconnect(ctx, msg).await,
        "$wallet" => wallet::execute(ctx, msg).await,
        "$balance" | "$bal" => balance::execute(ctx, msg).await,
        "$history" | "$txs" => history::execute(ctx, msg, args).await,
        "$send" | "$pay" => send::execute(ctx, msg, args).await,
        "$shop" => shop::execute(ctx, msg).await,
        "$buy" => shop::execute_buy(ctx, msg, args).await,
        _ => return,
    };

    if let Err(e) = result {
        error!("❌ Error executing command {}: {}", command, e);

        // Determine error type and create user-friendly message
        let user_message = if e.contains("429") || e.contains("rate limit") {
            "⚠️ **Rate Limited**: The upstream API is rate limiting us. Please try again in a moment.".to_string()
        } else if e.contains("unreachable") || e.contains("Request failed") {
            "⚠️ **Network Error**: Having trouble reaching the TON services. Please try again.".to_string()
        } else if !e.is_empty() {
            format!("❌ {}", e)
        } else {
            "❌ An error occurred while executing the command.".to_string()
        };

        // Send error to user as Discord message embed
        let embed = serenity::builder::CreateEmbed::default()
            .title("Command Error")
            .description(user_message)
            .color(0xff0000);

        let _ = msg
            .channel_id
            .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
            .await;
    }
}
