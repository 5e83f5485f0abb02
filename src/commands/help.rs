use serenity::builder::CreateEmbed;
use serenity::model::channel::Message;
use serenity::prelude::Context;

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    let embed = CreateEmbed::default()
        .title("📖 GRAM Commands Help")
        .description("**GRAM** - Guild Remittance and Asset Monitor\nA Discord companion bot for TON wallets: link your wallet, watch your balance and pay in TON.")
        .color(0x00b0f4)
        .field(
            "🎯 General",
            "`$ping` - Check bot latency\n`$help` - Show this help message",
            false,
        )
        .field(
            "🔗 Wallet Connection",
            "`$connect` - Link your TON wallet (opens a connect link)\n`$connect status` - Check the pairing state\n`$disconnect` - Unlink your wallet",
            false,
        )
        .field(
            "👛 Wallet",
            "`$wallet` - Wallet overview: address, network, balance\n`$balance` - Check your TON balance\n`$history [p2]` - Recent transactions",
            false,
        )
        .field(
            "💸 Payments",
            "`$send <address> <amount> [comment]` - Send TON to any address\n`$shop` - Browse the guild shop\n`$buy <item-id>` - Buy an item with TON",
            false,
        )
        .field(
            "⚡ Rate Limiting",
            format!(
                "{}-second cooldown per command per user\nWallet approvals expire after 5 minutes",
                crate::utils::ratelimit::get_cooldown_seconds()
            ),
            false,
        );

    msg.channel_id
        .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
        .await
        .map_err(|e| format!("Failed to send help message: {}", e))?;

    Ok(())
}
