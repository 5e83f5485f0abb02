use serenity::builder::CreateEmbed;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use tracing::{info, warn};

use crate::api::bridge::connector::WalletConnector;
use crate::commands::connect;
use crate::models::notification::report;
use crate::services::{purchase_service, transfer_service};
use crate::utils::errors::WalletError;

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), String> {
    let pool = {
        let data = ctx.data.read().await;
        data.get::<crate::DatabasePool>()
            .ok_or("Database not initialized".to_string())?
            .clone()
    };

    let (products, owned) = purchase_service::list_shop(&pool, msg.author.id.get()).await?;
    let embed = purchase_service::create_shop_embed(&products, &owned);

    msg.channel_id
        .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}

pub async fn execute_buy(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    if args.is_empty() {
        let help_embed = CreateEmbed::default()
            .title("🛒 Buy Command")
            .description("Buy a shop item with TON from your connected wallet")
            .field("Usage", "`$buy <item-id>`", false)
            .field("Examples", "`$buy sticker-pack`\n`$buy supporter`", false)
            .field(
                "Notes",
                "• Item ids are shown in `$shop`\n\
                 • Your wallet asks for approval before anything is paid",
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

    let (pool, connector) = {
        let data = ctx.data.read().await;
        let pool = data
            .get::<crate::DatabasePool>()
            .ok_or("Database not initialized".to_string())?
            .clone();
        let connector = data
            .get::<crate::WalletBridge>()
            .ok_or("Wallet bridge not initialized".to_string())?
            .clone();
        (pool, connector)
    };

    let user_id = msg.author.id.get();
    let product = purchase_service::find_product(&pool, args[0]).await?;

    let already_owned = crate::db::purchase::has_purchased(&pool, user_id as i64, &product.id)
        .await
        .map_err(|e| format!("Database error: {}", e))?;
    if already_owned {
        let embed = CreateEmbed::default()
            .title("🛒 Already owned")
            .description(format!("You already own **{}**", product.name))
            .color(0xffa500);

        msg.channel_id
            .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
            .await
            .map_err(|e| e.to_string())?;
        return Ok(());
    }

    match purchase_service::execute_purchase(&pool, connector.as_ref(), user_id, &product).await {
        Ok(result) => {
            let embed = purchase_service::create_purchase_embed(&result);
            msg.channel_id
                .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
                .await
                .map_err(|e| e.to_string())?;
        }
        Err(WalletError::NotConnected) => {
            let link = connector.begin_connect(user_id).await.ok();
            msg.channel_id
                .send_message(
                    ctx,
                    serenity::builder::CreateMessage::default()
                        .embed(connect::create_prompt_embed(link.as_deref())),
                )
                .await
                .map_err(|e| e.to_string())?;
        }
        Err(error) => {
            let notification = report(
                Err(error),
                |_| {},
                |e| warn!("Purchase of '{}' by {} failed: {}", product.id, user_id, e),
            );
            let embed = transfer_service::create_outcome_embed(&notification)
                .field("Item", product.name.clone(), true)
                .field("Price", format!("{} TON", product.price_ton), true);

            msg.channel_id
                .send_message(ctx, serenity::builder::CreateMessage::default().embed(embed))
                .await
                .map_err(|e| e.to_string())?;
        }
    }

    info!("Processed $buy {} for user {}", product.id, user_id);

    Ok(())
}
