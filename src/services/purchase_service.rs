use serenity::builder::CreateEmbed;
use sqlx::mysql::MySqlPool;
use std::collections::HashSet;
use tracing::{info, warn};

use crate::api::bridge::WalletConnector;
use crate::db;
use crate::models::purchase::{Product, PurchaseResult};
use crate::services::transfer_service;
use crate::utils::errors::WalletError;
use crate::utils::format::truncate_address;

/// Marketplace wallet that receives shop payments
pub fn marketplace_address() -> Result<String, String> {
    std::env::var("MARKETPLACE_ADDRESS")
        .map_err(|_| "MARKETPLACE_ADDRESS not set in .env file".to_string())
}

/// Load the catalogue plus the invoking user's owned item ids
pub async fn list_shop(
    pool: &MySqlPool,
    discord_id: u64,
) -> Result<(Vec<Product>, HashSet<String>), String> {
    let products = db::product::list_products(pool)
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .into_iter()
        .map(|(id, name, description, price_ton)| Product {
            id,
            name,
            description,
            price_ton,
        })
        .collect();

    let owned = db::purchase::list_purchases(pool, discord_id as i64)
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .into_iter()
        .collect();

    Ok((products, owned))
}

/// Look up a single product by id
pub async fn find_product(pool: &MySqlPool, product_id: &str) -> Result<Product, String> {
    let (id, name, description, price_ton) = db::product::get_product(pool, product_id)
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| format!("Product '{}' not found", product_id))?;

    Ok(Product {
        id,
        name,
        description,
        price_ton,
    })
}

/// Pay for a product through the wallet bridge and record the purchase flag.
///
/// The payment carries a `gram:<product-id>` comment so the marketplace can
/// attribute it. A failed flag write does not undo the completed payment;
/// it is logged and the purchase still succeeds.
pub async fn execute_purchase(
    pool: &MySqlPool,
    connector: &dyn WalletConnector,
    discord_id: u64,
    product: &Product,
) -> Result<PurchaseResult, WalletError> {
    let destination =
        marketplace_address().map_err(WalletError::SubmissionFailed)?;
    let comment = format!("gram:{}", product.id);

    let receipt = transfer_service::execute_send(
        connector,
        discord_id,
        &destination,
        product.price_ton,
        Some(&comment),
    )
    .await?;

    if let Err(e) = db::purchase::record_purchase(pool, discord_id as i64, &product.id).await {
        warn!(
            "Paid purchase of '{}' by {} could not be recorded: {}",
            product.id, discord_id, e
        );
    } else {
        info!("User {} purchased '{}'", discord_id, product.id);
    }

    Ok(PurchaseResult {
        product: product.clone(),
        buyer_id: discord_id,
        boc: receipt.boc.unwrap_or_default(),
    })
}

/// Render the shop catalogue with owned markers
pub fn create_shop_embed(products: &[Product], owned: &HashSet<String>) -> CreateEmbed {
    let mut embed = CreateEmbed::default()
        .title("🛒 Shop")
        .description("Buy items with TON using `$buy <item-id>`")
        .color(0x00b0f4);

    if products.is_empty() {
        return embed.description("The shop is empty");
    }

    for product in products {
        let owned_marker = if owned.contains(&product.id) {
            " (✅ owned)"
        } else {
            ""
        };
        embed = embed.field(
            format!("{} · `{}`{}", product.name, product.id, owned_marker),
            format!("{}\nPrice: {} TON", product.description, product.price_ton),
            false,
        );
    }

    embed
}

/// Render a purchase receipt
pub fn create_purchase_embed(result: &PurchaseResult) -> CreateEmbed {
    let mut embed = CreateEmbed::default()
        .title("🧾 Purchase complete")
        .field("Item", format!("{} (`{}`)", result.product.name, result.product.id), false)
        .field("Price", format!("{} TON", result.product.price_ton), true)
        .field("Buyer", format!("<@{}>", result.buyer_id), true)
        .color(0x00ff00);

    if !result.boc.is_empty() {
        embed = embed.field(
            "Confirmation",
            format!("`{}`", truncate_address(&result.boc)),
            false,
        );
    }

    embed
}
