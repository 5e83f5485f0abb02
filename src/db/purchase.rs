use sqlx::mysql::MySqlPool;

/// Record a purchased item for a user. Recording the same item twice is a
/// no-op; the flag set has no expiry and no conflict resolution.
pub async fn record_purchase(
    pool: &MySqlPool,
    discord_id: i64,
    item_id: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT IGNORE INTO purchase (discord_id, item_id) VALUES (?, ?)")
        .bind(discord_id)
        .bind(item_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Get the full set of purchased item ids for a user
pub async fn list_purchases(
    pool: &MySqlPool,
    discord_id: i64,
) -> Result<Vec<String>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (String,)>(
        "SELECT item_id FROM purchase WHERE discord_id = ? ORDER BY date_created",
    )
    .bind(discord_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(item_id,)| item_id).collect())
}

/// Check whether a user already owns an item
pub async fn has_purchased(
    pool: &MySqlPool,
    discord_id: i64,
    item_id: &str,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT 1 FROM purchase WHERE discord_id = ? AND item_id = ?")
        .bind(discord_id)
        .bind(item_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}
