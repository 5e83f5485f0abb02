use sqlx::mysql::MySqlPool;

/// Get a user's wallet link - returns
/// (session_id, encrypted_secret, address, network, app_name, connected)
pub async fn get_link(
    pool: &MySqlPool,
    discord_id: i64,
) -> Result<Option<(String, String, Option<String>, Option<String>, Option<String>, bool)>, sqlx::Error>
{
    sqlx::query_as::<_, (String, String, Option<String>, Option<String>, Option<String>, bool)>(
        "SELECT session_id, encrypted_secret, wallet_address, network, app_name, connected \
         FROM wallet_link WHERE discord_id = ?",
    )
    .bind(discord_id)
    .fetch_optional(pool)
    .await
}

/// Store a freshly created pairing session, replacing any previous link.
/// A new session always starts disconnected with no wallet identity.
pub async fn upsert_link(
    pool: &MySqlPool,
    discord_id: i64,
    session_id: &str,
    encrypted_secret: &str,
) -> Result<(), sqlx::Error> {
    // Check if a link already exists
    let existing = sqlx::query("SELECT discord_id FROM wallet_link WHERE discord_id = ?")
        .bind(discord_id)
        .fetch_optional(pool)
        .await?;

    if existing.is_some() {
        sqlx::query(
            "UPDATE wallet_link SET session_id = ?, encrypted_secret = ?, wallet_address = NULL, \
             network = NULL, app_name = NULL, connected = 0, date_updated = CURRENT_TIMESTAMP \
             WHERE discord_id = ?",
        )
        .bind(session_id)
        .bind(encrypted_secret)
        .bind(discord_id)
        .execute(pool)
        .await?;
    } else {
        sqlx::query(
            "INSERT INTO wallet_link (discord_id, session_id, encrypted_secret) VALUES (?, ?, ?)",
        )
        .bind(discord_id)
        .bind(session_id)
        .bind(encrypted_secret)
        .execute(pool)
        .await?;
    }

    Ok(())
}

/// Record the latest polled session state
pub async fn update_state(
    pool: &MySqlPool,
    discord_id: i64,
    connected: bool,
    address: Option<&str>,
    network: Option<&str>,
    app_name: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE wallet_link SET connected = ?, wallet_address = ?, network = ?, app_name = ?, \
         date_updated = CURRENT_TIMESTAMP WHERE discord_id = ?",
    )
    .bind(connected)
    .bind(address)
    .bind(network)
    .bind(app_name)
    .bind(discord_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Remove a user's wallet link entirely
pub async fn delete_link(pool: &MySqlPool, discord_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM wallet_link WHERE discord_id = ?")
        .bind(discord_id)
        .execute(pool)
        .await?;

    Ok(())
}
