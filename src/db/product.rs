use sqlx::mysql::MySqlPool;

/// Get all shop products - returns (id, name, description, price_ton)
pub async fn list_products(
    pool: &MySqlPool,
) -> Result<Vec<(String, String, String, f64)>, sqlx::Error> {
    sqlx::query_as::<_, (String, String, String, f64)>(
        "SELECT id, name, description, CAST(price_ton AS DOUBLE) FROM product ORDER BY price_ton",
    )
    .fetch_all(pool)
    .await
}

/// Get a single product by id
pub async fn get_product(
    pool: &MySqlPool,
    id: &str,
) -> Result<Option<(String, String, String, f64)>, sqlx::Error> {
    sqlx::query_as::<_, (String, String, String, f64)>(
        "SELECT id, name, description, CAST(price_ton AS DOUBLE) FROM product WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
