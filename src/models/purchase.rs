//! Shop and purchase models

/// A shop catalogue entry
#[derive(Debug, Clone)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_ton: f64,
}

/// Result of a completed purchase, rendered as the receipt embed
#[derive(Debug, Clone)]
pub struct PurchaseResult {
    pub product: Product,
    pub buyer_id: u64,
    /// Confirmation blob from the signer, empty when none was returned
    pub boc: String,
}
