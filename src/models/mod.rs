//! Data models for GRAM commands and services
//!
//! This module organizes the result and data transfer structs used across
//! commands. Each model represents the output/response of a service
//! operation or a payload handed to an external boundary.

pub mod notification;
pub mod ping;
pub mod purchase;
pub mod snapshot;
pub mod transfer;

// Re-export commonly used types for convenience
pub use notification::{connection_prompt, report, OutcomeNotification, Severity};
pub use ping::PingMetrics;
pub use purchase::{Product, PurchaseResult};
pub use snapshot::{TransactionRecord, WalletSnapshot};
pub use transfer::{
    floor_to_nano, TransferMessage, TransferReceipt, TransferRequest, TRANSFER_TTL_SECS,
};
