pub mod encryption;
pub mod errors;
pub mod format;
pub mod ratelimit;
pub mod ton_ratelimit;

pub use errors::WalletError;
pub use format::{format_ton, network_name, truncate_address, NANO_PER_TON};
pub use ratelimit::{check_cooldown, get_cooldown_seconds};
pub use ton_ratelimit::rate_limit_toncenter;
