pub mod client;
pub mod models;

pub use client::ToncenterClient;
pub use models::{ApiError, RawTransaction};
