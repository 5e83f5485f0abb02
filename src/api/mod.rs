pub mod bridge;
pub mod toncenter;
