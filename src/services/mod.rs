pub mod ping_service;
pub mod purchase_service;
pub mod snapshot_service;
pub mod transfer_service;
