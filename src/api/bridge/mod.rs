pub mod connector;
pub mod models;
pub mod session;

pub use connector::{BridgeConnector, WalletConnector};
pub use models::LinkState;
pub use session::SessionStore;
