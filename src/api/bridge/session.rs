//! Persistence of wallet links
//!
//! A wallet link is the durable record behind "connected": the bridge
//! session id, its bearer secret (AES-GCM encrypted at rest) and the last
//! known wallet identity.

use sqlx::mysql::MySqlPool;

use super::models::{SessionCreated, SessionState};
use crate::db;
use crate::utils::encryption::{decrypt_secret, encrypt_secret};
use crate::utils::errors::WalletError;

/// A user's stored wallet link with the secret already decrypted
#[derive(Debug, Clone)]
pub struct WalletLink {
    pub session_id: String,
    pub secret: String,
    pub connected: bool,
    pub address: Option<String>,
    pub network: Option<String>,
    pub app_name: Option<String>,
}

/// DB-backed store for wallet links, one per Discord user
pub struct SessionStore {
    pool: MySqlPool,
    encryption_key: String,
}

impl SessionStore {
    pub fn new(pool: MySqlPool, encryption_key: String) -> Self {
        Self {
            pool,
            encryption_key,
        }
    }

    /// Load and decrypt the link for a user, if one exists
    pub async fn load(&self, discord_id: u64) -> Result<Option<WalletLink>, WalletError> {
        let row = db::wallet_link::get_link(&self.pool, discord_id as i64)
            .await
            .map_err(|e| WalletError::ReadFailed(format!("Database error: {}", e)))?;

        let Some((session_id, encrypted_secret, address, network, app_name, connected)) = row
        else {
            return Ok(None);
        };

        let secret = decrypt_secret(&encrypted_secret, &self.encryption_key)
            .map_err(|e| WalletError::ReadFailed(format!("Secret decryption failed: {}", e)))?;

        Ok(Some(WalletLink {
            session_id,
            secret,
            connected,
            address,
            network,
            app_name,
        }))
    }

    /// Persist a freshly created pairing session, replacing any previous link
    pub async fn save_new(
        &self,
        discord_id: u64,
        session: &SessionCreated,
    ) -> Result<(), WalletError> {
        let encrypted = encrypt_secret(&session.secret, &self.encryption_key)
            .map_err(|e| WalletError::SubmissionFailed(format!("Secret encryption failed: {}", e)))?;

        db::wallet_link::upsert_link(
            &self.pool,
            discord_id as i64,
            &session.session_id,
            &encrypted,
        )
        .await
        .map_err(|e| WalletError::SubmissionFailed(format!("Database error: {}", e)))
    }

    /// Record the latest polled session state
    pub async fn apply_state(
        &self,
        discord_id: u64,
        state: &SessionState,
    ) -> Result<(), WalletError> {
        db::wallet_link::update_state(
            &self.pool,
            discord_id as i64,
            state.is_connected(),
            state.address.as_deref(),
            state.network.as_deref(),
            state.app_name.as_deref(),
        )
        .await
        .map_err(|e| WalletError::ReadFailed(format!("Database error: {}", e)))
    }

    /// Drop the stored link entirely
    pub async fn clear(&self, discord_id: u64) -> Result<(), WalletError> {
        db::wallet_link::delete_link(&self.pool, discord_id as i64)
            .await
            .map_err(|e| WalletError::SubmissionFailed(format!("Database error: {}", e)))
    }
}
