use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::Aes256Gcm;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::RngCore;
use thiserror::Error;

type Nonce = [u8; 12];

/// Cryptographic errors
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("Encryption failed: {0}")]
    Encryption(String),
    #[error("Decryption failed: {0}")]
    Decryption(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Hex decode error: {0}")]
    HexDecode(String),
    #[error("Base64 decode error: {0}")]
    Base64Decode(String),
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(String),
}

fn load_key(key_hex: &str) -> Result<[u8; 32], CryptoError> {
    let key_bytes = hex::decode(key_hex).map_err(|e| CryptoError::HexDecode(e.to_string()))?;

    if key_bytes.len() != 32 {
        return Err(CryptoError::InvalidKey(
            "Encryption key must be 32 bytes (256 bits)".to_string(),
        ));
    }

    key_bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidKey("Key conversion failed".to_string()))
}

/// Encrypt a bridge session secret using AES256-GCM with versioning.
/// Returns base64-encoded data: `[version_byte][nonce(12)][ciphertext]`
pub fn encrypt_secret(secret: &str, key_hex: &str) -> Result<String, CryptoError> {
    let key = load_key(key_hex)?;
    let cipher = Aes256Gcm::new(&key.into());

    // Random 12-byte GCM nonce from the OS RNG
    let mut nonce_bytes: Nonce = [0u8; 12];
    rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);

    let ciphertext = cipher
        .encrypt((&nonce_bytes).into(), secret.as_bytes())
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;

    // Versioned format: [version_byte][nonce(12)][ciphertext]
    let mut encrypted_data = Vec::with_capacity(1 + 12 + ciphertext.len());
    encrypted_data.push(0x01); // Version 1
    encrypted_data.extend_from_slice(&nonce_bytes);
    encrypted_data.extend_from_slice(&ciphertext);

    Ok(BASE64.encode(encrypted_data))
}

/// Decrypt a bridge session secret stored by [`encrypt_secret`]
pub fn decrypt_secret(encrypted_b64: &str, key_hex: &str) -> Result<String, CryptoError> {
    let encrypted_data = BASE64
        .decode(encrypted_b64)
        .map_err(|e| CryptoError::Base64Decode(e.to_string()))?;

    if encrypted_data.len() < 13 {
        return Err(CryptoError::InvalidData(
            "Encrypted data too short (need at least 1 + 12 bytes for version + nonce)"
                .to_string(),
        ));
    }

    let version = encrypted_data[0];
    if version != 0x01 {
        return Err(CryptoError::InvalidData(format!(
            "Unsupported encryption version: {}",
            version
        )));
    }

    let nonce: Nonce = encrypted_data[1..13]
        .try_into()
        .map_err(|_| CryptoError::InvalidData("Failed to extract nonce".to_string()))?;
    let ciphertext = &encrypted_data[13..];

    let key = load_key(key_hex)?;
    let cipher = Aes256Gcm::new(&key.into());

    let plaintext = cipher
        .decrypt((&nonce).into(), ciphertext)
        .map_err(|e| CryptoError::Decryption(e.to_string()))?;

    String::from_utf8(plaintext).map_err(|e| CryptoError::Utf8Error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_HEX: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn test_encrypt_decrypt() {
        let secret = "bridge_session_secret_12345";

        let encrypted = encrypt_secret(secret, KEY_HEX).expect("Encryption failed");
        let decrypted = decrypt_secret(&encrypted, KEY_HEX).expect("Decryption failed");

        assert_eq!(secret, decrypted);
    }

    #[test]
    fn test_different_nonces() {
        let secret = "bridge_session_secret_12345";

        let encrypted1 = encrypt_secret(secret, KEY_HEX).expect("Encryption 1 failed");
        let encrypted2 = encrypt_secret(secret, KEY_HEX).expect("Encryption 2 failed");

        // Should be different due to random nonce
        assert_ne!(encrypted1, encrypted2);

        // But both should decrypt to same value
        let decrypted1 = decrypt_secret(&encrypted1, KEY_HEX).expect("Decryption 1 failed");
        let decrypted2 = decrypt_secret(&encrypted2, KEY_HEX).expect("Decryption 2 failed");

        assert_eq!(secret, decrypted1);
        assert_eq!(secret, decrypted2);
    }

    #[test]
    fn test_rejects_short_key() {
        let err = encrypt_secret("secret", "deadbeef").unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKey(_)));
    }

    #[test]
    fn test_rejects_unknown_version() {
        let mut blob = vec![0x02u8];
        blob.extend_from_slice(&[0u8; 12]);
        blob.extend_from_slice(b"junk");
        let encoded = BASE64.encode(blob);

        let err = decrypt_secret(&encoded, KEY_HEX).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidData(_)));
    }
}
