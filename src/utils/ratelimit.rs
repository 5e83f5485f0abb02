use lazy_static::lazy_static;
use serenity::model::id::UserId;
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

lazy_static! {
    static ref COMMAND_COOLDOWNS: Mutex<HashMap<(UserId, String), u64>> =
        Mutex::new(HashMap::new());

    // Track when we last warned a user about cooldown (to avoid message spam)
    // Key: (UserId, command), Value: timestamp of last warning
    static ref COOLDOWN_WARNINGS: Mutex<HashMap<(UserId, String), u64>> =
        Mutex::new(HashMap::new());
}

const COOLDOWN_SECONDS: u64 = 5;

/// Check if a user can execute a command (cooldown not active)
/// Returns Ok(()) if cooldown has passed
/// Returns Err((remaining_seconds, should_send_warning_message)) if still on cooldown
/// The boolean indicates if we should send a warning (true on first violation, false on retries)
pub async fn check_cooldown(user_id: UserId, command: &str) -> Result<(), (u64, bool)> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let key = (user_id, command.to_string());

    let mut cooldowns = COMMAND_COOLDOWNS.lock().await;
    if let Some(&last_time) = cooldowns.get(&key) {
        let elapsed = now.saturating_sub(last_time);
        if elapsed < COOLDOWN_SECONDS {
            let remaining = COOLDOWN_SECONDS - elapsed;

            // Only warn once per cooldown period
            let mut warnings = COOLDOWN_WARNINGS.lock().await;
            let should_warn = match warnings.get(&key) {
                Some(&last_warning) => last_warning < last_time,
                None => true,
            };
            if should_warn {
                warnings.insert(key.clone(), now);
            }

            return Err((remaining, should_warn));
        }
    }
    cooldowns.insert(key, now);
    Ok(())
}

/// Get the cooldown seconds constant
pub fn get_cooldown_seconds() -> u64 {
    COOLDOWN_SECONDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_invocation_passes() {
        let user = UserId::new(90_001);
        assert!(check_cooldown(user, "$test_first").await.is_ok());
    }

    #[tokio::test]
    async fn test_second_invocation_is_on_cooldown() {
        let user = UserId::new(90_002);
        assert!(check_cooldown(user, "$test_second").await.is_ok());

        let err = check_cooldown(user, "$test_second").await.unwrap_err();
        let (remaining, should_warn) = err;
        assert!(remaining <= COOLDOWN_SECONDS);
        assert!(should_warn);

        // A retry during the same cooldown period does not warn again
        let (_, should_warn_again) = check_cooldown(user, "$test_second").await.unwrap_err();
        assert!(!should_warn_again);
    }

    #[tokio::test]
    async fn test_cooldowns_are_per_command() {
        let user = UserId::new(90_003);
        assert!(check_cooldown(user, "$test_a").await.is_ok());
        assert!(check_cooldown(user, "$test_b").await.is_ok());
    }
}
