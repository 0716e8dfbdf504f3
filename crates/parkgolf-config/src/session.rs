//! Session persistence configuration.
//!
//! The session context persists the current admin id and an opaque access
//! token as plain key-value pairs. These settings name the keys and where a
//! file-backed store keeps them.
//!
//! # Environment Variables
//!
//! - `SESSION_STORE_PATH`: JSON file for the file-backed store (default: `storage/session.json`)
//! - `SESSION_ADMIN_KEY`: Key for the current admin id (default: `currentAdminId`)
//! - `SESSION_TOKEN_KEY`: Key for the access token (default: `accessToken`)
//! - `SESSION_REFRESH_KEY`: Key for the refresh token (default: `refreshToken`)

use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub store_path: PathBuf,
    pub admin_id_key: String,
    pub access_token_key: String,
    pub refresh_token_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("storage/session.json"),
            admin_id_key: "currentAdminId".into(),
            access_token_key: "accessToken".into(),
            refresh_token_key: "refreshToken".into(),
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            store_path: env::var("SESSION_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            admin_id_key: env::var("SESSION_ADMIN_KEY").unwrap_or(defaults.admin_id_key),
            access_token_key: env::var("SESSION_TOKEN_KEY").unwrap_or(defaults.access_token_key),
            refresh_token_key: env::var("SESSION_REFRESH_KEY")
                .unwrap_or(defaults.refresh_token_key),
        }
    }

    /// Every key the session owns; logout clears all of them.
    pub fn owned_keys(&self) -> [&str; 3] {
        [
            self.admin_id_key.as_str(),
            self.access_token_key.as_str(),
            self.refresh_token_key.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys() {
        let config = SessionConfig::default();
        assert_eq!(
            config.owned_keys(),
            ["currentAdminId", "accessToken", "refreshToken"]
        );
    }
}
