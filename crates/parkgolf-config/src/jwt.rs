use std::env;

use crate::env_or;

/// Settings for verifying access tokens issued by the identity service.
///
/// Tokens are only decoded here; issuing and refreshing them is the identity
/// service's job.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Clock skew tolerated when checking `exp`, in seconds.
    pub leeway_secs: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "your-secret-key-change-in-production".to_string(),
            leeway_secs: 30,
        }
    }
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: env::var("JWT_SECRET").unwrap_or(defaults.secret),
            leeway_secs: env_or("JWT_LEEWAY_SECS", defaults.leeway_secs),
        }
    }
}
