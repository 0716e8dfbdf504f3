//! # Park Golf Config
//!
//! Configuration types for the Park Golf admin platform.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`gateway`]: Timeout tiers for identity-service lookups
//! - [`jwt`]: Access token verification settings
//! - [`session`]: Session persistence settings
//!
//! # Example
//!
//! ```ignore
//! use parkgolf_config::{GatewayConfig, JwtConfig, SessionConfig};
//!
//! // Load all configs from environment
//! let gateway_config = GatewayConfig::from_env();
//! let jwt_config = JwtConfig::from_env();
//! let session_config = SessionConfig::from_env();
//! ```

pub mod gateway;
pub mod jwt;
pub mod session;

// Re-export commonly used types at crate root
pub use gateway::{GatewayConfig, TimeoutTier};
pub use jwt::JwtConfig;
pub use session::SessionConfig;

/// Reads an environment variable and parses it, falling back to `default`
/// when it is missing or malformed.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
