//! Timeout tiers for calls to the identity service.
//!
//! Every call made through the admin directory gateway is classified into a
//! [`TimeoutTier`]. The tier decides how long the gateway waits before the
//! call is reported as unavailable:
//!
//! - **Quick**: single-record reads and writes (default 5 seconds)
//! - **List**: paginated listings (default 10 seconds)
//! - **Analytics**: aggregations (default 15 seconds)
//!
//! # Configuration
//!
//! - `GATEWAY_QUICK_TIMEOUT_MS`: Quick tier timeout in milliseconds (default: 5000)
//! - `GATEWAY_LIST_TIMEOUT_MS`: List tier timeout in milliseconds (default: 10000)
//! - `GATEWAY_ANALYTICS_TIMEOUT_MS`: Analytics tier timeout in milliseconds (default: 15000)
//!
//! # Example
//!
//! ```ignore
//! use parkgolf_config::{GatewayConfig, TimeoutTier};
//!
//! let config = GatewayConfig::from_env();
//! let budget = config.timeout_for(TimeoutTier::Quick);
//! ```

use std::time::Duration;

use crate::env_or;

/// Class of gateway call, used to pick a timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutTier {
    Quick,
    List,
    Analytics,
}

/// Gateway timeout configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
    pub quick_timeout: Duration,
    pub list_timeout: Duration,
    pub analytics_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            quick_timeout: Duration::from_millis(5_000),
            list_timeout: Duration::from_millis(10_000),
            analytics_timeout: Duration::from_millis(15_000),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            quick_timeout: Duration::from_millis(env_or(
                "GATEWAY_QUICK_TIMEOUT_MS",
                defaults.quick_timeout.as_millis() as u64,
            )),
            list_timeout: Duration::from_millis(env_or(
                "GATEWAY_LIST_TIMEOUT_MS",
                defaults.list_timeout.as_millis() as u64,
            )),
            analytics_timeout: Duration::from_millis(env_or(
                "GATEWAY_ANALYTICS_TIMEOUT_MS",
                defaults.analytics_timeout.as_millis() as u64,
            )),
        }
    }

    /// Timeout budget for a call of the given tier.
    pub fn timeout_for(&self, tier: TimeoutTier) -> Duration {
        match tier {
            TimeoutTier::Quick => self.quick_timeout,
            TimeoutTier::List => self.list_timeout,
            TimeoutTier::Analytics => self.analytics_timeout,
        }
    }
}
