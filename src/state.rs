use parkgolf_config::{GatewayConfig, JwtConfig, SessionConfig};

/// Shared state for request extractors.
#[derive(Clone, Debug)]
pub struct AppState {
    pub jwt_config: JwtConfig,
    pub gateway_config: GatewayConfig,
    pub session_config: SessionConfig,
}

impl AppState {
    pub fn from_env() -> Self {
        Self {
            jwt_config: JwtConfig::from_env(),
            gateway_config: GatewayConfig::from_env(),
            session_config: SessionConfig::from_env(),
        }
    }
}
