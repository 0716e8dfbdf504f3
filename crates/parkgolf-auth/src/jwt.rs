//! Access-token verification.
//!
//! Tokens are issued by the identity service with HS256. This module only
//! verifies them and hands back the [`Claims`]; turning claims into an
//! [`Admin`](parkgolf_models::Admin) goes through [`Claims::into_admin`].

use jsonwebtoken::{DecodingKey, Validation, decode};
use parkgolf_config::JwtConfig;
use parkgolf_core::errors::AuthError;
use tracing::debug;

use crate::claims::Claims;

/// Verifies an access token and returns the embedded claims.
///
/// A bad signature, an expired token, and a malformed token all fail with
/// [`AuthError::NotFound`], the same generic outcome as an unknown admin.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AuthError> {
    let mut validation = Validation::default();
    validation.leeway = jwt_config.leeway_secs;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!(error = %e, "Rejected access token");
        AuthError::NotFound
    })
}
