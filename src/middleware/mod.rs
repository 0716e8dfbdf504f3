//! Request guards for the admin API.
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. [`AuthAdmin`](auth::AuthAdmin) verifies the token and validates the
//!    embedded admin record
//! 3. Extractors generated by [`require_permission!`](crate::require_permission)
//!    check one permission against the admin's effective set
//! 4. Handler executes if all checks pass
//!
//! # Example
//!
//! ```ignore
//! use parkgolf_admin::middleware::auth::{AuthAdmin, RequireManageAdmins};
//!
//! async fn profile(auth: AuthAdmin) -> impl IntoResponse {
//!     Json(auth.admin().display_info())
//! }
//!
//! async fn deactivate(RequireManageAdmins(auth): RequireManageAdmins) -> impl IntoResponse {
//!     // Only executes if the admin holds MANAGE_ADMINS
//! }
//! ```

pub mod auth;
