//! Gateway to the identity service that owns admin records.
//!
//! The authorization core never talks to the identity service directly; it
//! goes through an [`AdminDirectory`]. Implementations report failures as
//! [`LookupError`] and the core treats every variant as "lookup failed".
//!
//! - [`TimedDirectory`] wraps any directory with per-call timeout tiers
//! - [`InMemoryDirectory`] is a process-local directory for tests and demos

use parkgolf_core::errors::LookupError;
use parkgolf_models::{Admin, AdminId, CompanyId};
use std::future::Future;

pub mod memory;
pub mod timed;

pub use memory::InMemoryDirectory;
pub use timed::TimedDirectory;

/// Admin lookups and writes against the identity service.
pub trait AdminDirectory: Send + Sync {
    /// Fetches one admin. Unknown ids fail with [`LookupError::NotFound`].
    fn find_by_id(&self, id: AdminId) -> impl Future<Output = Result<Admin, LookupError>> + Send;

    /// Resolves a username and password to an admin id.
    ///
    /// Wrong credentials fail with [`LookupError::NotFound`].
    fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<AdminId, LookupError>> + Send;

    /// Revokes the admin's server-side session. Best effort.
    fn revoke_session(&self, id: AdminId) -> impl Future<Output = Result<(), LookupError>> + Send;

    /// Lists admins, optionally restricted to one company.
    fn list(
        &self,
        company_id: Option<CompanyId>,
    ) -> impl Future<Output = Result<Vec<Admin>, LookupError>> + Send;

    /// Stores a new admin. The directory assigns the id.
    fn create(
        &self,
        admin: Admin,
        password: &str,
    ) -> impl Future<Output = Result<Admin, LookupError>> + Send;

    /// Replaces an existing admin record.
    fn update(&self, admin: Admin) -> impl Future<Output = Result<Admin, LookupError>> + Send;

    fn deactivate(&self, id: AdminId) -> impl Future<Output = Result<Admin, LookupError>> + Send;
}
