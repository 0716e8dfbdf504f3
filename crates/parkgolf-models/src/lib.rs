//! # Park Golf Models
//!
//! Domain models for the Park Golf admin platform.
//!
//! This crate provides the data the authorization core reasons about:
//!
//! - [`ids`]: Strongly-typed admin, company, and course ids
//! - [`roles`]: The role registry (scope, rank, default permissions per role)
//! - [`admins`]: Admin records and the validation boundary that turns a wire
//!   record into a trusted [`Admin`]
//! - [`legacy`]: One-time migration of the flat VIEWER/MODERATOR/ADMIN/SUPER_ADMIN model
//!
//! # Example
//!
//! ```ignore
//! use parkgolf_models::{Admin, AdminRecord, Role};
//! use parkgolf_models::ids::{AdminId, CompanyId};
//!
//! let admin = Admin::try_from(
//!     AdminRecord::new(AdminId(7), "kim", Role::CompanyOwner).with_company(CompanyId(1)),
//! )?;
//! assert_eq!(admin.scope(), Scope::Company);
//! ```

pub mod admins;
pub mod ids;
pub mod legacy;
pub mod roles;

// Re-export commonly used types at crate root for convenience
pub use admins::{Admin, AdminPatch, AdminRecord, DisplayInfo, validate_permissions};
pub use ids::{AdminId, CompanyId, CourseId};
pub use legacy::{LegacyAdmin, LegacyPermission, LegacyRole, Migration, migrate_admin};
pub use roles::{Role, RoleDefinition, Scope, Tier};
