//! # Park Golf Auth
//!
//! The authorization core of the Park Golf admin platform.
//!
//! Every function here is a pure, synchronous decision over an [`Admin`]
//! value passed in by the caller. An absent admin (`None`) or an inactive one
//! is treated as having no access at all, so "not signed in" and "not
//! allowed" look the same to callers.
//!
//! - [`scope`]: Which companies and courses an admin may touch
//! - [`engine`]: Permission checks over the effective permission set
//! - [`management`]: Whether one admin may create, edit, reassign, or deactivate another
//! - [`claims`] / [`jwt`]: Decoded access-token claims as an alternative admin source
//!
//! # Example
//!
//! ```ignore
//! use parkgolf_auth::{can_access_company, can_manage_admin, has_permission};
//! use parkgolf_core::Permission;
//!
//! let current = session.current();
//! if has_permission(current.as_deref(), Permission::ManageCourses)
//!     && can_access_company(current.as_deref(), company_id)
//! {
//!     // render the course editor
//! }
//! ```
//!
//! [`Admin`]: parkgolf_models::Admin

pub mod claims;
pub mod engine;
pub mod jwt;
pub mod management;
pub mod scope;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use engine::{
    effective_permissions, has_all_permissions, has_any_permission, has_permission,
    require_permission,
};
pub use jwt::verify_token;
pub use management::{
    ManagementAction, assignable_roles, authorize, can_add_admin_to_company, can_assign_role,
    can_manage_admin,
};
pub use scope::{
    Accessible, accessible_companies, accessible_courses, can_access_company, can_access_course,
};

use parkgolf_models::Admin;

/// Narrows an optional admin to an active one.
///
/// Every decision starts here so inactive admins drop out of all checks.
#[inline]
pub(crate) fn active<'a>(admin: impl Into<Option<&'a Admin>>) -> Option<&'a Admin> {
    admin.into().filter(|a| a.is_active())
}
