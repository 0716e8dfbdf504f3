//! # Park Golf Core
//!
//! Core types, errors, and the permission catalog for the Park Golf admin
//! platform.
//!
//! This crate provides foundational types used throughout the workspace:
//!
//! - [`errors`]: Authorization error taxonomy and the HTTP-facing [`AppError`]
//! - [`permissions`]: The closed permission catalog and [`PermissionSet`]
//!
//! # Example
//!
//! ```ignore
//! use parkgolf_core::permissions::{Permission, PermissionSet};
//! use parkgolf_core::errors::AuthError;
//!
//! let granted: PermissionSet = [Permission::ManageCourses, Permission::ReadOnly]
//!     .into_iter()
//!     .collect();
//!
//! if !granted.contains(Permission::ManageAdmins) {
//!     return Err(AuthError::forbidden("MANAGE_ADMINS required"));
//! }
//! ```

pub mod errors;
pub mod permissions;

// Re-export commonly used types at crate root
pub use errors::{AppError, AuthError, LookupError};
pub use permissions::{Permission, PermissionGroup, PermissionSet};
