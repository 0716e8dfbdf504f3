//! One-time migration of the flat legacy role model.
//!
//! Older dashboard screens stored admins with a flat role
//! (`VIEWER`/`MODERATOR`/`ADMIN`/`SUPER_ADMIN`) and CRUD-style permissions
//! such as `BOOKING_WRITE`. Those admins were platform staff. [`migrate_admin`]
//! converts such a record into a hierarchical [`Admin`] once; nothing at
//! runtime reads the legacy model.
//!
//! | Legacy role   | Hierarchical role  |
//! |---------------|--------------------|
//! | `SUPER_ADMIN` | `PLATFORM_OWNER`   |
//! | `ADMIN`       | `PLATFORM_ADMIN`   |
//! | `MODERATOR`   | `PLATFORM_SUPPORT` |
//! | `VIEWER`      | `PLATFORM_ANALYST` |
//!
//! Legacy permissions that map to something outside the new role's default
//! set are reported in [`Migration::dropped`] instead of being carried over.

use parkgolf_core::errors::AuthError;
use parkgolf_core::permissions::{Permission, PermissionSet};
use serde::{Deserialize, Serialize};

use crate::admins::{Admin, AdminRecord};
use crate::ids::AdminId;
use crate::roles::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegacyRole {
    SuperAdmin,
    Admin,
    Moderator,
    Viewer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegacyPermission {
    AdminRead,
    AdminWrite,
    AdminDelete,
    CourseRead,
    CourseWrite,
    CourseDelete,
    UserRead,
    UserWrite,
    UserDelete,
    SystemRead,
    SystemWrite,
    SystemSettings,
    BookingRead,
    BookingWrite,
    BookingDelete,
    TimeslotRead,
    TimeslotWrite,
    TimeslotDelete,
}

impl LegacyRole {
    /// Hierarchical role a legacy role migrates to.
    pub const fn target_role(self) -> Role {
        match self {
            LegacyRole::SuperAdmin => Role::PlatformOwner,
            LegacyRole::Admin => Role::PlatformAdmin,
            LegacyRole::Moderator => Role::PlatformSupport,
            LegacyRole::Viewer => Role::PlatformAnalyst,
        }
    }

    /// Permission group the legacy role screen assigned by default.
    pub fn default_permissions(self) -> &'static [LegacyPermission] {
        use LegacyPermission::*;
        match self {
            LegacyRole::SuperAdmin => &[
                CourseRead,
                CourseWrite,
                CourseDelete,
                BookingRead,
                BookingWrite,
                BookingDelete,
                AdminRead,
                AdminWrite,
                AdminDelete,
                SystemSettings,
            ],
            LegacyRole::Admin => &[
                CourseRead,
                CourseWrite,
                CourseDelete,
                BookingRead,
                BookingWrite,
                BookingDelete,
                AdminRead,
            ],
            LegacyRole::Moderator => &[CourseRead, BookingRead, BookingWrite],
            LegacyRole::Viewer => &[CourseRead, BookingRead],
        }
    }
}

impl LegacyPermission {
    /// Hierarchical permission a legacy permission maps to.
    ///
    /// Reads collapse onto `READ_ONLY`; writes and deletes onto the matching
    /// `MANAGE_*` permission.
    pub const fn target_permission(self) -> Permission {
        use LegacyPermission::*;
        match self {
            AdminRead | CourseRead | UserRead | BookingRead | TimeslotRead => Permission::ReadOnly,
            AdminWrite | AdminDelete => Permission::ManageAdmins,
            CourseWrite | CourseDelete => Permission::ManageCourses,
            UserWrite | UserDelete => Permission::ManageUsers,
            BookingWrite | BookingDelete => Permission::ManageBookings,
            TimeslotWrite | TimeslotDelete => Permission::ManageTimeslots,
            SystemRead => Permission::ViewDashboard,
            SystemWrite | SystemSettings => Permission::PlatformSystemConfig,
        }
    }
}

/// Admin record in the flat legacy model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyAdmin {
    pub id: AdminId,
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: LegacyRole,
    #[serde(default)]
    pub permissions: Vec<LegacyPermission>,
    pub is_active: bool,
}

/// Outcome of migrating one legacy admin.
#[derive(Debug, Clone, PartialEq)]
pub struct Migration {
    pub admin: Admin,
    /// Legacy permissions with no counterpart in the new role's defaults.
    pub dropped: Vec<LegacyPermission>,
}

/// Converts a legacy admin into the hierarchical model.
///
/// A legacy admin that used its role's permission group (an empty list or
/// exactly the group) migrates to an empty explicit list, i.e. the new
/// role's defaults. A customized list is mapped permission by permission;
/// if nothing survives the mapping the record is rejected for manual review
/// rather than silently widened to the role defaults.
pub fn migrate_admin(legacy: LegacyAdmin) -> Result<Migration, AuthError> {
    let role = legacy.role.target_role();
    let allowed = role.default_permissions();

    let mut permissions = PermissionSet::empty();
    let mut dropped = Vec::new();
    if !uses_role_group(&legacy) {
        for permission in &legacy.permissions {
            let target = permission.target_permission();
            if allowed.contains(target) {
                permissions.insert(target);
            } else {
                dropped.push(*permission);
            }
        }

        if permissions.is_empty() {
            return Err(AuthError::invalid_record(format!(
                "No permission of legacy admin {} maps onto role {}",
                legacy.id, role
            )));
        }
    }

    let mut record = AdminRecord::new(legacy.id, legacy.username, role)
        .with_email(legacy.email)
        .with_name(legacy.name)
        .with_permissions(permissions);
    record.is_active = legacy.is_active;

    Ok(Migration {
        admin: Admin::try_from(record)?,
        dropped,
    })
}

fn uses_role_group(legacy: &LegacyAdmin) -> bool {
    let group = legacy.role.default_permissions();
    legacy.permissions.is_empty()
        || (legacy.permissions.iter().all(|p| group.contains(p))
            && group.iter().all(|p| legacy.permissions.contains(p)))
}
