//! Permission decisions.
//!
//! An admin's effective permissions are its explicit list, or the role's
//! defaults when the explicit list is empty, closed under the umbrella
//! grants:
//!
//! - `PLATFORM_ALL` implies every permission
//! - `COMPANY_ALL` implies every COMPANY group permission
//!
//! The query functions (`has_*`) are side-effect free. [`require_permission`]
//! is the gate used by command handlers and records denials.

use parkgolf_core::errors::AuthError;
use parkgolf_core::permissions::{Permission, PermissionGroup, PermissionSet};
use parkgolf_models::Admin;
use tracing::debug;

use crate::active;

/// The closed set of permissions an admin holds.
///
/// Empty for absent or inactive admins.
pub fn effective_permissions<'a>(admin: impl Into<Option<&'a Admin>>) -> PermissionSet {
    let Some(admin) = active(admin) else {
        return PermissionSet::empty();
    };

    let explicit = admin.explicit_permissions();
    let base = if explicit.is_empty() {
        admin.role().default_permissions()
    } else {
        explicit
    };

    close(base)
}

fn close(mut set: PermissionSet) -> PermissionSet {
    if set.contains(Permission::PlatformAll) {
        return PermissionSet::all();
    }
    if set.contains(Permission::CompanyAll) {
        set = set.union(PermissionSet::of_group(PermissionGroup::Company));
    }
    set
}

pub fn has_permission<'a>(admin: impl Into<Option<&'a Admin>>, permission: Permission) -> bool {
    effective_permissions(admin).contains(permission)
}

/// True if the admin holds at least one of `permissions`.
///
/// An empty request is `false`.
pub fn has_any_permission<'a>(
    admin: impl Into<Option<&'a Admin>>,
    permissions: &[Permission],
) -> bool {
    let effective = effective_permissions(admin);
    permissions.iter().any(|p| effective.contains(*p))
}

/// True if the admin holds every one of `permissions`.
///
/// An empty request is `true`, but only for a present, active admin.
pub fn has_all_permissions<'a>(
    admin: impl Into<Option<&'a Admin>>,
    permissions: &[Permission],
) -> bool {
    let Some(admin) = active(admin) else {
        return false;
    };
    let effective = effective_permissions(admin);
    permissions.iter().all(|p| effective.contains(*p))
}

/// Fails with [`AuthError::Forbidden`] unless the admin holds `permission`.
pub fn require_permission<'a>(
    admin: impl Into<Option<&'a Admin>>,
    permission: Permission,
) -> Result<(), AuthError> {
    let admin = admin.into();
    if has_permission(admin, permission) {
        return Ok(());
    }

    debug!(
        admin_id = ?admin.map(Admin::id),
        permission = %permission,
        "Permission denied"
    );
    metrics::counter!("authz_denials_total", "check" => "permission").increment(1);
    Err(AuthError::forbidden(format!(
        "Missing permission {}",
        permission
    )))
}
