//! Admin records and their validation boundary.
//!
//! [`AdminRecord`] is the shape the identity service sends over the wire. It
//! is untrusted: [`Admin::try_from`] checks every structural invariant and is
//! the only way to obtain an [`Admin`]. Downstream code can therefore rely on:
//!
//! - the scope always matching the role registry
//! - COMPANY and COURSE scoped admins always carrying a company id
//! - COURSE scoped admins always carrying at least one course id
//! - explicit permissions never exceeding the role's default set
//!
//! Explicit permissions outside the role's defaults are clamped away (and
//! logged) rather than rejected, so a stale record from the identity service
//! cannot grant more than its role allows. Commands that write new
//! permission lists reject such lists outright via [`validate_permissions`].

use chrono::{DateTime, Utc};
use parkgolf_core::errors::AuthError;
use parkgolf_core::permissions::PermissionSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;
use validator::Validate;

use crate::ids::{AdminId, CompanyId, CourseId};
use crate::roles::{Role, Scope};

/// Admin record as exchanged with the identity service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdminRecord {
    pub id: AdminId,
    #[validate(length(
        min = 1,
        max = 50,
        message = "Username must be between 1 and 50 characters"
    ))]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(max = 100, message = "Name must not exceed 100 characters"))]
    pub name: String,
    pub role: Role,
    /// Scope as reported by the sender. Must agree with the role if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    #[serde(default)]
    pub permissions: PermissionSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<CompanyId>,
    #[serde(default)]
    pub course_ids: BTreeSet<CourseId>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl AdminRecord {
    /// Start a record for an active admin with no company binding.
    pub fn new(id: AdminId, username: impl Into<String>, role: Role) -> Self {
        let username = username.into();
        Self {
            id,
            email: format!("{}@parkgolf.local", username),
            name: username.clone(),
            username,
            role,
            scope: None,
            permissions: PermissionSet::empty(),
            company_id: None,
            course_ids: BTreeSet::new(),
            is_active: true,
            last_login_at: None,
        }
    }

    pub fn with_company(mut self, company_id: CompanyId) -> Self {
        self.company_id = Some(company_id);
        self
    }

    pub fn with_courses(mut self, course_ids: impl IntoIterator<Item = CourseId>) -> Self {
        self.course_ids = course_ids.into_iter().collect();
        self
    }

    pub fn with_permissions(mut self, permissions: PermissionSet) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// A validated administrator.
///
/// Fields are private so the invariants checked at construction hold for
/// the lifetime of the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AdminRecord", into = "AdminRecord")]
pub struct Admin {
    id: AdminId,
    username: String,
    email: String,
    name: String,
    role: Role,
    permissions: PermissionSet,
    company_id: Option<CompanyId>,
    course_ids: BTreeSet<CourseId>,
    is_active: bool,
    last_login_at: Option<DateTime<Utc>>,
}

/// Rejects an explicit permission list that exceeds the role's defaults.
pub fn validate_permissions(role: Role, permissions: PermissionSet) -> Result<(), AuthError> {
    let extra = permissions.difference(role.default_permissions());
    if extra.is_empty() {
        Ok(())
    } else {
        Err(AuthError::invalid_record(format!(
            "Permissions {:?} are not allowed for role {}",
            extra, role
        )))
    }
}

impl TryFrom<AdminRecord> for Admin {
    type Error = AuthError;

    fn try_from(record: AdminRecord) -> Result<Self, Self::Error> {
        record
            .validate()
            .map_err(|e| AuthError::invalid_record(e.to_string()))?;

        let scope = record.role.scope();
        if let Some(reported) = record.scope {
            if reported != scope {
                return Err(AuthError::invalid_record(format!(
                    "Scope {} does not match role {} (expected {})",
                    reported, record.role, scope
                )));
            }
        }

        if scope != Scope::Platform && record.company_id.is_none() {
            return Err(AuthError::invalid_record(format!(
                "{} scoped admin {} requires a company id",
                scope, record.id
            )));
        }

        if scope == Scope::Course && record.course_ids.is_empty() {
            return Err(AuthError::invalid_record(format!(
                "COURSE scoped admin {} requires at least one course id",
                record.id
            )));
        }

        let allowed = record.role.default_permissions();
        let extra = record.permissions.difference(allowed);
        let kept = record.permissions.intersection(allowed);
        // An empty explicit list means "role defaults", so a list that
        // clamps to nothing must not be widened into one.
        if !record.permissions.is_empty() && kept.is_empty() {
            return Err(AuthError::invalid_record(format!(
                "No explicit permission of admin {} is allowed for role {}",
                record.id, record.role
            )));
        }
        if !extra.is_empty() {
            warn!(
                admin_id = %record.id,
                role = %record.role,
                dropped = ?extra,
                "Dropping explicit permissions outside role defaults"
            );
        }

        Ok(Admin {
            id: record.id,
            username: record.username,
            email: record.email,
            name: record.name,
            role: record.role,
            permissions: kept,
            company_id: record.company_id,
            course_ids: record.course_ids,
            is_active: record.is_active,
            last_login_at: record.last_login_at,
        })
    }
}

impl From<Admin> for AdminRecord {
    fn from(admin: Admin) -> Self {
        let scope = Some(admin.scope());
        AdminRecord {
            id: admin.id,
            username: admin.username,
            email: admin.email,
            name: admin.name,
            role: admin.role,
            scope,
            permissions: admin.permissions,
            company_id: admin.company_id,
            course_ids: admin.course_ids,
            is_active: admin.is_active,
            last_login_at: admin.last_login_at,
        }
    }
}

impl Admin {
    pub fn id(&self) -> AdminId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Always equal to the role registry's scope for [`Admin::role`].
    pub fn scope(&self) -> Scope {
        self.role.scope()
    }

    /// Explicit permission override. Empty means "use role defaults".
    pub fn explicit_permissions(&self) -> PermissionSet {
        self.permissions
    }

    pub fn company_id(&self) -> Option<CompanyId> {
        self.company_id
    }

    pub fn course_ids(&self) -> &BTreeSet<CourseId> {
        &self.course_ids
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    /// Records a successful login.
    pub fn touch_login(&mut self, at: DateTime<Utc>) {
        self.last_login_at = Some(at);
    }

    /// Deactivates the admin. Deactivation is terminal.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn display_info(&self) -> DisplayInfo {
        DisplayInfo {
            name: self.name.clone(),
            role: self.role.label().to_string(),
            scope: self.scope().to_string(),
            company_id: self.company_id,
        }
    }
}

/// Partial update to an admin. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdminPatch {
    #[validate(length(max = 100, message = "Name must not exceed 100 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub role: Option<Role>,
    pub permissions: Option<PermissionSet>,
    pub company_id: Option<CompanyId>,
    pub course_ids: Option<BTreeSet<CourseId>>,
}

impl AdminPatch {
    /// True when the patch moves the admin to another company or course set.
    pub fn is_reassignment(&self) -> bool {
        self.company_id.is_some() || self.course_ids.is_some()
    }

    /// Applies the patch and re-validates the result.
    ///
    /// Unlike records read from the identity service, a patch carrying
    /// permissions outside the resulting role's defaults is rejected.
    pub fn apply(&self, admin: &Admin) -> Result<Admin, AuthError> {
        self.validate()
            .map_err(|e| AuthError::invalid_record(e.to_string()))?;

        let mut record = AdminRecord::from(admin.clone());
        record.scope = None;

        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(email) = &self.email {
            record.email = email.clone();
        }
        if let Some(role) = self.role {
            record.role = role;
            // A role change without a new list falls back to the new role's defaults.
            if self.permissions.is_none() {
                record.permissions = PermissionSet::empty();
            }
        }
        if let Some(permissions) = self.permissions {
            validate_permissions(record.role, permissions)?;
            record.permissions = permissions;
        }
        if let Some(company_id) = self.company_id {
            record.company_id = Some(company_id);
        }
        if let Some(course_ids) = &self.course_ids {
            record.course_ids = course_ids.clone();
        }

        Admin::try_from(record)
    }
}

/// Display information for the signed-in admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayInfo {
    pub name: String,
    pub role: String,
    pub scope: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<CompanyId>,
}

impl DisplayInfo {
    /// Placeholder shown while nobody is signed in.
    pub fn anonymous() -> Self {
        Self {
            name: "Login required".to_string(),
            role: String::new(),
            scope: String::new(),
            company_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkgolf_core::permissions::Permission;

    #[test]
    fn test_platform_admin_needs_no_company() {
        let admin = Admin::try_from(AdminRecord::new(AdminId(1), "owner", Role::PlatformOwner))
            .unwrap();
        assert_eq!(admin.scope(), Scope::Platform);
        assert_eq!(admin.company_id(), None);
    }

    #[test]
    fn test_company_scope_requires_company_id() {
        let result = Admin::try_from(AdminRecord::new(AdminId(5), "kim", Role::CompanyOwner));
        assert!(matches!(result, Err(AuthError::InvalidRecord(_))));

        let admin = Admin::try_from(
            AdminRecord::new(AdminId(5), "kim", Role::CompanyOwner).with_company(CompanyId(1)),
        )
        .unwrap();
        assert_eq!(admin.scope(), Scope::Company);
        assert_eq!(admin.company_id(), Some(CompanyId(1)));
    }

    #[test]
    fn test_course_scope_requires_courses() {
        let result = Admin::try_from(
            AdminRecord::new(AdminId(7), "lee", Role::Staff).with_company(CompanyId(1)),
        );
        assert!(matches!(result, Err(AuthError::InvalidRecord(_))));

        let admin = Admin::try_from(
            AdminRecord::new(AdminId(7), "lee", Role::Staff)
                .with_company(CompanyId(1))
                .with_courses([CourseId(10), CourseId(11)]),
        )
        .unwrap();
        assert_eq!(admin.scope(), Scope::Course);
        assert_eq!(admin.course_ids().len(), 2);
    }

    #[test]
    fn test_mismatched_scope_is_rejected() {
        let mut record = AdminRecord::new(AdminId(2), "park", Role::PlatformAdmin);
        record.scope = Some(Scope::Company);
        assert!(matches!(
            Admin::try_from(record),
            Err(AuthError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let record =
            AdminRecord::new(AdminId(2), "park", Role::PlatformAdmin).with_email("not-an-email");
        assert!(matches!(
            Admin::try_from(record),
            Err(AuthError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_permissions_outside_defaults_are_clamped() {
        let record = AdminRecord::new(AdminId(3), "lee", Role::PlatformSupport).with_permissions(
            PermissionSet::from_slice(&[Permission::PlatformSupport, Permission::PlatformAll]),
        );
        let admin = Admin::try_from(record).unwrap();
        assert_eq!(
            admin.explicit_permissions(),
            PermissionSet::from_slice(&[Permission::PlatformSupport])
        );
    }

    #[test]
    fn test_permissions_clamped_to_nothing_are_rejected() {
        let record = AdminRecord::new(AdminId(8), "choi", Role::Staff)
            .with_company(CompanyId(1))
            .with_courses([CourseId(10)])
            .with_permissions(PermissionSet::from_slice(&[Permission::ReadOnly]));
        assert!(matches!(
            Admin::try_from(record),
            Err(AuthError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_unknown_role_fails_deserialization() {
        let json = r#"{"id":1,"username":"x","email":"x@y.com","name":"x","role":"SUPER_ADMIN","isActive":true}"#;
        assert!(serde_json::from_str::<Admin>(json).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"id":5,"username":"kim","email":"kim@gangnam.com","name":"Kim","role":"COMPANY_OWNER","scope":"COMPANY","companyId":1,"isActive":true}"#;
        let admin: Admin = serde_json::from_str(json).unwrap();
        assert_eq!(admin.role(), Role::CompanyOwner);

        let missing_company = r#"{"id":5,"username":"kim","email":"kim@gangnam.com","name":"Kim","role":"COMPANY_OWNER","isActive":true}"#;
        assert!(serde_json::from_str::<Admin>(missing_company).is_err());
    }

    #[test]
    fn test_patch_role_change_resets_permissions() {
        let admin = Admin::try_from(
            AdminRecord::new(AdminId(6), "nam", Role::CompanyManager)
                .with_company(CompanyId(1))
                .with_permissions(PermissionSet::from_slice(&[Permission::ManageBookings])),
        )
        .unwrap();

        let patch = AdminPatch {
            role: Some(Role::CourseManager),
            course_ids: Some([CourseId(3)].into_iter().collect()),
            ..Default::default()
        };
        let updated = patch.apply(&admin).unwrap();
        assert_eq!(updated.role(), Role::CourseManager);
        assert!(updated.explicit_permissions().is_empty());
        assert!(patch.is_reassignment());
    }

    #[test]
    fn test_patch_rejects_permissions_beyond_role() {
        let admin = Admin::try_from(
            AdminRecord::new(AdminId(8), "choi", Role::Staff)
                .with_company(CompanyId(1))
                .with_courses([CourseId(3)]),
        )
        .unwrap();

        let patch = AdminPatch {
            permissions: Some(PermissionSet::from_slice(&[Permission::ManageAdmins])),
            ..Default::default()
        };
        assert!(matches!(
            patch.apply(&admin),
            Err(AuthError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_display_info() {
        let admin = Admin::try_from(
            AdminRecord::new(AdminId(5), "kim", Role::CompanyOwner)
                .with_name("Kim Daepyo")
                .with_company(CompanyId(1)),
        )
        .unwrap();
        let info = admin.display_info();
        assert_eq!(info.name, "Kim Daepyo");
        assert_eq!(info.role, "Company Owner");
        assert_eq!(info.scope, "COMPANY");
        assert_eq!(DisplayInfo::anonymous().role, "");
    }
}
