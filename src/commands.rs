//! Admin-management commands.
//!
//! Every command re-checks authorization at commit time: the actor and the
//! target are looked up fresh from the directory, so a decision taken on a
//! stale screen (the target was promoted, moved, or the actor deactivated in
//! the meantime) is evaluated against current state before anything is
//! written.

use parkgolf_auth::{
    Accessible, ManagementAction, accessible_companies, authorize, require_permission,
};
use parkgolf_core::errors::{AuthError, LookupError};
use parkgolf_core::permissions::{Permission, PermissionSet};
use parkgolf_models::{
    Admin, AdminId, AdminPatch, AdminRecord, CompanyId, CourseId, Role, validate_permissions,
};
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::{info, instrument};
use validator::Validate;

use crate::directory::AdminDirectory;

/// Request to create an admin.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewAdmin {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Username must be between 1 and 50 characters"
    ))]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub permissions: PermissionSet,
    pub company_id: Option<CompanyId>,
    #[serde(default)]
    pub course_ids: BTreeSet<CourseId>,
}

pub struct AdminCommandHandler<D> {
    directory: D,
}

impl<D: AdminDirectory> AdminCommandHandler<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    #[instrument(skip(self, actor, request), fields(actor_id = %actor.id(), role = %request.role))]
    pub async fn create_admin(&self, actor: &Admin, request: NewAdmin) -> Result<Admin, AuthError> {
        let actor = self.fresh_actor(actor).await?;
        authorize(
            &actor,
            &ManagementAction::Create {
                company_id: request.company_id,
                role: request.role,
            },
        )?;

        request
            .validate()
            .map_err(|e| AuthError::invalid_record(e.to_string()))?;
        validate_permissions(request.role, request.permissions)?;

        // The directory assigns the real id on create.
        let mut record = AdminRecord::new(AdminId(0), request.username, request.role)
            .with_email(request.email)
            .with_name(request.name)
            .with_permissions(request.permissions)
            .with_courses(request.course_ids);
        record.company_id = request.company_id;
        let admin = Admin::try_from(record)?;

        let created = self.directory.create(admin, &request.password).await?;
        info!(admin_id = %created.id(), "Admin created");
        Ok(created)
    }

    /// Applies `patch` to the admin with `target_id`.
    ///
    /// A patch touching the company or course set is authorized as a
    /// reassignment as well as an update.
    #[instrument(skip(self, actor, patch), fields(actor_id = %actor.id()))]
    pub async fn update_admin(
        &self,
        actor: &Admin,
        target_id: AdminId,
        patch: AdminPatch,
    ) -> Result<Admin, AuthError> {
        let actor = self.fresh_actor(actor).await?;
        let target = self.directory.find_by_id(target_id).await?;

        authorize(
            &actor,
            &ManagementAction::Update {
                target: &target,
                new_role: patch.role,
            },
        )?;
        if patch.is_reassignment() {
            authorize(
                &actor,
                &ManagementAction::Reassign {
                    target: &target,
                    new_company: patch.company_id,
                    new_courses: patch.course_ids.as_ref(),
                },
            )?;
        }

        let updated = patch.apply(&target)?;
        let saved = self.directory.update(updated).await?;
        info!(admin_id = %saved.id(), "Admin updated");
        Ok(saved)
    }

    #[instrument(skip(self, actor), fields(actor_id = %actor.id()))]
    pub async fn deactivate_admin(
        &self,
        actor: &Admin,
        target_id: AdminId,
    ) -> Result<Admin, AuthError> {
        let actor = self.fresh_actor(actor).await?;
        let target = self.directory.find_by_id(target_id).await?;
        authorize(&actor, &ManagementAction::Deactivate { target: &target })?;

        let deactivated = self.directory.deactivate(target_id).await?;
        info!(admin_id = %target_id, "Admin deactivated");
        Ok(deactivated)
    }

    /// Admins the actor may see in the management screen.
    ///
    /// PLATFORM actors see everyone; others see their own company.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id()))]
    pub async fn list_admins(&self, actor: &Admin) -> Result<Vec<Admin>, AuthError> {
        let actor = self.fresh_actor(actor).await?;
        let companies = accessible_companies(&actor);
        let filter = match &companies {
            Accessible::All => None,
            Accessible::Only(ids) => match ids.iter().next() {
                Some(id) => Some(*id),
                None => return Ok(Vec::new()),
            },
        };
        Ok(self.directory.list(filter).await?)
    }

    /// Reloads the actor and checks it may manage admins at all.
    async fn fresh_actor(&self, actor: &Admin) -> Result<Admin, AuthError> {
        let actor = match self.directory.find_by_id(actor.id()).await {
            Ok(actor) => actor,
            Err(LookupError::NotFound) => {
                return Err(AuthError::forbidden("Actor no longer exists"));
            }
            Err(e) => return Err(e.into()),
        };
        require_permission(&actor, Permission::ManageAdmins)?;
        Ok(actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::InMemoryDirectory;

    async fn handler() -> AdminCommandHandler<InMemoryDirectory> {
        let directory = InMemoryDirectory::new();
        let owner = Admin::try_from(
            AdminRecord::new(AdminId(1), "owner", Role::CompanyOwner).with_company(CompanyId(1)),
        )
        .unwrap();
        let staff = Admin::try_from(
            AdminRecord::new(AdminId(2), "staff", Role::Staff)
                .with_company(CompanyId(1))
                .with_courses([CourseId(10)]),
        )
        .unwrap();
        directory.insert(owner, "password1").await;
        directory.insert(staff, "password2").await;
        AdminCommandHandler::new(directory)
    }

    fn new_staff(company: i64) -> NewAdmin {
        NewAdmin {
            username: "newbie".to_string(),
            email: "newbie@parkgolf.com".to_string(),
            name: "New Staff".to_string(),
            password: "password123".to_string(),
            role: Role::Staff,
            permissions: PermissionSet::empty(),
            company_id: Some(CompanyId(company)),
            course_ids: [CourseId(10)].into_iter().collect(),
        }
    }

    #[tokio::test]
    async fn test_create_in_own_company() {
        let handler = handler().await;
        let owner = handler.directory().find_by_id(AdminId(1)).await.unwrap();
        let created = handler.create_admin(&owner, new_staff(1)).await.unwrap();
        assert_eq!(created.id(), AdminId(3));
        assert_eq!(created.company_id(), Some(CompanyId(1)));
    }

    #[tokio::test]
    async fn test_create_in_other_company_is_forbidden() {
        let handler = handler().await;
        let owner = handler.directory().find_by_id(AdminId(1)).await.unwrap();
        assert!(matches!(
            handler.create_admin(&owner, new_staff(2)).await,
            Err(AuthError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_create_with_extra_permissions_is_rejected() {
        let handler = handler().await;
        let owner = handler.directory().find_by_id(AdminId(1)).await.unwrap();
        let mut request = new_staff(1);
        request.permissions = PermissionSet::from_slice(&[Permission::ManageAdmins]);
        assert!(matches!(
            handler.create_admin(&owner, request).await,
            Err(AuthError::InvalidRecord(_))
        ));
    }

    #[tokio::test]
    async fn test_staff_cannot_manage() {
        let handler = handler().await;
        let staff = handler.directory().find_by_id(AdminId(2)).await.unwrap();
        assert!(matches!(
            handler.deactivate_admin(&staff, AdminId(1)).await,
            Err(AuthError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_recheck_uses_fresh_target() {
        let handler = handler().await;
        let owner = handler.directory().find_by_id(AdminId(1)).await.unwrap();

        // The target was promoted to owner after the actor loaded the screen.
        let promoted = AdminPatch {
            role: Some(Role::CompanyOwner),
            course_ids: Some(BTreeSet::new()),
            ..Default::default()
        }
        .apply(&handler.directory().find_by_id(AdminId(2)).await.unwrap())
        .unwrap();
        handler.directory().update(promoted).await.unwrap();

        assert!(matches!(
            handler.deactivate_admin(&owner, AdminId(2)).await,
            Err(AuthError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_recheck_uses_fresh_actor() {
        let handler = handler().await;
        let owner = handler.directory().find_by_id(AdminId(1)).await.unwrap();
        handler.directory().deactivate(AdminId(1)).await.unwrap();

        assert!(matches!(
            handler.deactivate_admin(&owner, AdminId(2)).await,
            Err(AuthError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_update_and_deactivate() {
        let handler = handler().await;
        let owner = handler.directory().find_by_id(AdminId(1)).await.unwrap();

        let patch = AdminPatch {
            name: Some("Senior Staff".to_string()),
            course_ids: Some([CourseId(10), CourseId(11)].into_iter().collect()),
            ..Default::default()
        };
        let updated = handler.update_admin(&owner, AdminId(2), patch).await.unwrap();
        assert_eq!(updated.name(), "Senior Staff");
        assert_eq!(updated.course_ids().len(), 2);

        let gone = handler.deactivate_admin(&owner, AdminId(2)).await.unwrap();
        assert!(!gone.is_active());
        assert!(handler.deactivate_admin(&owner, AdminId(2)).await.is_err());
    }

    #[tokio::test]
    async fn test_list_is_company_scoped() {
        let handler = handler().await;
        let outsider = Admin::try_from(
            AdminRecord::new(AdminId(9), "other", Role::CompanyOwner).with_company(CompanyId(2)),
        )
        .unwrap();
        handler.directory().insert(outsider, "password9").await;

        let owner = handler.directory().find_by_id(AdminId(1)).await.unwrap();
        let visible = handler.list_admins(&owner).await.unwrap();
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|a| a.company_id() == Some(CompanyId(1))));
    }
}
