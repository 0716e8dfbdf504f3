//! Admin-management authorization.
//!
//! Decides whether one admin (the actor) may create, edit, reassign, or
//! deactivate another (the target):
//!
//! 1. An active PLATFORM actor may manage any active target.
//! 2. A COMPANY actor may manage active targets in its own company whose
//!    role is strictly junior within the company tier.
//! 3. A COURSE actor never manages anyone.
//! 4. A PLATFORM target is only ever managed by a PLATFORM actor.
//!
//! These are pure decisions over values handed in by the caller. Command
//! handlers must evaluate them again at commit time against a freshly
//! looked-up target.

use parkgolf_core::errors::AuthError;
use parkgolf_models::{Admin, CompanyId, CourseId, Role, Scope, Tier};
use std::collections::BTreeSet;
use tracing::debug;

use crate::active;

/// Whether `actor` may manage `target`.
///
/// Inactive targets cannot be managed; deactivation is terminal.
pub fn can_manage_admin<'a>(actor: impl Into<Option<&'a Admin>>, target: &Admin) -> bool {
    let Some(actor) = active(actor) else {
        return false;
    };
    if !target.is_active() {
        return false;
    }

    match (actor.scope(), target.scope()) {
        (Scope::Platform, _) => true,
        (_, Scope::Platform) => false,
        (Scope::Company, _) => {
            actor.company_id().is_some()
                && actor.company_id() == target.company_id()
                && actor.role().outranks_in_tier(target.role())
        }
        (Scope::Course, _) => false,
    }
}

/// Whether `actor` may add admins to `company_id`.
pub fn can_add_admin_to_company<'a>(
    actor: impl Into<Option<&'a Admin>>,
    company_id: CompanyId,
) -> bool {
    let Some(actor) = active(actor) else {
        return false;
    };

    match actor.scope() {
        Scope::Platform => true,
        Scope::Company => {
            actor.company_id() == Some(company_id)
                && matches!(actor.role(), Role::CompanyOwner | Role::CompanyManager)
        }
        Scope::Course => false,
    }
}

/// Whether `actor` may give `role` to an admin.
///
/// PLATFORM actors may assign any role. COMPANY actors may assign company
/// tier roles strictly junior to their own.
pub fn can_assign_role<'a>(actor: impl Into<Option<&'a Admin>>, role: Role) -> bool {
    let Some(actor) = active(actor) else {
        return false;
    };

    match actor.scope() {
        Scope::Platform => true,
        Scope::Company => role.tier() == Tier::Company && actor.role().outranks_in_tier(role),
        Scope::Course => false,
    }
}

/// Roles `actor` may assign, most senior first.
pub fn assignable_roles<'a>(actor: impl Into<Option<&'a Admin>>) -> Vec<Role> {
    let actor = actor.into();
    Role::ALL
        .into_iter()
        .filter(|role| can_assign_role(actor, *role))
        .collect()
}

/// A management operation to authorize.
#[derive(Debug, Clone, Copy)]
pub enum ManagementAction<'a> {
    /// Create a new admin with `role`, bound to `company_id` unless the role
    /// is PLATFORM scoped.
    Create {
        company_id: Option<CompanyId>,
        role: Role,
    },
    /// Edit `target`, optionally changing its role.
    Update {
        target: &'a Admin,
        new_role: Option<Role>,
    },
    /// Move `target` to another company and/or course set.
    Reassign {
        target: &'a Admin,
        new_company: Option<CompanyId>,
        new_courses: Option<&'a BTreeSet<CourseId>>,
    },
    Deactivate {
        target: &'a Admin,
    },
}

impl ManagementAction<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            ManagementAction::Create { .. } => "create",
            ManagementAction::Update { .. } => "update",
            ManagementAction::Reassign { .. } => "reassign",
            ManagementAction::Deactivate { .. } => "deactivate",
        }
    }
}

/// Checks every gate for `action`, failing with [`AuthError::Forbidden`] on
/// the first one that does not hold.
pub fn authorize<'a>(
    actor: impl Into<Option<&'a Admin>>,
    action: &ManagementAction<'_>,
) -> Result<(), AuthError> {
    let actor = actor.into();
    let result = check(actor, action);

    if let Err(reason) = &result {
        debug!(
            actor_id = ?actor.map(Admin::id),
            action = action.name(),
            reason = %reason,
            "Management action denied"
        );
        metrics::counter!("authz_denials_total", "check" => action.name()).increment(1);
    }

    result.map_err(AuthError::forbidden)
}

fn check(actor: Option<&Admin>, action: &ManagementAction<'_>) -> Result<(), String> {
    let Some(actor) = active(actor) else {
        return Err("Not signed in".to_string());
    };

    match *action {
        ManagementAction::Create { company_id, role } => {
            if !can_assign_role(actor, role) {
                return Err(format!("Cannot assign role {}", role));
            }
            if role.scope() != Scope::Platform {
                let company_id = company_id
                    .ok_or_else(|| format!("Role {} requires a company", role))?;
                if !can_add_admin_to_company(actor, company_id) {
                    return Err(format!("Cannot add admins to company {}", company_id));
                }
            }
            Ok(())
        }
        ManagementAction::Update { target, new_role } => {
            ensure_manageable(actor, target)?;
            match new_role {
                Some(role) if !can_assign_role(actor, role) => {
                    Err(format!("Cannot assign role {}", role))
                }
                _ => Ok(()),
            }
        }
        ManagementAction::Reassign {
            target,
            new_company,
            new_courses,
        } => {
            ensure_manageable(actor, target)?;
            if let Some(company_id) = new_company {
                if !can_add_admin_to_company(actor, company_id) {
                    return Err(format!("Cannot move admins to company {}", company_id));
                }
            }
            // COMPANY actors can only hand out courses inside their own company,
            // which the company check above already pins.
            if new_courses.is_some_and(|c| c.is_empty()) && target.scope() == Scope::Course {
                return Err("COURSE scoped admins need at least one course".to_string());
            }
            Ok(())
        }
        ManagementAction::Deactivate { target } => {
            if actor.id() == target.id() {
                return Err("Admins cannot deactivate themselves".to_string());
            }
            ensure_manageable(actor, target)
        }
    }
}

fn ensure_manageable(actor: &Admin, target: &Admin) -> Result<(), String> {
    if can_manage_admin(actor, target) {
        Ok(())
    } else {
        Err(format!("Cannot manage admin {}", target.id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkgolf_models::{AdminId, AdminRecord};

    fn make(id: i64, role: Role, company: Option<i64>) -> Admin {
        let mut record = AdminRecord::new(AdminId(id), format!("admin{}", id), role);
        if let Some(company) = company {
            record = record.with_company(CompanyId(company));
        }
        if role.scope() == Scope::Course {
            record = record.with_courses([CourseId(100)]);
        }
        Admin::try_from(record).unwrap()
    }

    fn for_role(id: i64, role: Role) -> Admin {
        let company = (role.tier() == Tier::Company).then_some(1);
        make(id, role, company)
    }

    /// `MANAGEABLE[a][b]`: may an admin with `Role::ALL[a]` manage one with
    /// `Role::ALL[b]` in the same company.
    const MANAGEABLE: [[bool; 9]; 9] = {
        const T: bool = true;
        const F: bool = false;
        [
            // PO PA PS PN CO CM XM ST RS
            [T, T, T, T, T, T, T, T, T], // PLATFORM_OWNER
            [T, T, T, T, T, T, T, T, T], // PLATFORM_ADMIN
            [T, T, T, T, T, T, T, T, T], // PLATFORM_SUPPORT
            [T, T, T, T, T, T, T, T, T], // PLATFORM_ANALYST
            [F, F, F, F, F, T, T, T, T], // COMPANY_OWNER
            [F, F, F, F, F, F, T, T, T], // COMPANY_MANAGER
            [F, F, F, F, F, F, F, F, F], // COURSE_MANAGER
            [F, F, F, F, F, F, F, F, F], // STAFF
            [F, F, F, F, F, F, F, F, F], // READONLY_STAFF
        ]
    };

    #[test]
    fn test_management_matrix() {
        for (a, actor_role) in Role::ALL.into_iter().enumerate() {
            for (b, target_role) in Role::ALL.into_iter().enumerate() {
                let actor = for_role(1, actor_role);
                let target = for_role(2, target_role);
                assert_eq!(
                    can_manage_admin(&actor, &target),
                    MANAGEABLE[a][b],
                    "{} managing {}",
                    actor_role,
                    target_role
                );
            }
        }
    }

    #[test]
    fn test_equal_rank_is_irreflexive() {
        for role in [Role::CompanyOwner, Role::CompanyManager] {
            let a = for_role(1, role);
            let b = for_role(2, role);
            assert!(!can_manage_admin(&a, &b));
            assert!(!can_manage_admin(&a, &a));
        }
    }

    #[test]
    fn test_company_actor_is_bound_to_company() {
        let owner = make(1, Role::CompanyOwner, Some(1));
        let other_staff = make(2, Role::Staff, Some(2));
        assert!(!can_manage_admin(&owner, &other_staff));
    }

    #[test]
    fn test_inactive_parties() {
        let owner = for_role(1, Role::PlatformOwner);
        let staff = for_role(2, Role::Staff);
        let mut gone = staff.clone();
        gone.deactivate();
        assert!(!can_manage_admin(&owner, &gone));
        assert!(!can_manage_admin(&gone, &staff));

        let mut former_owner = owner.clone();
        former_owner.deactivate();
        assert!(!can_manage_admin(&former_owner, &staff));
        assert!(!can_manage_admin(Option::<&Admin>::None, &staff));
    }

    #[test]
    fn test_can_add_admin_to_company() {
        let platform = for_role(1, Role::PlatformAnalyst);
        assert!(can_add_admin_to_company(&platform, CompanyId(7)));

        let owner = make(2, Role::CompanyOwner, Some(1));
        let manager = make(3, Role::CompanyManager, Some(1));
        let course_manager = make(4, Role::CourseManager, Some(1));
        assert!(can_add_admin_to_company(&owner, CompanyId(1)));
        assert!(can_add_admin_to_company(&manager, CompanyId(1)));
        assert!(!can_add_admin_to_company(&owner, CompanyId(2)));
        assert!(!can_add_admin_to_company(&course_manager, CompanyId(1)));
    }

    #[test]
    fn test_assignable_roles() {
        assert_eq!(
            assignable_roles(&for_role(1, Role::PlatformSupport)),
            Role::ALL.to_vec()
        );
        assert_eq!(
            assignable_roles(&for_role(1, Role::CompanyOwner)),
            vec![
                Role::CompanyManager,
                Role::CourseManager,
                Role::Staff,
                Role::ReadonlyStaff
            ]
        );
        assert_eq!(
            assignable_roles(&for_role(1, Role::CompanyManager)),
            vec![Role::CourseManager, Role::Staff, Role::ReadonlyStaff]
        );
        assert!(assignable_roles(&for_role(1, Role::CourseManager)).is_empty());
        assert!(assignable_roles(Option::<&Admin>::None).is_empty());
    }

    #[test]
    fn test_authorize_create() {
        let manager = make(1, Role::CompanyManager, Some(1));
        let create_staff = ManagementAction::Create {
            company_id: Some(CompanyId(1)),
            role: Role::Staff,
        };
        assert!(authorize(&manager, &create_staff).is_ok());

        let create_owner = ManagementAction::Create {
            company_id: Some(CompanyId(1)),
            role: Role::CompanyOwner,
        };
        assert!(matches!(
            authorize(&manager, &create_owner),
            Err(AuthError::Forbidden(_))
        ));

        let elsewhere = ManagementAction::Create {
            company_id: Some(CompanyId(2)),
            role: Role::Staff,
        };
        assert!(authorize(&manager, &elsewhere).is_err());

        let platform = ManagementAction::Create {
            company_id: None,
            role: Role::PlatformAnalyst,
        };
        assert!(authorize(&manager, &platform).is_err());
        assert!(authorize(&for_role(9, Role::PlatformAdmin), &platform).is_ok());
    }

    #[test]
    fn test_authorize_update_role_change() {
        let owner = make(1, Role::CompanyOwner, Some(1));
        let staff = make(2, Role::Staff, Some(1));
        let promote = ManagementAction::Update {
            target: &staff,
            new_role: Some(Role::CompanyManager),
        };
        assert!(authorize(&owner, &promote).is_ok());

        let crown = ManagementAction::Update {
            target: &staff,
            new_role: Some(Role::CompanyOwner),
        };
        assert!(authorize(&owner, &crown).is_err());
    }

    #[test]
    fn test_authorize_reassign() {
        let owner = make(1, Role::CompanyOwner, Some(1));
        let staff = make(2, Role::Staff, Some(1));
        let away = ManagementAction::Reassign {
            target: &staff,
            new_company: Some(CompanyId(2)),
            new_courses: None,
        };
        assert!(authorize(&owner, &away).is_err());

        let platform = for_role(3, Role::PlatformAdmin);
        assert!(authorize(&platform, &away).is_ok());

        let no_courses = BTreeSet::new();
        let stripped = ManagementAction::Reassign {
            target: &staff,
            new_company: None,
            new_courses: Some(&no_courses),
        };
        assert!(authorize(&platform, &stripped).is_err());
    }

    #[test]
    fn test_authorize_deactivate() {
        let owner = make(1, Role::CompanyOwner, Some(1));
        let staff = make(2, Role::Staff, Some(1));
        assert!(authorize(&owner, &ManagementAction::Deactivate { target: &staff }).is_ok());
        assert!(authorize(&owner, &ManagementAction::Deactivate { target: &owner }).is_err());
        assert!(authorize(&staff, &ManagementAction::Deactivate { target: &owner }).is_err());
    }
}
