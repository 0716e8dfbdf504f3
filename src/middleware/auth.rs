use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use parkgolf_auth::{engine, scope, verify_token};
use parkgolf_core::errors::{AppError, AuthError};
use parkgolf_core::permissions::Permission;
use parkgolf_models::{Admin, CompanyId, CourseId};

use crate::state::AppState;

/// Extractor that verifies the bearer token and yields the admin it names.
#[derive(Debug, Clone)]
pub struct AuthAdmin(pub Admin);

impl AuthAdmin {
    pub fn admin(&self) -> &Admin {
        &self.0
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        engine::has_permission(&self.0, permission)
    }

    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        engine::has_any_permission(&self.0, permissions)
    }

    pub fn has_all_permissions(&self, permissions: &[Permission]) -> bool {
        engine::has_all_permissions(&self.0, permissions)
    }

    pub fn can_access_company(&self, company_id: CompanyId) -> bool {
        scope::can_access_company(&self.0, company_id)
    }

    pub fn can_access_course(&self, course_id: CourseId) -> bool {
        scope::can_access_course(&self.0, course_id)
    }
}

impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let admin = verify_token(token, &state.jwt_config)?.into_admin()?;
        if !admin.is_active() {
            return Err(AuthError::Inactive.into());
        }

        Ok(AuthAdmin(admin))
    }
}

/// Defines an extractor that requires one permission on top of [`AuthAdmin`].
#[macro_export]
macro_rules! require_permission {
    ($name:ident, $permission:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthAdmin);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = $crate::parkgolf_core::errors::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth = <$crate::middleware::auth::AuthAdmin as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                $crate::parkgolf_auth::require_permission(auth.admin(), $permission)?;

                Ok($name(auth))
            }
        }
    };
}

require_permission!(RequireManageAdmins, Permission::ManageAdmins);
require_permission!(RequireManageCompanies, Permission::ManageCompanies);
require_permission!(RequireManageCourses, Permission::ManageCourses);
require_permission!(RequireManageTimeslots, Permission::ManageTimeslots);
require_permission!(RequireManageBookings, Permission::ManageBookings);
require_permission!(RequireManageUsers, Permission::ManageUsers);
require_permission!(RequireViewDashboard, Permission::ViewDashboard);
require_permission!(RequireViewAnalytics, Permission::ViewAnalytics);
require_permission!(RequireSystemConfig, Permission::PlatformSystemConfig);
