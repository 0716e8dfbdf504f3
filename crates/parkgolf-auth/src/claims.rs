//! Access-token claims.
//!
//! The identity service issues access tokens carrying enough of the admin
//! record to authorize requests without a directory lookup. [`Claims`] is
//! that payload; [`Claims::into_admin`] runs it through the same validation
//! boundary as any other admin record.
//!
//! Tokens without an `is_active` claim describe an inactive admin.

use chrono::{DateTime, Duration, Utc};
use parkgolf_core::errors::AuthError;
use parkgolf_core::permissions::PermissionSet;
use parkgolf_models::{Admin, AdminId, AdminRecord, CompanyId, CourseId, Role};
use serde::{Deserialize, Serialize};

/// JWT claims for admin access tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Admin id (subject claim)
    pub sub: String,
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<CompanyId>,
    #[serde(default)]
    pub course_ids: Vec<CourseId>,
    /// Explicit permission override; empty means role defaults.
    #[serde(default)]
    pub permissions: PermissionSet,
    #[serde(default)]
    pub is_active: bool,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    /// Builds claims describing `admin`, valid for `ttl` from `issued_at`.
    pub fn for_admin(admin: &Admin, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = issued_at.timestamp().max(0) as usize;
        let exp = (issued_at + ttl).timestamp().max(0) as usize;
        Self {
            sub: admin.id().to_string(),
            username: admin.username().to_string(),
            email: admin.email().to_string(),
            name: admin.name().to_string(),
            role: admin.role(),
            company_id: admin.company_id(),
            course_ids: admin.course_ids().iter().copied().collect(),
            permissions: admin.explicit_permissions(),
            is_active: admin.is_active(),
            exp,
            iat,
        }
    }

    /// Validates the claims as an admin record.
    ///
    /// The result carries the token's active flag; callers gating requests
    /// must reject inactive admins.
    pub fn into_admin(self) -> Result<Admin, AuthError> {
        let id: AdminId = self
            .sub
            .parse()
            .map_err(|_| AuthError::invalid_record(format!("Invalid subject: {}", self.sub)))?;

        let mut record = AdminRecord::new(id, self.username, self.role)
            .with_email(self.email)
            .with_name(self.name)
            .with_courses(self.course_ids)
            .with_permissions(self.permissions);
        record.company_id = self.company_id;
        record.is_active = self.is_active;

        Admin::try_from(record)
    }
}
