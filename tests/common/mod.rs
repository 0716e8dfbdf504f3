use parkgolf_admin::directory::InMemoryDirectory;
use parkgolf_admin::session::{InMemorySessionStore, SessionContext};
use parkgolf_config::SessionConfig;
use parkgolf_models::{Admin, AdminId, AdminRecord, CompanyId, CourseId, Role};
use std::time::Duration;

/// Well-known ids of the seeded admins.
#[allow(dead_code)]
pub mod ids {
    use parkgolf_models::AdminId;
    pub const PLATFORM_OWNER: AdminId = AdminId(1);
    pub const INACTIVE_SUPPORT: AdminId = AdminId(4);
    pub const COMPANY_OWNER: AdminId = AdminId(5);
    pub const COMPANY_MANAGER: AdminId = AdminId(6);
    pub const OTHER_OWNER: AdminId = AdminId(7);
    pub const STAFF: AdminId = AdminId(8);
    pub const UNKNOWN: AdminId = AdminId(999);
}

pub const PASSWORD: &str = "password123";

/// Build an admin for `role`, bound to `company` and `courses` when given.
pub fn admin(id: AdminId, role: Role, company: Option<i64>, courses: &[i64]) -> Admin {
    let mut record = AdminRecord::new(id, format!("admin{}", id), role);
    if let Some(company) = company {
        record = record.with_company(CompanyId(company));
    }
    record = record.with_courses(courses.iter().copied().map(CourseId));
    Admin::try_from(record).unwrap()
}

#[allow(dead_code)]
pub fn inactive(mut admin: Admin) -> Admin {
    admin.deactivate();
    admin
}

#[allow(dead_code)]
pub async fn seeded_directory(latency: Duration) -> InMemoryDirectory {
    let directory = InMemoryDirectory::new().with_latency(latency);
    let admins = [
        admin(ids::PLATFORM_OWNER, Role::PlatformOwner, None, &[]),
        inactive(admin(ids::INACTIVE_SUPPORT, Role::PlatformSupport, None, &[])),
        admin(ids::COMPANY_OWNER, Role::CompanyOwner, Some(1), &[]),
        admin(ids::COMPANY_MANAGER, Role::CompanyManager, Some(1), &[]),
        admin(ids::OTHER_OWNER, Role::CompanyOwner, Some(1), &[]),
        admin(ids::STAFF, Role::Staff, Some(1), &[10, 11]),
    ];
    for admin in admins {
        directory.insert(admin, PASSWORD).await;
    }
    directory
}

#[allow(dead_code)]
pub async fn session_with_latency(
    latency: Duration,
) -> SessionContext<InMemoryDirectory, InMemorySessionStore> {
    SessionContext::new(
        seeded_directory(latency).await,
        InMemorySessionStore::new(),
        SessionConfig::default(),
    )
}

#[allow(dead_code)]
pub async fn session() -> SessionContext<InMemoryDirectory, InMemorySessionStore> {
    session_with_latency(Duration::ZERO).await
}
