//! Demo directory seeding.
//!
//! Fills an [`InMemoryDirectory`] with one PLATFORM admin per platform role
//! plus a set of companies, each staffed with one admin per company-tier
//! role. Names are generated; usernames and passwords are predictable so the
//! demo accounts can be used to log in.

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use parkgolf_admin::directory::InMemoryDirectory;
use parkgolf_core::errors::AuthError;
use parkgolf_models::{Admin, AdminId, AdminRecord, CompanyId, CourseId, Role, Scope, Tier};
use std::time::Instant;

/// Password given to every seeded admin.
pub const DEMO_PASSWORD: &str = "parkgolf123";

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub companies: usize,
    pub courses_per_company: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            companies: 2,
            courses_per_company: 3,
        }
    }
}

/// Generates the demo admins without storing them.
///
/// Usernames follow `<role>` for PLATFORM roles and `<role>-<company>` for
/// company-tier roles, e.g. `company_owner-1`.
pub fn generate_admins(config: &SeedConfig) -> Result<Vec<Admin>, AuthError> {
    let mut admins = Vec::new();
    let mut next_id = 1;

    for role in Role::ALL.into_iter().filter(|r| r.tier() == Tier::Platform) {
        admins.push(generate_admin(
            next_id,
            role,
            role.as_str().to_lowercase(),
            None,
            &[],
        )?);
        next_id += 1;
    }

    for company in 1..=config.companies as i64 {
        let courses: Vec<i64> = (1..=config.courses_per_company.max(1) as i64)
            .map(|c| company * 100 + c)
            .collect();
        for role in Role::ALL.into_iter().filter(|r| r.tier() == Tier::Company) {
            let username = format!("{}-{}", role.as_str().to_lowercase(), company);
            admins.push(generate_admin(
                next_id,
                role,
                username,
                Some(company),
                &courses,
            )?);
            next_id += 1;
        }
    }

    Ok(admins)
}

fn generate_admin(
    id: i64,
    role: Role,
    username: String,
    company: Option<i64>,
    courses: &[i64],
) -> Result<Admin, AuthError> {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();

    let mut record = AdminRecord::new(AdminId(id), username, role)
        .with_name(format!("{} {}", first_name, last_name));
    if let Some(company) = company {
        record = record.with_company(CompanyId(company));
    }
    if role.scope() == Scope::Course {
        record = record.with_courses(courses.iter().copied().map(CourseId));
    }

    Admin::try_from(record)
}

/// Seeds `directory` and returns the admins inserted.
pub async fn seed_directory(
    directory: &InMemoryDirectory,
    config: &SeedConfig,
) -> Result<Vec<Admin>, AuthError> {
    let start_time = Instant::now();
    let admins = generate_admins(config)?;
    for admin in &admins {
        directory.insert(admin.clone(), DEMO_PASSWORD).await;
    }
    tracing::debug!(
        count = admins.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Seeded demo directory"
    );
    Ok(admins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkgolf_admin::directory::AdminDirectory;

    #[test]
    fn test_generate_admins_covers_every_role() {
        let admins = generate_admins(&SeedConfig {
            companies: 2,
            courses_per_company: 2,
        })
        .unwrap();
        assert_eq!(admins.len(), 4 + 2 * 5);
        for role in Role::ALL {
            assert!(admins.iter().any(|a| a.role() == role));
        }
        for admin in admins.iter().filter(|a| a.scope() == Scope::Course) {
            assert_eq!(admin.course_ids().len(), 2);
        }
    }

    #[test]
    fn test_usernames_are_predictable() {
        let admins = generate_admins(&SeedConfig::default()).unwrap();
        assert!(admins.iter().any(|a| a.username() == "platform_owner"));
        assert!(admins.iter().any(|a| a.username() == "company_owner-2"));
    }

    #[tokio::test]
    async fn test_seeded_accounts_can_log_in() {
        let directory = InMemoryDirectory::new();
        seed_directory(&directory, &SeedConfig::default())
            .await
            .unwrap();
        assert!(
            directory
                .verify_credentials("staff-1", DEMO_PASSWORD)
                .await
                .is_ok()
        );
    }
}
