use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use parkgolf_admin::directory::{InMemoryDirectory, TimedDirectory};
use parkgolf_admin::logging;
use parkgolf_admin::session::{FileSessionStore, SessionContext};
use parkgolf_auth::{assignable_roles, can_manage_admin, effective_permissions};
use parkgolf_cli::seeder::{self, SeedConfig};
use parkgolf_config::{GatewayConfig, SessionConfig};
use parkgolf_core::permissions::Permission;
use parkgolf_models::{
    Admin, AdminId, AdminRecord, CompanyId, CourseId, LegacyAdmin, Role, Scope, migrate_admin,
};
use std::path::PathBuf;

type DemoSession = SessionContext<TimedDirectory<InMemoryDirectory>, FileSessionStore>;

#[derive(Parser)]
#[command(name = "parkgolf-cli")]
#[command(about = "Park Golf CLI - Role and permission tools for the admin platform", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every role with its tier, scope, rank, and default permissions
    Roles,
    /// Check whether an admin with the given role holds a permission
    Check {
        /// Role wire name, e.g. COMPANY_MANAGER
        #[arg(short = 'r', long)]
        role: Role,

        /// Permission wire name, e.g. COMPANY_ADMIN_MANAGE
        #[arg(short = 'p', long)]
        permission: Permission,

        /// Evaluate as a deactivated admin
        #[arg(long)]
        inactive: bool,
    },
    /// Check whether one role may manage another
    CanManage {
        /// Role of the acting admin
        #[arg(short = 'a', long)]
        actor: Role,

        /// Role of the admin being managed
        #[arg(short = 't', long)]
        target: Role,

        /// Company of the acting admin
        #[arg(long, default_value = "1")]
        actor_company: i64,

        /// Company of the admin being managed
        #[arg(long, default_value = "1")]
        target_company: i64,
    },
    /// Convert a JSON array of legacy admins to the hierarchical model
    MigrateLegacy {
        /// Legacy admins as a JSON array
        #[arg(short = 'i', long)]
        input: PathBuf,

        /// Where to write the migrated records (stdout if omitted)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Sign in against the demo directory and persist the session
    Login {
        /// Username (will be prompted if not provided)
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Show the admin of the persisted session
    Whoami,
    /// Clear the persisted session
    Logout,
    /// List the demo accounts
    DemoAccounts {
        /// Number of companies to generate
        #[arg(short = 'c', long, default_value = "2")]
        companies: usize,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    logging::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Roles => handle_roles(),
        Commands::Check {
            role,
            permission,
            inactive,
        } => handle_check(role, permission, inactive),
        Commands::CanManage {
            actor,
            target,
            actor_company,
            target_company,
        } => handle_can_manage(actor, target, actor_company, target_company),
        Commands::MigrateLegacy { input, output } => handle_migrate_legacy(input, output),
        Commands::Login { username, password } => handle_login(username, password).await,
        Commands::Whoami => handle_whoami().await,
        Commands::Logout => handle_logout().await,
        Commands::DemoAccounts { companies } => handle_demo_accounts(companies),
    }
}

fn handle_roles() {
    for role in Role::ALL {
        let permissions: Vec<&str> = role
            .default_permissions()
            .iter()
            .map(Permission::as_str)
            .collect();
        println!(
            "{:<18} {:<8} {:<8} rank {}  {}",
            role.as_str(),
            format!("{:?}", role.tier()).to_uppercase(),
            role.scope().as_str(),
            role.rank(),
            role.label()
        );
        println!("   {}", permissions.join(", "));
    }
}

fn handle_check(role: Role, permission: Permission, inactive: bool) {
    let admin = match sample_admin(AdminId(1), role, 1, inactive) {
        Ok(admin) => admin,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if effective_permissions(&admin).contains(permission) {
        println!("✅ {} holds {}", role, permission);
    } else {
        println!("❌ {} does not hold {}", role, permission);
        std::process::exit(1);
    }
}

fn handle_can_manage(actor: Role, target: Role, actor_company: i64, target_company: i64) {
    let admins = sample_admin(AdminId(1), actor, actor_company, false)
        .and_then(|a| Ok((a, sample_admin(AdminId(2), target, target_company, false)?)));
    let (actor_admin, target_admin) = match admins {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if can_manage_admin(&actor_admin, &target_admin) {
        println!("✅ {} can manage {}", actor, target);
    } else {
        println!("❌ {} cannot manage {}", actor, target);
    }

    let assignable: Vec<&str> = assignable_roles(&actor_admin)
        .into_iter()
        .map(Role::as_str)
        .collect();
    println!("   Assignable roles: {}", assignable.join(", "));
}

fn handle_migrate_legacy(input: PathBuf, output: Option<PathBuf>) {
    let legacy: Vec<LegacyAdmin> = match std::fs::read_to_string(&input)
        .map_err(|e| e.to_string())
        .and_then(|raw| serde_json::from_str(&raw).map_err(|e| e.to_string()))
    {
        Ok(legacy) => legacy,
        Err(e) => {
            eprintln!("❌ Error reading {}: {}", input.display(), e);
            std::process::exit(1);
        }
    };

    let mut migrated = Vec::new();
    let mut rejected = 0;
    for admin in legacy {
        let id = admin.id;
        match migrate_admin(admin) {
            Ok(migration) => {
                if !migration.dropped.is_empty() {
                    eprintln!("⚠️  Admin {}: dropped {:?}", id, migration.dropped);
                }
                migrated.push(AdminRecord::from(migration.admin));
            }
            Err(e) => {
                eprintln!("❌ Admin {}: {}", id, e);
                rejected += 1;
            }
        }
    }

    let json = match serde_json::to_string_pretty(&migrated) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("❌ Error serializing migrated admins: {}", e);
            std::process::exit(1);
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, json) {
                eprintln!("❌ Error writing {}: {}", path.display(), e);
                std::process::exit(1);
            }
            println!(
                "✅ Migrated {} admins to {} ({} rejected)",
                migrated.len(),
                path.display(),
                rejected
            );
        }
        None => println!("{}", json),
    }

    if rejected > 0 {
        std::process::exit(1);
    }
}

async fn handle_login(username: Option<String>, password: Option<String>) {
    let username = match username {
        Some(username) => username,
        None => prompt(Input::<String>::new().with_prompt("Username").interact_text()),
    };
    let password = match password {
        Some(password) => password,
        None => prompt(Password::new().with_prompt("Password").interact()),
    };

    let session = demo_session().await;
    match session.login_with_credentials(&username, &password).await {
        Ok(admin) => {
            let info = admin.display_info();
            println!("\n✅ Signed in as {}", info.name);
            println!("   Role: {} ({})", info.role, info.scope);
            if let Some(company_id) = info.company_id {
                println!("   Company: {}", company_id);
            }
            print_permissions(&admin);
        }
        Err(e) => {
            eprintln!("\n❌ Login failed: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_whoami() {
    let session = demo_session().await;
    match session.restore().await {
        Ok(Some(admin)) => {
            let info = admin.display_info();
            println!("{} ({}, {})", info.name, info.role, info.scope);
            print_permissions(&admin);
        }
        Ok(None) => println!("{}", session.display_info().name),
        Err(e) => {
            eprintln!("❌ Could not restore session: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_logout() {
    let session = demo_session().await;
    if let Err(e) = session.restore().await {
        eprintln!("⚠️  Could not restore session: {}", e);
    }
    session.logout().await;
    println!("✅ Signed out");
}

fn handle_demo_accounts(companies: usize) {
    let config = SeedConfig {
        companies,
        ..SeedConfig::default()
    };
    match seeder::generate_admins(&config) {
        Ok(admins) => {
            for admin in admins {
                println!(
                    "{:<4} {:<24} {:<18} {}",
                    admin.id().get(),
                    admin.username(),
                    admin.role().as_str(),
                    admin.name()
                );
            }
            println!("\nPassword for every account: {}", seeder::DEMO_PASSWORD);
        }
        Err(e) => {
            eprintln!("❌ Error generating demo accounts: {}", e);
            std::process::exit(1);
        }
    }
}

/// Builds the session used by the login commands: a seeded in-memory
/// directory behind the configured timeouts, persisted to the session file.
async fn demo_session() -> DemoSession {
    let session_config = SessionConfig::from_env();
    let directory = InMemoryDirectory::new();
    if let Err(e) = seeder::seed_directory(&directory, &SeedConfig::default()).await {
        eprintln!("❌ Error seeding demo directory: {}", e);
        std::process::exit(1);
    }

    let store = match FileSessionStore::open(&session_config.store_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!(
                "❌ Error opening session store {}: {}",
                session_config.store_path.display(),
                e
            );
            std::process::exit(1);
        }
    };

    SessionContext::new(
        TimedDirectory::new(directory, GatewayConfig::from_env()),
        store,
        session_config,
    )
}

fn sample_admin(
    id: AdminId,
    role: Role,
    company: i64,
    inactive: bool,
) -> Result<Admin, parkgolf_core::errors::AuthError> {
    let mut record = AdminRecord::new(id, format!("sample{}", id), role);
    if role.scope() != Scope::Platform {
        record = record.with_company(CompanyId(company));
    }
    if role.scope() == Scope::Course {
        record = record.with_courses([CourseId(company * 100 + 1)]);
    }
    if inactive {
        record = record.inactive();
    }
    Admin::try_from(record)
}

fn print_permissions(admin: &Admin) {
    let permissions: Vec<&str> = effective_permissions(admin)
        .iter()
        .map(Permission::as_str)
        .collect();
    println!("   Permissions: {}", permissions.join(", "));
}

fn prompt<T>(result: dialoguer::Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("❌ Failed to read input: {}", e);
            std::process::exit(1);
        }
    }
}
