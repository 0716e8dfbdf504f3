//! # Park Golf Admin
//!
//! Authorization core of the Park Golf multi-tenant admin platform.
//!
//! ## Overview
//!
//! Golf companies (tenants) own courses. Admins belong either to the
//! platform operator or to one company, and company admins may further be
//! limited to a set of courses. This crate answers "who is signed in" and
//! "may they do this":
//!
//! - **Session**: login, restore, and logout against the identity service
//! - **Directory**: the gateway to the identity service, with timeout tiers
//! - **Commands**: admin management with commit-time authorization
//! - **Middleware**: bearer-token extractors for HTTP handlers
//!
//! The decision functions themselves live in [`parkgolf_auth`]; the
//! permission catalog in [`parkgolf_core`]; roles and admin records in
//! [`parkgolf_models`].
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── parkgolf-core/     # Permission catalog, error types
//! ├── parkgolf-config/   # Environment-driven configuration
//! ├── parkgolf-models/   # Ids, role registry, admin records, legacy migration
//! ├── parkgolf-auth/     # Scope resolver, decision engine, management authorizer
//! └── parkgolf-cli/      # Administrative CLI
//! src/
//! ├── commands.rs        # Admin-management commands
//! ├── directory/         # AdminDirectory trait, timed wrapper, in-memory directory
//! ├── logging.rs         # Tracing subscriber setup
//! ├── middleware/        # AuthAdmin extractor and permission guards
//! ├── session/           # SessionContext and session stores
//! └── state.rs           # Shared extractor state
//! ```
//!
//! ## Role Hierarchy
//!
//! | Role | Scope | Description |
//! |------|-------|-------------|
//! | Platform Owner | Platform | Everything, including system configuration |
//! | Platform Administrator | Platform | Companies, users, admins |
//! | Platform Support | Platform | Customer and booking support |
//! | Platform Analyst | Platform | Read-only analytics |
//! | Company Owner | Company | Everything inside one company |
//! | Company Manager | Company | Day-to-day company operations |
//! | Course Manager | Course | Timeslots and bookings on assigned courses |
//! | Staff | Course | Booking reception on assigned courses |
//! | Read-only Staff | Course | Viewing only |
//!
//! ## Quick Start
//!
//! ```ignore
//! use parkgolf_admin::directory::{InMemoryDirectory, TimedDirectory};
//! use parkgolf_admin::session::{FileSessionStore, SessionContext};
//! use parkgolf_config::{GatewayConfig, SessionConfig};
//! use std::sync::Arc;
//!
//! let config = SessionConfig::from_env();
//! let store = FileSessionStore::open(&config.store_path)?;
//! let directory = TimedDirectory::new(InMemoryDirectory::new(), GatewayConfig::from_env());
//! let session = Arc::new(SessionContext::new(directory, store, config));
//!
//! session.restore().await?;
//! if session.current().is_none() {
//!     session.login_with_credentials("kim", "secret").await?;
//! }
//! ```

pub mod commands;
pub mod directory;
pub mod logging;
pub mod middleware;
pub mod session;
pub mod state;

// Re-export workspace crates for convenience
pub use parkgolf_auth;
pub use parkgolf_config;
pub use parkgolf_core;
pub use parkgolf_models;
