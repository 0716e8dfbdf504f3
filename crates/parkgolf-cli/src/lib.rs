//! # Park Golf CLI
//!
//! Demo data for the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use parkgolf_admin::directory::InMemoryDirectory;
//! use parkgolf_cli::seeder::{SeedConfig, seed_directory};
//!
//! let directory = InMemoryDirectory::new();
//! let seeded = seed_directory(&directory, &SeedConfig::default()).await;
//! ```

pub mod seeder;
