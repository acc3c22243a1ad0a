#![deny(unsafe_code)]

//! Shared test utilities for the rcpack workspace.
//!
//! Provides temporary repositories, config builders, and tracing helpers so
//! that individual crate tests stay concise and consistent.
//!
//! Add this crate as a `[dev-dependency]` in any workspace member:
//!
//! ```toml
//! [dev-dependencies]
//! rcpack-test-utils = { workspace = true }
//! ```

pub mod config;
pub mod repo;
pub mod tracing_setup;

pub use config::TestConfigBuilder;
pub use repo::TestRepo;
