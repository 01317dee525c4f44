//! Chartpub Repository Index
//!
//! This crate maintains a Helm-compatible `index.yaml` across releases:
//!
//! - **Append, never drop**: each append replaces only the exact
//!   `(name, version)` it targets and keeps all other history
//! - **Deterministic order**: names alphabetically, versions newest first
//! - **Engine-owned fields**: `digest`, `created`, `urls` and the identity
//!   keys are always computed, never copied from a manifest
//! - **Lenient loading**: a missing, corrupt or foreign index starts empty
//!
//! ## Example
//!
//! ```rust,no_run
//! use chartpub_core::Manifest;
//! use chartpub_repo::{RepositoryIndex, SystemClock};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = Manifest::load("Chart.yaml")?;
//! let index = RepositoryIndex::load("index.yaml").append(
//!     &manifest,
//!     Path::new("dist/web-1.0.0.tgz"),
//!     "https://charts.example.com",
//!     None,
//!     &SystemClock,
//! )?;
//! index.write_to("index.yaml")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! There is no locking. Callers must hold the checkout containing the index
//! exclusively for the whole load → append → write cycle.

pub mod clock;
pub mod config;
pub mod error;
pub mod index;
pub mod version;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock, format_timestamp};
pub use config::{CONFIG_API_VERSION, PublishConfig};
pub use error::{RepoError, Result};
pub use index::{
    INDEX_API_VERSION, IndexEntry, LoadOutcome, Overrides, RESERVED_FIELDS, RepositoryIndex,
    build_urls, digest_file, is_reserved,
};
pub use version::compare_versions;
