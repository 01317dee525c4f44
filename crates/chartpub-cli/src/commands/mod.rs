//! CLI commands

pub mod index;
pub mod show;
pub mod version;
