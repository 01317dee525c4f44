//! Chartpub Core - chart manifest model
//!
//! This crate provides the leaf types shared by the rest of chartpub:
//! - `Manifest`: an immutable view of a `Chart.yaml` that keeps unknown keys
//! - `CoreError` / `ErrorKind`: the error taxonomy every crate reports with

pub mod error;
pub mod manifest;

pub use error::{CoreError, ErrorKind, Result};
pub use manifest::{DEFAULT_API_VERSION, Manifest, RawMap, scalar_to_string};
