//! Shared utility functions for CLI commands

use chartpub_repo::{Overrides, is_reserved};
use serde_yaml::Value;

use crate::error::{CliError, Result};

/// Safely truncate a hash string to a maximum length
///
/// Keeps at most `max_len` characters and returns the entire string if it's
/// shorter.
#[must_use]
pub fn truncate_hash(hash: &str, max_len: usize) -> &str {
    hash.char_indices()
        .nth(max_len)
        .map_or(hash, |(end, _)| &hash[..end])
}

/// Parse repeated `--set key=value` flags into entry overrides
///
/// Values are typed: `true`/`false`, `null`, integers and floats become
/// YAML scalars, `[...]`/`{...}` are parsed as flow collections, anything
/// else stays a string.
pub fn parse_set_overrides(set_args: &[String]) -> Result<Overrides> {
    let mut overrides = Overrides::new();

    for arg in set_args {
        let (key, val) = arg.split_once('=').ok_or_else(|| {
            CliError::input(format!("Invalid --set format: '{}'. Expected key=value", arg))
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(CliError::input(format!("Invalid --set format: '{}'. Empty key", arg)));
        }
        if is_reserved(key) {
            return Err(CliError::input_with_help(
                format!("'{}' cannot be overridden", key),
                "name, version, apiVersion, created, digest and urls are computed by the index",
            ));
        }

        let value = if val == "true" {
            Value::Bool(true)
        } else if val == "false" {
            Value::Bool(false)
        } else if val == "null" {
            Value::Null
        } else if let Ok(num) = val.parse::<i64>() {
            Value::Number(num.into())
        } else if let Ok(num) = val.parse::<f64>() {
            Value::Number(num.into())
        } else if val.starts_with('[') || val.starts_with('{') {
            serde_yaml::from_str(val).unwrap_or_else(|_| Value::String(val.to_string()))
        } else {
            Value::String(val.to_string())
        };

        overrides.insert(key.to_string(), value);
    }

    Ok(overrides)
}
