//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// Input error - empty name/version, malformed --set, reserved override
pub const INPUT_ERROR: i32 = 2;

/// Parse error - Chart.yaml or configuration could not be read as YAML
pub const PARSE_ERROR: i32 = 4;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;
