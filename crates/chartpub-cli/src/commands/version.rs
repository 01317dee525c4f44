//! Version command - rewrite the version field of a chart manifest

use chartpub_core::Manifest;
use clap::ValueEnum;
use console::style;
use semver::Version;
use std::path::Path;

use crate::error::{CliError, Result};

/// Which SemVer component to increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BumpPart {
    Major,
    Minor,
    Patch,
}

/// Requested change to the manifest version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionChange {
    /// Use this exact version string
    Set(String),
    /// Increment the current SemVer version
    Bump(BumpPart),
}

pub fn run(manifest_path: &Path, output: Option<&Path>, change: VersionChange) -> Result<()> {
    let manifest = Manifest::load(manifest_path)?;
    let current = manifest.version();

    let next = match change {
        VersionChange::Set(version) => version,
        VersionChange::Bump(part) => {
            let current = current.ok_or_else(|| {
                CliError::input_with_help(
                    format!("{} has no version to bump", manifest_path.display()),
                    "use `chartpub version set <VERSION>` instead",
                )
            })?;
            bump_version(current, part)?
        }
    };

    let updated = manifest.with_version(next)?;
    let target = output.unwrap_or(manifest_path);
    updated.save_to(target)?;

    println!(
        "{} {} {} -> {}",
        style("Updated").green().bold(),
        updated.name(),
        current.unwrap_or("<none>"),
        style(updated.version().unwrap_or_default()).cyan()
    );
    if target != manifest_path {
        println!("  {} {}", style("Wrote").dim(), target.display());
    }

    Ok(())
}

/// Increment one component of a SemVer version, clearing pre-release and build
pub fn bump_version(current: &str, part: BumpPart) -> Result<String> {
    let parsed = Version::parse(current.trim()).map_err(|e| {
        CliError::input_with_help(
            format!("'{}' is not a SemVer version: {}", current, e),
            "only MAJOR.MINOR.PATCH versions can be bumped",
        )
    })?;

    let next = match part {
        BumpPart::Major => Version::new(parsed.major + 1, 0, 0),
        BumpPart::Minor => Version::new(parsed.major, parsed.minor + 1, 0),
        BumpPart::Patch => Version::new(parsed.major, parsed.minor, parsed.patch + 1),
    };

    Ok(next.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bump_version() {
        assert_eq!(bump_version("1.2.3", BumpPart::Major).unwrap(), "2.0.0");
        assert_eq!(bump_version("1.2.3", BumpPart::Minor).unwrap(), "1.3.0");
        assert_eq!(bump_version("1.2.3", BumpPart::Patch).unwrap(), "1.2.4");
        assert_eq!(bump_version("1.2.3-rc.1+b5", BumpPart::Patch).unwrap(), "1.2.4");
    }

    #[test]
    fn test_bump_rejects_non_semver() {
        assert!(bump_version("1.2", BumpPart::Patch).is_err());
        assert!(bump_version("latest", BumpPart::Major).is_err());
    }

    #[test]
    fn test_run_bump_writes_output() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("Chart.yaml");
        let output = dir.path().join("out").join("Chart.yaml");
        std::fs::write(&source, "name: web\nversion: 0.9.9\nicon: web.png\n").unwrap();

        run(&source, Some(&output), VersionChange::Bump(BumpPart::Minor)).unwrap();

        let written = Manifest::load(&output).unwrap();
        assert_eq!(written.version(), Some("0.10.0"));
        assert!(written.get("icon").is_some());
        assert_eq!(Manifest::load(&source).unwrap().version(), Some("0.9.9"));
    }

    #[test]
    fn test_run_set_rejects_empty() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("Chart.yaml");
        std::fs::write(&source, "name: web\nversion: 1.0.0\n").unwrap();

        let err = run(&source, None, VersionChange::Set(String::new())).unwrap_err();
        assert!(matches!(err, CliError::Input { .. }));
    }
}
