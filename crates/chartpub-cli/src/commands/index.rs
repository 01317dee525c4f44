//! Index command - merge packaged archives into index.yaml

use chartpub_core::Manifest;
use chartpub_repo::{LoadOutcome, PublishConfig, RepositoryIndex, SystemClock};
use console::style;
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};
use crate::util::{parse_set_overrides, truncate_hash};

pub struct IndexArgs<'a> {
    pub archives: &'a [PathBuf],
    pub manifest: Option<&'a Path>,
    pub index: Option<&'a Path>,
    pub base_url: Option<&'a str>,
    pub set: &'a [String],
}

pub fn run(config: &PublishConfig, args: IndexArgs<'_>) -> Result<()> {
    if args.archives.is_empty() {
        return Err(CliError::input("At least one archive is required"));
    }

    let manifest_path = args.manifest.unwrap_or(config.manifest_file.as_path());
    let index_path = args.index.unwrap_or(config.index_file.as_path());
    // An explicit blank flag asks for relative URLs
    let base_url = args.base_url.or_else(|| config.base_url()).unwrap_or("");

    let mut overrides = config.overrides.clone();
    overrides.extend(parse_set_overrides(args.set)?);

    let manifest = Manifest::load(manifest_path)?;
    let version = manifest.version().unwrap_or("<none>");

    println!(
        "{} {} v{}",
        style("Indexing").cyan().bold(),
        manifest.name(),
        version
    );

    let (mut index, outcome) = RepositoryIndex::load_with_outcome(index_path);
    match outcome {
        LoadOutcome::Missing => println!(
            "  {} {} not found, starting a new index",
            style("Note").dim(),
            index_path.display()
        ),
        LoadOutcome::Discarded { reason } => println!(
            "  {} existing {} discarded ({})",
            style("Warning").yellow().bold(),
            index_path.display(),
            reason
        ),
        LoadOutcome::Loaded => {}
    }

    if args.archives.len() > 1 {
        println!(
            "  {} {} archives share {} v{}, only the last one stays in the index",
            style("Warning").yellow().bold(),
            args.archives.len(),
            manifest.name(),
            version
        );
    }

    let overrides = (!overrides.is_empty()).then_some(&overrides);
    for archive in args.archives {
        index = index.append(&manifest, archive, base_url, overrides, &SystemClock)?;

        if let Some(entry) = index.get_version(manifest.name(), version) {
            println!(
                "  {} {} ({})",
                style("Added").green().bold(),
                entry.download_url().unwrap_or_default(),
                truncate_hash(entry.digest.as_deref().unwrap_or_default(), 12)
            );
        }
    }

    index.write_to(index_path)?;

    println!(
        "  {} {} ({} version(s) of {})",
        style("Wrote").green().bold(),
        index_path.display(),
        index.get(manifest.name()).len(),
        manifest.name()
    );

    Ok(())
}
