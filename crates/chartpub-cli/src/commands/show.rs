//! Show command - display the contents of an index

use chartpub_repo::{LoadOutcome, RepositoryIndex};
use console::style;
use std::path::Path;

use crate::error::{CliError, Result};
use crate::util::truncate_hash;

pub fn run(index_path: &Path, name: Option<&str>) -> Result<()> {
    let (index, outcome) = RepositoryIndex::load_with_outcome(index_path);
    if let LoadOutcome::Discarded { reason } = &outcome {
        println!(
            "{} {} is not a usable index ({})",
            style("Warning").yellow().bold(),
            index_path.display(),
            reason
        );
    }

    println!(
        "{}: {}",
        style("Generated").bold(),
        index.generated().unwrap_or("never")
    );

    match name {
        None => {
            if index.is_empty() {
                println!("No charts indexed");
                return Ok(());
            }
            for chart in index.names() {
                let versions = index.get(chart);
                println!(
                    "  {} {} ({} version(s))",
                    style(chart).cyan().bold(),
                    versions.first().map(|e| e.version.as_str()).unwrap_or("-"),
                    versions.len()
                );
            }
        }
        Some(name) => {
            let versions = index.get(name);
            if versions.is_empty() {
                return Err(CliError::input(format!(
                    "Chart '{}' not found in {}",
                    name,
                    index_path.display()
                )));
            }

            println!("{}", style(name).cyan().bold());
            for entry in versions {
                println!(
                    "  {:<12} {}  {}  {}",
                    entry.version,
                    entry.created.as_deref().unwrap_or("-"),
                    truncate_hash(entry.digest.as_deref().unwrap_or("-"), 12),
                    entry.download_url().unwrap_or("-")
                );
            }
        }
    }

    Ok(())
}
