//! Chartpub CLI - publish packaged charts into a Helm-compatible index

use chartpub_repo::PublishConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod error;
mod exit_codes;
mod logging;
mod util;

use commands::version::{BumpPart, VersionChange};
use error::Result;

#[derive(Parser)]
#[command(name = "chartpub")]
#[command(author = "Chartpub Contributors")]
#[command(version)]
#[command(about = "Maintain a Helm-compatible chart repository index", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Publish configuration file (default: ~/.config/chartpub/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Add packaged archives to an index.yaml
    Index {
        /// Packaged chart archive(s)
        #[arg(required = true)]
        archives: Vec<PathBuf>,

        /// Chart manifest describing the archives
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Index file to merge into
        #[arg(short, long)]
        index: Option<PathBuf>,

        /// Prefix for download URLs (blank for relative URLs)
        #[arg(long, env = "CHARTPUB_BASE_URL")]
        base_url: Option<String>,

        /// Extra entry fields (key=value)
        #[arg(long = "set")]
        set: Vec<String>,
    },

    /// Change the version in a chart manifest
    Version {
        /// Chart manifest to edit
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Write the result here instead of in place
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(subcommand)]
        action: VersionAction,
    },

    /// Show indexed charts, or the versions of one chart
    Show {
        /// Chart name
        name: Option<String>,

        /// Index file to read
        #[arg(short, long)]
        index: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum VersionAction {
    /// Set an explicit version
    Set {
        /// New version
        #[arg(id = "new_version", value_name = "VERSION")]
        version: String,
    },

    /// Increment a SemVer component
    Bump {
        #[arg(value_enum)]
        part: BumpPart,
    },
}

fn main() {
    miette::set_panic_hook();

    let cli = Cli::parse();
    logging::init(cli.debug);

    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => PublishConfig::load_from(path)?,
        None => PublishConfig::load()?,
    };
    tracing::debug!(?config, "Loaded publish configuration");

    match cli.command {
        Commands::Index {
            archives,
            manifest,
            index,
            base_url,
            set,
        } => commands::index::run(
            &config,
            commands::index::IndexArgs {
                archives: &archives,
                manifest: manifest.as_deref(),
                index: index.as_deref(),
                base_url: base_url.as_deref(),
                set: &set,
            },
        ),

        Commands::Version {
            manifest,
            output,
            action,
        } => {
            let change = match action {
                VersionAction::Set { version } => VersionChange::Set(version),
                VersionAction::Bump { part } => VersionChange::Bump(part),
            };
            commands::version::run(
                manifest.as_deref().unwrap_or(config.manifest_file.as_path()),
                output.as_deref(),
                change,
            )
        }

        Commands::Show { name, index } => commands::show::run(
            index.as_deref().unwrap_or(config.index_file.as_path()),
            name.as_deref(),
        ),
    }
}
