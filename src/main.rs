//! Command-line interface for the `folio` static blog generator.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio::{build::build_site, config::Config};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Project root; `folio.yaml` is looked up here and in its parents
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the static site
    Build {
        /// Output directory, overriding the project file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Build { output } => {
            let root = cli
                .root
                .canonicalize()
                .with_context(|| format!("resolving project root `{}`", cli.root.display()))?;
            let mut config = Config::from_directory(&root)?;
            if let Some(output) = output {
                config.output_directory = output;
            }

            println!("🚀 Building {}...", config.title);
            let summary = build_site(&config)?;
            println!("✅ Build complete!");
            println!("📄 Generated {} posts", summary.posts);
            println!("🏷️  Generated {} tag pages", summary.tags);
            Ok(())
        }
    }
}
