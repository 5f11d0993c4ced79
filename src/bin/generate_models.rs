//! Writes `models.json` for a directory of model files.
//!
//! ```text
//! generate-models [DIR] [--extension obj] [--with-sizes]
//! ```

use anyhow::Context as _;
use clap::Parser;
use env_logger::{Builder, Env};

use autoframe::manifest::{GenerateOptions, ModelManifest};

#[derive(Debug, Parser)]
#[command(name = "generate-models", version, about = "Generate the viewer's model list")]
struct Args {
    /// Directory to scan; created if missing
    #[arg(default_value = "models")]
    dir: std::path::PathBuf,

    /// Model file extension to list
    #[arg(long, default_value = "obj")]
    extension: String,

    /// Record a human-readable file size for each model
    #[arg(long)]
    with_sizes: bool,
}

fn main() -> anyhow::Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let options = GenerateOptions {
        extension: args.extension,
        with_sizes: args.with_sizes,
    };

    let (manifest, out_file) = ModelManifest::generate_and_write(&args.dir, &options)
        .with_context(|| format!("failed to generate model list for {}", args.dir.display()))?;

    if manifest.is_empty() {
        log::warn!("No .{} files found in {}", options.extension, args.dir.display());
    }
    log::info!("Wrote {} with {} models", out_file.display(), manifest.len());
    Ok(())
}
