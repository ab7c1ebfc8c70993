use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use docmill_htmlwash::{clean, relocate};

/// Flatten `.html` files out of a source tree into one directory, then
/// strip head/style/script/meta from each and rewrite it as UTF-8.
#[derive(Parser, Debug)]
#[command(name = "docmill-htmlwash")]
struct Args {
    /// Source tree to collect .html files from.
    #[arg(long, default_value = "./old-HTML")]
    src: PathBuf,

    /// Flat destination directory for the collected files.
    #[arg(long, default_value = "onlyHtml")]
    dest: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("docmill=info".parse()?))
        .init();

    let args = Args::parse();

    let moved = relocate::relocate_html_files(&args.src, &args.dest)?;
    info!(moved, src = %args.src.display(), dest = %args.dest.display(), "Relocation finished");

    let cleaned = clean::clean_folder(&args.dest)?;
    info!(cleaned, dest = %args.dest.display(), "Cleaning finished");

    Ok(())
}
