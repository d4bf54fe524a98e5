// Command-line entry point. The library crate holds all of the compression
// pipeline; this binary only loads files, runs one batch and saves the archive.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use image_compressor_lib::core::{CompressionStats, StatusKind};
use image_compressor_lib::utils::load_source_file;
use image_compressor_lib::{AppState, CompressorConfig, add_files, compress_all, download_all, list_files};

/// Recompress images locally and bundle the results into one zip archive
#[derive(Parser)]
#[command(name = "image-compressor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Image files to compress (JPEG, PNG, WebP)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Quality between 0 (exclusive) and 1; defaults to the configured value
    #[arg(short, long)]
    quality: Option<f32>,

    /// Archive path; defaults to the configured archive name
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log every state transition
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_target(false)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Signed size change: "-12%" when smaller, "+5%" when the output grew.
fn size_change(stats: &CompressionStats) -> String {
    format!("{:+}%", -stats.saved_percent)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CompressorConfig::load_or_default(cli.config.as_deref())
        .await
        .context("loading configuration")?;
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.archive_name));
    let state = AppState::new(config);

    let mut sources = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        match load_source_file(path).await {
            Ok(file) => sources.push(file),
            Err(e) => warn!("Skipping {}: {e}", path.display()),
        }
    }

    let added = add_files(&state, sources);
    if added.added.is_empty() {
        bail!("no supported images to compress");
    }

    let summary = compress_all(&state, cli.quality).await?;

    for report in list_files(&state) {
        match (report.status, report.result_size, report.stats) {
            (StatusKind::Done, Some(size), Some(stats)) => println!(
                "{}  {:.1} KB -> {:.1} KB  ({})",
                report.name,
                report.original_size as f64 / 1024.0,
                size as f64 / 1024.0,
                size_change(&stats)
            ),
            _ => println!(
                "{}  failed: {}",
                report.name,
                report.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }

    println!(
        "{} compressed, {} failed, {:.1} KB saved in {}ms",
        summary.done,
        summary.failed,
        summary.saved_bytes() as f64 / 1024.0,
        summary.elapsed_ms
    );

    let Some(archive) = download_all(&state).await? else {
        bail!("no image could be compressed");
    };

    tokio::fs::write(&output, &archive.bytes)
        .await
        .with_context(|| format!("writing {}", output.display()))?;
    info!("Wrote {} ({} files)", output.display(), archive.entry_count);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_change_is_signed() {
        assert_eq!(size_change(&CompressionStats::new(1000, 880)), "-12%");
        assert_eq!(size_change(&CompressionStats::new(100, 105)), "+5%");
        assert_eq!(size_change(&CompressionStats::new(100, 100)), "+0%");
    }
}
