use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use paipan_parser::config::Settings;
use paipan_parser::{process_html, process_text, ExtractError, Report, ReportKind};

#[derive(Parser)]
#[command(name = "paipan_parser", about = "Extract structured records from 八字 / 六爻 chart reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a Four Pillars (八字) report
    Bazi {
        file: PathBuf,
        /// Input is the report page's HTML rather than reduced text
        #[arg(long)]
        html: bool,
    },
    /// Extract a Six Lines (六爻) report
    Liuyao {
        file: PathBuf,
        #[arg(long)]
        html: bool,
    },
    /// Extract every file in a directory in parallel
    Batch {
        dir: PathBuf,
        #[arg(short, long, value_enum)]
        kind: ReportKind,
        #[arg(long)]
        html: bool,
        /// Write one <name>.json per input here
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load();
    let cli = Cli::parse();

    match cli.command {
        Commands::Bazi { file, html } => run_single(ReportKind::Bazi, &file, html, &settings),
        Commands::Liuyao { file, html } => run_single(ReportKind::Liuyao, &file, html, &settings),
        Commands::Batch {
            dir,
            kind,
            html,
            out,
        } => {
            let t0 = Instant::now();
            let counts = run_batch(kind, &dir, html, out.as_deref(), &settings)?;
            println!(
                "Extracted {} reports ({} ok, {} failed) in {:.1}s",
                counts.ok + counts.failed,
                counts.ok,
                counts.failed,
                t0.elapsed().as_secs_f64()
            );
            Ok(())
        }
    }
}

fn extract_file(kind: ReportKind, path: &Path, html: bool) -> Result<paipan_parser::Result<Report>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let result = std::panic::catch_unwind(|| {
        if html {
            process_html(kind, &raw)
        } else {
            process_text(kind, &raw)
        }
    });
    Ok(result.unwrap_or_else(|panic| Err(ExtractError::Internal(panic_message(panic.as_ref())))))
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic during extraction".to_string())
}

fn to_json(value: &serde_json::Value, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

fn report_json(result: &paipan_parser::Result<Report>) -> Result<serde_json::Value> {
    Ok(match result {
        Ok(report) => serde_json::to_value(report)?,
        Err(e) => e.to_json(),
    })
}

fn run_single(kind: ReportKind, path: &Path, html: bool, settings: &Settings) -> Result<()> {
    let result = extract_file(kind, path, html)?;
    println!("{}", to_json(&report_json(&result)?, settings.pretty)?);
    match result {
        Ok(_) => {
            info!(file = %path.display(), "extracted");
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("Extraction failed for {}", path.display())),
    }
}

struct BatchCounts {
    ok: usize,
    failed: usize,
}

fn run_batch(
    kind: ReportKind,
    dir: &Path,
    html: bool,
    out: Option<&Path>,
    settings: &Settings,
) -> Result<BatchCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    if files.is_empty() {
        println!("No files in {}.", dir.display());
        return Ok(BatchCounts { ok: 0, failed: 0 });
    }
    if let Some(out) = out {
        std::fs::create_dir_all(out)
            .with_context(|| format!("Failed to create {}", out.display()))?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut counts = BatchCounts { ok: 0, failed: 0 };

    for chunk in files.chunks(settings.chunk_size) {
        let results: Vec<_> = chunk
            .par_iter()
            .map(|path| (path, extract_file(kind, path, html)))
            .collect();

        for (path, result) in results {
            let result = match result {
                Ok(r) => r,
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "skipped");
                    counts.failed += 1;
                    continue;
                }
            };
            match &result {
                Ok(_) => counts.ok += 1,
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "extraction failed");
                    counts.failed += 1;
                }
            }
            if let Some(out) = out {
                let stem = path.file_stem().unwrap_or_default().to_string_lossy();
                let target = out.join(format!("{}.json", stem));
                std::fs::write(&target, to_json(&report_json(&result)?, settings.pretty)?)
                    .with_context(|| format!("Failed to write {}", target.display()))?;
            }
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(counts)
}
