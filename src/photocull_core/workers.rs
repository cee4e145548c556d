use crate::photocull_core::config::CullConfig;
use crate::photocull_core::copy::{CopyOutcome, copy_photo};
use crate::photocull_core::error::{PhotocullError, Result};
use crate::photocull_core::exif::MetadataProvider;
use crate::photocull_core::filter::{SkipReason, disqualify_reason};
use crossbeam_channel::unbounded;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions treated as candidate photos (lowercase).
const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// Per-file result collected by the dispatcher.
#[derive(Debug)]
pub enum FileOutcome {
    Copied(CopyOutcome),
    Skipped(SkipReason),
    Failed(PhotocullError),
}

/// Totals for one run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CullStats {
    pub copied: usize,
    pub raw_copied: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl std::fmt::Display for CullStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} photos copied ({} raw files), {} skipped, {} failed",
            self.copied, self.raw_copied, self.skipped, self.failed
        )
    }
}

fn is_photo(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| PHOTO_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// List candidate photos directly under the source directory. Non-recursive;
/// sorted so job submission order is deterministic.
pub fn enumerate_photos(source_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut photos = Vec::new();
    for entry in WalkDir::new(source_dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file() && is_photo(entry.path()) {
            photos.push(entry.into_path());
        }
    }
    photos.sort();
    Ok(photos)
}

/// One unit of work: read metadata, filter, copy. Every failure is folded
/// into the outcome; nothing escapes to abort sibling units.
fn process_photo<P: MetadataProvider>(
    provider: &mut P,
    path: &Path,
    config: &CullConfig,
) -> FileOutcome {
    let metadata = match provider.read(path) {
        Ok(metadata) => metadata,
        Err(e) => return FileOutcome::Failed(e),
    };

    if let Some(reason) = disqualify_reason(&metadata, &config.criteria) {
        return FileOutcome::Skipped(reason);
    }

    // The filter guarantees a timestamp on qualifying photos.
    let Some(captured_at) = metadata.captured_at else {
        return FileOutcome::Skipped(SkipReason::NoTimestamp);
    };

    match copy_photo(
        path,
        &captured_at,
        &config.dest_dir,
        config.copy_raw,
        config.dry_run,
    ) {
        Ok(outcome) => FileOutcome::Copied(outcome),
        Err(e) => FileOutcome::Failed(e),
    }
}

fn report_outcome(path: &Path, outcome: &FileOutcome, dry_run: bool) {
    let filename = path.file_name().unwrap_or_default().to_string_lossy();
    match outcome {
        FileOutcome::Copied(copy) => {
            let folder = copy
                .destination
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .display();
            if dry_run {
                println!("[DRY RUN] Would copy '{}' to {}", filename, folder);
            } else {
                println!("Copied '{}' to {}", filename, folder);
            }
            if let Some(raw_dest) = &copy.raw_destination {
                let raw_name = raw_dest.file_name().unwrap_or_default().to_string_lossy();
                if dry_run {
                    println!("[DRY RUN] Would copy '{}' to {}", raw_name, folder);
                } else {
                    println!("Copied '{}' to {}", raw_name, folder);
                }
            }
        }
        FileOutcome::Skipped(reason) => {
            log::debug!("Skipping '{}': {}", filename, reason);
        }
        FileOutcome::Failed(e) => {
            log::warn!("Error processing {}: {}", path.display(), e);
        }
    }
}

/// Run the whole pipeline: enumerate candidates, fan them out over a pool of
/// `config.workers` workers, and fold per-file outcomes into run totals.
/// Each worker builds its own metadata provider from the factory; once
/// submitted, every unit runs to completion.
pub fn run<P, F>(config: &CullConfig, make_provider: F) -> Result<CullStats>
where
    P: MetadataProvider,
    F: Fn() -> Result<P> + Sync,
{
    let photos = enumerate_photos(&config.source_dir)?;
    log::info!(
        "Found {} candidate photos in {}",
        photos.len(),
        config.source_dir.display()
    );

    let bar_style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
        .unwrap();
    let bar = ProgressBar::new(photos.len() as u64).with_style(bar_style);
    bar.set_message("Filtering photos");

    let num_workers = config.workers.max(1);
    let (job_tx, job_rx) = unbounded::<PathBuf>();
    let (result_tx, result_rx) = unbounded();

    let worker_bar = bar.clone();
    let make_provider = &make_provider;

    rayon::scope(move |s| {
        s.spawn(move |_| {
            for path in photos {
                if job_tx.send(path).is_err() {
                    log::error!("Failed to send job to worker channel");
                    break;
                }
            }
        });

        for _ in 0..num_workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let bar = worker_bar.clone();

            s.spawn(move |_| match make_provider() {
                Ok(mut provider) => {
                    for path in job_rx {
                        let outcome = process_photo(&mut provider, &path, config);
                        report_outcome(&path, &outcome, config.dry_run);
                        bar.inc(1);
                        if result_tx.send(outcome).is_err() {
                            log::error!("Failed to send result to main thread");
                            break;
                        }
                    }
                }
                Err(e) => {
                    log::error!("A worker failed to initialize its metadata provider: {}", e);
                }
            });
        }
    });

    let mut stats = CullStats::default();
    for outcome in result_rx.iter() {
        match outcome {
            FileOutcome::Copied(copy) => {
                stats.copied += 1;
                if copy.raw_destination.is_some() {
                    stats.raw_copied += 1;
                }
            }
            FileOutcome::Skipped(_) => stats.skipped += 1,
            FileOutcome::Failed(_) => stats.failed += 1,
        }
    }

    bar.finish_with_message("Filtering complete");
    log::info!("Run complete: {}", stats);

    Ok(stats)
}
