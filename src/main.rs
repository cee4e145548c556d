use anyhow::Result;
use clap::Parser;
use photocull::photocull_core::exif::ExifToolProvider;
use photocull::photocull_core::{Cli, CullConfig, workers};
use simplelog::{CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, WriteLogger};
use std::fs::File;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize loggers
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Warn,
        Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )];

    if cli.log {
        loggers.push(WriteLogger::new(
            cli.log_level,
            Config::default(),
            File::create("photocull.log")?,
        ));
    }

    CombinedLogger::init(loggers)?;

    let config = CullConfig::from_cli(&cli)?;

    let rating_tag = config.rating_tag.clone();
    let stats = workers::run(&config, || ExifToolProvider::new(&rating_tag))?;

    if config.dry_run {
        println!("\n[DRY RUN] Would copy:");
        println!("  {} photos", stats.copied);
        if config.copy_raw {
            println!("  {} raw files", stats.raw_copied);
        }
    } else {
        println!("\nDone filtering images by rating.");
        println!("  {} photos copied", stats.copied);
        if stats.raw_copied > 0 {
            println!("  {} raw files copied", stats.raw_copied);
        }
        println!("  {} skipped", stats.skipped);
        if stats.failed > 0 {
            println!("  {} failed", stats.failed);
        }
    }

    Ok(())
}
