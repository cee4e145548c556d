use crate::photocull_core::cli::Cli;
use crate::photocull_core::error::{PhotocullError, Result};
use crate::photocull_core::filter::FilterCriteria;
use std::path::PathBuf;
use time::{Date, format_description::FormatItem, macros::format_description};

/// Date format for the --start_date/--end_date arguments.
pub const CLI_DATE_FORMAT: &[FormatItem] = format_description!("[year][month][day]");

/// Configuration for one culling run, validated once at startup and shared
/// read-only with every worker.
#[derive(Debug, Clone)]
pub struct CullConfig {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub criteria: FilterCriteria,
    pub copy_raw: bool,
    pub rating_tag: String,
    pub workers: usize,
    pub dry_run: bool,
}

impl CullConfig {
    /// Validate CLI arguments into a run configuration.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        if !cli.source_path.exists() || !cli.source_path.is_dir() {
            return Err(PhotocullError::NotADirectory(cli.source_path.clone()));
        }

        let start_date = cli.start_date.as_deref().map(parse_cli_date).transpose()?;
        let end_date = cli.end_date.as_deref().map(parse_cli_date).transpose()?;

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(PhotocullError::Argument(format!(
                    "start date {start} is after end date {end}"
                )));
            }
        }

        let workers = if cli.workers == 0 {
            num_cpus::get()
        } else {
            cli.workers
        };

        Ok(CullConfig {
            source_dir: cli.source_path.clone(),
            dest_dir: cli.dest_path.clone(),
            criteria: FilterCriteria {
                min_rating: cli.min_rating,
                start_date,
                end_date,
            },
            copy_raw: cli.copy_cr2,
            rating_tag: cli.rating_tag.clone(),
            workers,
            dry_run: cli.dry_run,
        })
    }
}

fn parse_cli_date(s: &str) -> Result<Date> {
    Date::parse(s, CLI_DATE_FORMAT).map_err(|e| {
        PhotocullError::InvalidDateFormat(format!("'{s}' is not a YYYYMMDD date: {e}"))
    })
}
