use clap::Parser;
use simplelog::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Filter photos on a camera card by rating and date, copying keepers into dated folders")]
pub struct Cli {
    /// Directory to read photos from (e.g. a mounted memory card)
    #[arg(long = "source_path", required = true)]
    pub source_path: PathBuf,

    /// Directory to copy qualifying photos into
    #[arg(long = "dest_path", required = true)]
    pub dest_path: PathBuf,

    /// Minimum rating a photo must carry to be copied
    #[arg(long = "min_rating", default_value_t = 1)]
    pub min_rating: u8,

    /// Also copy the matching .CR2 file next to each qualifying photo
    #[arg(long = "copy_cr2")]
    pub copy_cr2: bool,

    /// Earliest capture date to copy, YYYYMMDD (inclusive)
    #[arg(long = "start_date")]
    pub start_date: Option<String>,

    /// Latest capture date to copy, YYYYMMDD (inclusive)
    #[arg(long = "end_date")]
    pub end_date: Option<String>,

    /// Exif tag holding the rating (vendor-specific; Canon uses "Rating")
    #[arg(long = "rating_tag", default_value = "Rating")]
    pub rating_tag: String,

    /// Worker pool width (0 = one worker per CPU core)
    #[arg(long, default_value_t = 8)]
    pub workers: usize,

    /// Show what would be copied without making changes
    #[arg(long = "dry_run")]
    pub dry_run: bool,

    /// Enable file logging to photocull.log
    #[arg(long = "log")]
    pub log: bool,

    /// Log level for file logging (debug, info, warn, error)
    #[arg(long = "log_level", default_value_t = LevelFilter::Debug)]
    pub log_level: LevelFilter,
}
