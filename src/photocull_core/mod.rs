pub mod cli;
pub mod config;
pub mod copy;
pub mod error;
pub mod exif;
pub mod filter;
pub mod workers;

pub use cli::Cli;
pub use config::CullConfig;
pub use copy::{CopyOutcome, RAW_EXTENSION, dated_folder, find_raw_sibling};
pub use error::PhotocullError;
pub use exif::{ExifToolProvider, MetadataProvider, PhotoMetadata};
pub use filter::{FilterCriteria, SkipReason, qualifies};
pub use workers::{CullStats, FileOutcome, enumerate_photos, run};
