use crate::photocull_core::error::{PhotocullError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use time::{PrimitiveDateTime, format_description::FormatItem, macros::format_description};

/// Raw sibling extension, upper-case as cameras write it.
pub const RAW_EXTENSION: &str = "CR2";

const YEAR_FORMAT: &[FormatItem] = format_description!("[year]");

/// Day folder component (YYYYMMDD).
const DAY_FORMAT: &[FormatItem] = format_description!("[year][month][day]");

/// Destination paths a qualifying photo resolved to.
#[derive(Debug, Clone)]
pub struct CopyOutcome {
    pub destination: PathBuf,
    pub raw_destination: Option<PathBuf>,
}

/// Destination folder for a capture timestamp: `<dest_root>/<year>/<YYYYMMDD>`.
pub fn dated_folder(dest_root: &Path, captured_at: &PrimitiveDateTime) -> PathBuf {
    dest_root
        .join(captured_at.format(YEAR_FORMAT).unwrap())
        .join(captured_at.format(DAY_FORMAT).unwrap())
}

/// Find the raw file sharing the photo's base name, if one sits next to it.
/// Checks the upper-case extension first, then lower-case.
pub fn find_raw_sibling(photo_path: &Path) -> Option<PathBuf> {
    let parent = photo_path.parent()?;
    let stem = photo_path.file_stem().and_then(|s| s.to_str())?;

    let lower = RAW_EXTENSION.to_lowercase();
    for ext in [RAW_EXTENSION, lower.as_str()] {
        let candidate = parent.join(format!("{}.{}", stem, ext));
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    None
}

/// Copy a qualifying photo into its dated destination folder, creating the
/// folder if needed and carrying the raw sibling along when requested.
/// Under `dry_run` no filesystem writes happen; the outcome still reports the
/// destinations that would be used.
pub fn copy_photo(
    path: &Path,
    captured_at: &PrimitiveDateTime,
    dest_root: &Path,
    copy_raw: bool,
    dry_run: bool,
) -> Result<CopyOutcome> {
    let folder = dated_folder(dest_root, captured_at);
    if !dry_run {
        fs::create_dir_all(&folder).map_err(|e| PhotocullError::Copy {
            source_path: path.to_path_buf(),
            destination: folder.clone(),
            error: e,
        })?;
    }

    let destination = folder.join(path.file_name().unwrap_or_default());
    if !dry_run {
        copy_preserving_mtime(path, &destination)?;
    }

    let mut raw_destination = None;
    if copy_raw {
        if let Some(raw_path) = find_raw_sibling(path) {
            let raw_dest = folder.join(raw_path.file_name().unwrap_or_default());
            if !dry_run {
                copy_preserving_mtime(&raw_path, &raw_dest)?;
            }
            raw_destination = Some(raw_dest);
        }
    }

    Ok(CopyOutcome {
        destination,
        raw_destination,
    })
}

/// Copy a file and carry the source's modification time over to the copy.
fn copy_preserving_mtime(source: &Path, destination: &Path) -> Result<()> {
    fs::copy(source, destination).map_err(|e| PhotocullError::Copy {
        source_path: source.to_path_buf(),
        destination: destination.to_path_buf(),
        error: e,
    })?;

    if let Ok(metadata) = fs::metadata(source) {
        let mtime = filetime::FileTime::from_last_modification_time(&metadata);
        filetime::set_file_mtime(destination, mtime).ok();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use time::macros::datetime;

    #[test]
    fn test_dated_folder_layout() {
        let folder = dated_folder(Path::new("/dest"), &datetime!(2021 - 06 - 15 10:00:00));
        assert_eq!(folder, PathBuf::from("/dest/2021/20210615"));
    }

    #[test]
    fn test_find_raw_sibling_upper_and_lower() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("IMG_0001.JPG").write_str("jpeg").unwrap();
        temp.child("IMG_0001.CR2").write_str("raw").unwrap();
        temp.child("IMG_0002.JPG").write_str("jpeg").unwrap();
        temp.child("IMG_0002.cr2").write_str("raw").unwrap();
        temp.child("IMG_0003.JPG").write_str("jpeg").unwrap();

        assert_eq!(
            find_raw_sibling(temp.child("IMG_0001.JPG").path()),
            Some(temp.child("IMG_0001.CR2").path().to_path_buf())
        );
        assert_eq!(
            find_raw_sibling(temp.child("IMG_0002.JPG").path()),
            Some(temp.child("IMG_0002.cr2").path().to_path_buf())
        );
        assert_eq!(find_raw_sibling(temp.child("IMG_0003.JPG").path()), None);
    }

    #[test]
    fn test_copy_photo_creates_dated_folder() {
        let temp = assert_fs::TempDir::new().unwrap();
        let source = temp.child("card");
        source.create_dir_all().unwrap();
        source.child("IMG_0001.JPG").write_str("jpeg").unwrap();
        let dest = temp.child("dest");

        let outcome = copy_photo(
            source.child("IMG_0001.JPG").path(),
            &datetime!(2021 - 06 - 15 10:00:00),
            dest.path(),
            false,
            false,
        )
        .unwrap();

        assert_eq!(
            outcome.destination,
            dest.path().join("2021/20210615/IMG_0001.JPG")
        );
        assert!(outcome.raw_destination.is_none());
        dest.child("2021/20210615/IMG_0001.JPG")
            .assert(predicates::path::is_file());
    }

    #[test]
    fn test_copy_photo_carries_raw_sibling() {
        let temp = assert_fs::TempDir::new().unwrap();
        let source = temp.child("card");
        source.create_dir_all().unwrap();
        source.child("IMG_0001.JPG").write_str("jpeg").unwrap();
        source.child("IMG_0001.CR2").write_str("raw").unwrap();
        let dest = temp.child("dest");

        let outcome = copy_photo(
            source.child("IMG_0001.JPG").path(),
            &datetime!(2021 - 06 - 15 10:00:00),
            dest.path(),
            true,
            false,
        )
        .unwrap();

        assert_eq!(
            outcome.raw_destination,
            Some(dest.path().join("2021/20210615/IMG_0001.CR2"))
        );
        dest.child("2021/20210615/IMG_0001.CR2")
            .assert(predicates::path::is_file());
    }

    #[test]
    fn test_copy_photo_without_raw_sibling_is_not_an_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let source = temp.child("card");
        source.create_dir_all().unwrap();
        source.child("IMG_0001.JPG").write_str("jpeg").unwrap();
        let dest = temp.child("dest");

        let outcome = copy_photo(
            source.child("IMG_0001.JPG").path(),
            &datetime!(2021 - 06 - 15 10:00:00),
            dest.path(),
            true,
            false,
        )
        .unwrap();

        assert!(outcome.raw_destination.is_none());
    }

    #[test]
    fn test_copy_photo_is_idempotent() {
        let temp = assert_fs::TempDir::new().unwrap();
        let source = temp.child("card");
        source.create_dir_all().unwrap();
        source.child("IMG_0001.JPG").write_str("jpeg").unwrap();
        let dest = temp.child("dest");
        let captured_at = datetime!(2021 - 06 - 15 10:00:00);

        let first = copy_photo(
            source.child("IMG_0001.JPG").path(),
            &captured_at,
            dest.path(),
            false,
            false,
        )
        .unwrap();
        let second = copy_photo(
            source.child("IMG_0001.JPG").path(),
            &captured_at,
            dest.path(),
            false,
            false,
        )
        .unwrap();

        assert_eq!(first.destination, second.destination);
        dest.child("2021/20210615/IMG_0001.JPG")
            .assert(predicates::str::contains("jpeg"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = assert_fs::TempDir::new().unwrap();
        let source = temp.child("card");
        source.create_dir_all().unwrap();
        source.child("IMG_0001.JPG").write_str("jpeg").unwrap();
        source.child("IMG_0001.CR2").write_str("raw").unwrap();
        let dest = temp.child("dest");

        let outcome = copy_photo(
            source.child("IMG_0001.JPG").path(),
            &datetime!(2021 - 06 - 15 10:00:00),
            dest.path(),
            true,
            true,
        )
        .unwrap();

        assert_eq!(
            outcome.destination,
            dest.path().join("2021/20210615/IMG_0001.JPG")
        );
        assert!(outcome.raw_destination.is_some());
        dest.assert(predicates::path::missing());
    }
}
