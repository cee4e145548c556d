use crate::photocull_core::exif::PhotoMetadata;
use time::Date;

/// Thresholds a photo must meet to be copied. Immutable for the run.
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    pub min_rating: u8,
    /// Inclusive; `None` is unbounded on that side.
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// Why a photo failed the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoTimestamp,
    OutsideDateRange,
    NoRating,
    BelowMinRating,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoTimestamp => "no capture timestamp",
            SkipReason::OutsideDateRange => "outside date range",
            SkipReason::NoRating => "no rating",
            SkipReason::BelowMinRating => "rating below minimum",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Check a photo's metadata against the criteria, returning the first failing
/// check. `None` means the photo qualifies for copying.
///
/// Date bounds cover whole calendar days, so a photo taken any time on the
/// end date is still in range.
pub fn disqualify_reason(
    metadata: &PhotoMetadata,
    criteria: &FilterCriteria,
) -> Option<SkipReason> {
    let Some(captured_at) = metadata.captured_at else {
        return Some(SkipReason::NoTimestamp);
    };

    let date = captured_at.date();
    if criteria.start_date.is_some_and(|start| date < start)
        || criteria.end_date.is_some_and(|end| date > end)
    {
        return Some(SkipReason::OutsideDateRange);
    }

    let Some(rating) = metadata.rating else {
        return Some(SkipReason::NoRating);
    };
    if rating < criteria.min_rating {
        return Some(SkipReason::BelowMinRating);
    }

    None
}

/// Pure qualify decision: timestamp in range and rating at or above minimum.
pub fn qualifies(metadata: &PhotoMetadata, criteria: &FilterCriteria) -> bool {
    disqualify_reason(metadata, criteria).is_none()
}
