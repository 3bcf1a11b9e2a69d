//! Inclusive date-range selection

use crate::data::PriceSeries;
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

/// Inclusive `[start, end]` date window.
///
/// `start <= end` is not enforced: an inverted range simply selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The range spanning every date of `series`, or `None` when it is empty
    pub fn covering(series: &PriceSeries) -> Option<Self> {
        Some(Self::new(series.first_date()?, series.last_date()?))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

/// Records of `series` dated within `[start, end]`, in order.
///
/// Returns an empty series when nothing qualifies.
pub fn filter(series: &PriceSeries, start: NaiveDate, end: NaiveDate) -> PriceSeries {
    if start > end {
        debug!("Inverted range {} > {}, selecting nothing", start, end);
        return PriceSeries::default();
    }

    let points = series.points();
    let lo = points.partition_point(|p| p.date < start);
    let hi = points.partition_point(|p| p.date <= end);
    debug!("Range {}..={} selects {} of {} rows", start, end, hi - lo, points.len());

    PriceSeries::from_sorted(points[lo..hi].to_vec())
}

impl PriceSeries {
    /// Shorthand for [`filter`] with a [`DateRange`]
    pub fn within(&self, range: DateRange) -> PriceSeries {
        filter(self, range.start, range.end)
    }
}
