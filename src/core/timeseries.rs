use crate::core::metrics::derive_metrics;
use crate::domain::model::{DerivedMetrics, RegionRecord, Unavailable};

/// Derived metrics for one region at any requested year.
///
/// Every finder goes through this type so that a missing year means the same
/// thing everywhere: exact-year lookup only, no nearest-year fallback.
#[derive(Debug, Clone, Copy)]
pub struct TimeSeries<'a> {
    region: &'a RegionRecord,
}

impl<'a> TimeSeries<'a> {
    pub fn new(region: &'a RegionRecord) -> Self {
        Self { region }
    }

    pub fn region(&self) -> &'a RegionRecord {
        self.region
    }

    pub fn metrics_for(&self, year: i32) -> Result<DerivedMetrics, Unavailable> {
        let snapshot = self
            .region
            .snapshot(year)
            .ok_or(Unavailable::MissingYear(year))?;
        derive_metrics(snapshot)
    }

    /// Metrics at every year in `years`, or the first reason one is missing.
    pub fn metrics_series(&self, years: &[i32]) -> Result<Vec<DerivedMetrics>, Unavailable> {
        years.iter().map(|&year| self.metrics_for(year)).collect()
    }

    /// Metrics at both ends of a window; logs and returns `None` when either is missing.
    pub fn endpoints(
        &self,
        base_year: i32,
        latest_year: i32,
    ) -> Option<(DerivedMetrics, DerivedMetrics)> {
        match (self.metrics_for(base_year), self.metrics_for(latest_year)) {
            (Ok(base), Ok(latest)) => Some((base, latest)),
            (Err(reason), _) | (_, Err(reason)) => {
                tracing::debug!("Skipping {}: {}", self.region.name(), reason);
                None
            }
        }
    }
}

/// Regions ordered by code, the scan order every finder uses.
pub fn ordered_by_code(regions: &[RegionRecord]) -> Vec<&RegionRecord> {
    let mut ordered: Vec<&RegionRecord> = regions.iter().collect();
    ordered.sort_by(|a, b| a.code().cmp(b.code()));
    ordered
}
