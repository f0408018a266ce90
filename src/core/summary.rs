use crate::core::metrics::percent_change;
use crate::core::timeseries::{ordered_by_code, TimeSeries};
use crate::domain::model::{RegionRecord, Unavailable};
use serde::Serialize;

/// Base-year versus latest-year summary of one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
    pub code: String,
    pub name: String,
    pub group: Option<String>,
    pub base_population: u64,
    pub latest_population: u64,
    pub growth_rate: f64,
    pub growth_absolute: i64,
    pub base_median_age: f64,
    pub latest_median_age: f64,
    pub age_change: f64,
    pub base_gender_ratio: f64,
    pub latest_gender_ratio: f64,
    /// Latest minus base gender ratio.
    pub gender_ratio_shift: f64,
}

pub fn summarize_region(
    region: &RegionRecord,
    base_year: i32,
    latest_year: i32,
) -> Result<RegionSummary, Unavailable> {
    let series = TimeSeries::new(region);
    let base = series.metrics_for(base_year)?;
    let latest = series.metrics_for(latest_year)?;
    let growth_rate = percent_change(base.total_population, latest.total_population)?;

    Ok(RegionSummary {
        code: region.code().to_string(),
        name: region.name().to_string(),
        group: region.identity.group.clone(),
        base_population: base.total_population,
        latest_population: latest.total_population,
        growth_rate,
        growth_absolute: latest.total_population as i64 - base.total_population as i64,
        base_median_age: base.median_age,
        latest_median_age: latest.median_age,
        age_change: latest.median_age - base.median_age,
        base_gender_ratio: base.gender_ratio,
        latest_gender_ratio: latest.gender_ratio,
        gender_ratio_shift: latest.gender_ratio - base.gender_ratio,
    })
}

/// Summaries for every region with both endpoints, in region-code order.
pub fn summarize_regions(
    regions: &[RegionRecord],
    base_year: i32,
    latest_year: i32,
) -> Vec<RegionSummary> {
    ordered_by_code(regions)
        .into_iter()
        .filter_map(|region| match summarize_region(region, base_year, latest_year) {
            Ok(summary) => Some(summary),
            Err(reason) => {
                tracing::debug!("Summary: skipping {}: {}", region.name(), reason);
                None
            }
        })
        .collect()
}
