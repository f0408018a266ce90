use crate::core::timeseries::{ordered_by_code, TimeSeries};
use crate::domain::model::RegionRecord;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CrossingDirection {
    Upward,
    Downward,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneEvent {
    pub code: String,
    pub name: String,
    pub direction: CrossingDirection,
    pub from_units: u64,
    pub to_units: u64,
    pub unit_size: u64,
    pub base_population: u64,
    pub latest_population: u64,
}

/// Compares whole units of `unit_size` between two populations.
/// Only the net change across the two endpoints is visible.
pub fn detect_crossing(
    base_population: u64,
    latest_population: u64,
    unit_size: u64,
) -> Option<(CrossingDirection, u64, u64)> {
    if unit_size == 0 {
        return None;
    }
    let base_units = base_population / unit_size;
    let latest_units = latest_population / unit_size;

    match latest_units.cmp(&base_units) {
        std::cmp::Ordering::Greater => Some((CrossingDirection::Upward, base_units, latest_units)),
        std::cmp::Ordering::Less => Some((CrossingDirection::Downward, base_units, latest_units)),
        std::cmp::Ordering::Equal => None,
    }
}

pub fn find_population_milestones(
    regions: &[RegionRecord],
    unit_size: u64,
    base_year: i32,
    latest_year: i32,
) -> Vec<MilestoneEvent> {
    ordered_by_code(regions)
        .into_iter()
        .filter_map(|region| {
            let (base, latest) = TimeSeries::new(region).endpoints(base_year, latest_year)?;
            let (direction, from_units, to_units) =
                detect_crossing(base.total_population, latest.total_population, unit_size)?;

            tracing::debug!(
                "{} moved from {} to {} units of {}",
                region.name(),
                from_units,
                to_units,
                unit_size
            );

            Some(MilestoneEvent {
                code: region.code().to_string(),
                name: region.name().to_string(),
                direction,
                from_units,
                to_units,
                unit_size,
                base_population: base.total_population,
                latest_population: latest.total_population,
            })
        })
        .collect()
}
