use crate::core::metrics::percent_change;
use crate::core::timeseries::TimeSeries;
use crate::domain::model::{DerivedMetrics, RegionRecord};
use serde::{Deserialize, Serialize};

/// Two adjacent regions, identified by code or display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborPair {
    pub first: String,
    pub second: String,
}

impl NeighborPair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborContrast {
    pub pair: String,
    pub first_code: String,
    pub second_code: String,
    pub first_growth: f64,
    pub second_growth: f64,
    pub growth_difference: f64,
    pub first_median_age: f64,
    pub second_median_age: f64,
    pub age_difference: f64,
    pub gender_difference: f64,
}

struct Endpoint<'a> {
    region: &'a RegionRecord,
    growth: f64,
    latest: DerivedMetrics,
}

fn endpoint<'a>(
    regions: &'a [RegionRecord],
    key: &str,
    base_year: i32,
    latest_year: i32,
) -> Option<Endpoint<'a>> {
    let region = regions.iter().find(|r| r.identity.matches(key))?;
    let (base, latest) = TimeSeries::new(region).endpoints(base_year, latest_year)?;
    let growth = percent_change(base.total_population, latest.total_population).ok()?;
    Some(Endpoint {
        region,
        growth,
        latest,
    })
}

/// Contrasts between configured neighbor pairs, largest growth gap first.
/// Pairs with a missing region or endpoint year are skipped.
pub fn find_neighbor_contrasts(
    regions: &[RegionRecord],
    pairs: &[NeighborPair],
    base_year: i32,
    latest_year: i32,
) -> Vec<NeighborContrast> {
    let mut contrasts: Vec<NeighborContrast> = pairs
        .iter()
        .filter_map(|pair| {
            let first = endpoint(regions, &pair.first, base_year, latest_year);
            let second = endpoint(regions, &pair.second, base_year, latest_year);
            let (Some(first), Some(second)) = (first, second) else {
                tracing::debug!("Neighbor contrast: skipping {} / {}", pair.first, pair.second);
                return None;
            };

            Some(NeighborContrast {
                pair: format!("{} vs {}", first.region.name(), second.region.name()),
                first_code: first.region.code().to_string(),
                second_code: second.region.code().to_string(),
                first_growth: first.growth,
                second_growth: second.growth,
                growth_difference: (first.growth - second.growth).abs(),
                first_median_age: first.latest.median_age,
                second_median_age: second.latest.median_age,
                age_difference: (first.latest.median_age - second.latest.median_age).abs(),
                gender_difference: (first.latest.gender_ratio - second.latest.gender_ratio).abs(),
            })
        })
        .collect();

    // 穩定排序，同分時維持設定中的順序
    contrasts.sort_by(|a, b| b.growth_difference.total_cmp(&a.growth_difference));
    contrasts
}
