use super::{sort_desc_by, AgeBands};
use crate::core::timeseries::{ordered_by_code, TimeSeries};
use crate::domain::model::RegionRecord;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeStructureProfile {
    pub code: String,
    pub name: String,
    pub youth_bulge_ratio: f64,
    pub young_adult_share: f64,
    pub middle_age_share: f64,
    pub elderly_share: f64,
    pub children_share: f64,
    pub median_age: f64,
}

/// Regions ranked by youth bulge ratio (young-adult share over middle-age
/// share) at `year`, highest first.
pub fn find_extreme_age_distributions(
    regions: &[RegionRecord],
    bands: &AgeBands,
    year: i32,
) -> Vec<AgeStructureProfile> {
    let mut profiles: Vec<AgeStructureProfile> = ordered_by_code(regions)
        .into_iter()
        .filter_map(|region| {
            let metrics = match TimeSeries::new(region).metrics_for(year) {
                Ok(metrics) => metrics,
                Err(reason) => {
                    tracing::debug!("Age structure: skipping {}: {}", region.name(), reason);
                    return None;
                }
            };

            let young_adult_share = bands.young_adult.share(&metrics);
            let middle_age_share = bands.middle_age.share(&metrics);
            let youth_bulge_ratio = if middle_age_share > 0.0 {
                young_adult_share / middle_age_share
            } else {
                0.0
            };

            Some(AgeStructureProfile {
                code: region.code().to_string(),
                name: region.name().to_string(),
                youth_bulge_ratio,
                young_adult_share,
                middle_age_share,
                elderly_share: bands.elderly.share(&metrics),
                children_share: bands.children.share(&metrics),
                median_age: metrics.median_age,
            })
        })
        .collect();

    sort_desc_by(&mut profiles, |p| p.youth_bulge_ratio, |p| p.code.as_str());
    profiles
}
