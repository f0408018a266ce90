use crate::core::timeseries::{ordered_by_code, TimeSeries};
use crate::domain::model::{AgeShare, RegionRecord};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenderAnomaly {
    pub code: String,
    pub name: String,
    pub overall_gender_ratio: f64,
    pub most_male_age: String,
    pub most_male_ratio: f64,
    pub most_female_age: String,
    pub most_female_ratio: f64,
}

impl GenderAnomaly {
    pub fn parity_deviation(&self) -> f64 {
        (self.overall_gender_ratio - 100.0).abs()
    }
}

fn group_ratio(share: &AgeShare) -> f64 {
    if share.female_percent > 0.0 {
        share.male_percent / share.female_percent
    } else {
        0.0
    }
}

/// Most male- and most female-skewed age group of every region at `year`.
/// Returned in region-code order; see [`rank_by_parity_deviation`].
pub fn find_gender_anomalies(regions: &[RegionRecord], year: i32) -> Vec<GenderAnomaly> {
    ordered_by_code(regions)
        .into_iter()
        .filter_map(|region| {
            let metrics = TimeSeries::new(region)
                .metrics_for(year)
                .map_err(|reason| {
                    tracing::debug!("Gender anomalies: skipping {}: {}", region.name(), reason)
                })
                .ok()?;

            let mut shares = metrics.age_shares.iter();
            let Some(first) = shares.next() else {
                tracing::debug!("Gender anomalies: skipping {}: no age groups", region.name());
                return None;
            };
            let mut most_male = (first, group_ratio(first));
            let mut most_female = most_male;

            // 嚴格比較，平手時保留先出現的年齡組
            for share in shares {
                let ratio = group_ratio(share);
                if ratio > most_male.1 {
                    most_male = (share, ratio);
                }
                if ratio < most_female.1 {
                    most_female = (share, ratio);
                }
            }

            Some(GenderAnomaly {
                code: region.code().to_string(),
                name: region.name().to_string(),
                overall_gender_ratio: metrics.gender_ratio,
                most_male_age: most_male.0.age_range.clone(),
                most_male_ratio: most_male.1,
                most_female_age: most_female.0.age_range.clone(),
                most_female_ratio: most_female.1,
            })
        })
        .collect()
}

/// Sorted by distance of the overall ratio from parity (100), largest first.
pub fn rank_by_parity_deviation(mut anomalies: Vec<GenderAnomaly>) -> Vec<GenderAnomaly> {
    super::sort_desc_by(&mut anomalies, GenderAnomaly::parity_deviation, |a| a.code.as_str());
    anomalies
}
