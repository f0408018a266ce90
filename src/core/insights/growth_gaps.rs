use super::sort_asc_by;
use crate::core::summary::RegionSummary;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthGap {
    pub lower: String,
    pub higher: String,
    pub lower_rate: f64,
    pub higher_rate: f64,
    pub difference: f64,
}

/// Adjacent regions in growth-rate order whose rates differ by more than
/// `gap_fraction` of the whole spread. At most `limit` gaps, slowest first.
pub fn find_growth_gaps(
    summaries: &[RegionSummary],
    gap_fraction: f64,
    limit: usize,
) -> Vec<GrowthGap> {
    let mut by_growth: Vec<&RegionSummary> = summaries.iter().collect();
    sort_asc_by(&mut by_growth, |s| s.growth_rate, |s| s.code.as_str());

    let (Some(slowest), Some(fastest)) = (by_growth.first(), by_growth.last()) else {
        return Vec::new();
    };
    let threshold = (fastest.growth_rate - slowest.growth_rate) * gap_fraction;

    by_growth
        .windows(2)
        .filter_map(|pair| {
            let difference = pair[1].growth_rate - pair[0].growth_rate;
            (difference > threshold).then(|| GrowthGap {
                lower: pair[0].name.clone(),
                higher: pair[1].name.clone(),
                lower_rate: pair[0].growth_rate,
                higher_rate: pair[1].growth_rate,
                difference,
            })
        })
        .take(limit)
        .collect()
}
