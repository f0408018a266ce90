use super::{mean, sort_asc_by, sort_desc_by};
use crate::core::metrics::percent_change;
use crate::core::timeseries::{ordered_by_code, TimeSeries};
use crate::domain::model::{RegionRecord, Unavailable};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPattern {
    pub code: String,
    pub name: String,
    pub sample_years: Vec<i32>,
    pub populations: Vec<u64>,
    /// Percent growth for each consecutive pair of sample years.
    pub period_rates: Vec<f64>,
    pub early_average: f64,
    pub late_average: f64,
    pub acceleration: f64,
    pub total_growth: f64,
}

/// Growth pattern of one region, or why it cannot be analysed.
pub fn analyze_region(
    region: &RegionRecord,
    sample_years: &[i32],
) -> Result<GrowthPattern, Unavailable> {
    let populations: Vec<u64> = TimeSeries::new(region)
        .metrics_series(sample_years)?
        .into_iter()
        .map(|m| m.total_population)
        .collect();

    let period_rates = populations
        .windows(2)
        .map(|pair| percent_change(pair[0], pair[1]))
        .collect::<Result<Vec<f64>, Unavailable>>()?;

    let (early_average, late_average) = if period_rates.len() >= 2 {
        (
            mean(&period_rates[..2]),
            mean(&period_rates[period_rates.len() - 2..]),
        )
    } else {
        (0.0, 0.0)
    };

    let total_growth = match (populations.first(), populations.last()) {
        (Some(&first), Some(&last)) => percent_change(first, last)?,
        _ => 0.0,
    };

    Ok(GrowthPattern {
        code: region.code().to_string(),
        name: region.name().to_string(),
        sample_years: sample_years.to_vec(),
        populations,
        period_rates,
        early_average,
        late_average,
        acceleration: late_average - early_average,
        total_growth,
    })
}

/// Growth patterns for every region that has all `sample_years`.
/// A region missing any one sample year is left out entirely.
pub fn compare_growth_patterns(
    regions: &[RegionRecord],
    sample_years: &[i32],
) -> Vec<GrowthPattern> {
    ordered_by_code(regions)
        .into_iter()
        .filter_map(|region| match analyze_region(region, sample_years) {
            Ok(pattern) => Some(pattern),
            Err(reason) => {
                tracing::debug!("Growth patterns: skipping {}: {}", region.name(), reason);
                None
            }
        })
        .collect()
}

pub fn rank_by_acceleration(mut patterns: Vec<GrowthPattern>) -> Vec<GrowthPattern> {
    sort_desc_by(&mut patterns, |p| p.acceleration, |p| p.code.as_str());
    patterns
}

pub fn rank_by_deceleration(mut patterns: Vec<GrowthPattern>) -> Vec<GrowthPattern> {
    sort_asc_by(&mut patterns, |p| p.acceleration, |p| p.code.as_str());
    patterns
}

pub fn rank_by_total_growth(mut patterns: Vec<GrowthPattern>) -> Vec<GrowthPattern> {
    sort_desc_by(&mut patterns, |p| p.total_growth, |p| p.code.as_str());
    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::insights::fixtures::{population_snapshot, region};

    const YEARS: [i32; 6] = [2000, 2005, 2010, 2015, 2020, 2024];

    fn series(code: &str, pops: &[u64]) -> RegionRecord {
        let snapshots = YEARS
            .iter()
            .zip(pops)
            .map(|(&year, &pop)| population_snapshot(year, pop))
            .collect();
        region(code, code, snapshots)
    }

    #[test]
    fn test_period_rates_and_acceleration() {
        let regions = vec![series("AA", &[1000, 1100, 1210, 1210, 1331, 1464])];
        let result = compare_growth_patterns(&regions, &YEARS);

        assert_eq!(result.len(), 1);
        let pattern = &result[0];
        assert_eq!(pattern.period_rates.len(), 5);
        assert!((pattern.period_rates[0] - 10.0).abs() < 1e-9);
        assert!((pattern.period_rates[1] - 10.0).abs() < 1e-9);
        assert!(pattern.period_rates[2].abs() < 1e-9);
        assert!((pattern.early_average - 10.0).abs() < 1e-9);

        let late = (10.0 + (1464.0 - 1331.0) / 1331.0 * 100.0) / 2.0;
        assert!((pattern.late_average - late).abs() < 1e-9);
        assert!((pattern.acceleration - (late - 10.0)).abs() < 1e-9);
        assert!((pattern.total_growth - 46.4).abs() < 1e-9);
    }

    #[test]
    fn test_region_missing_middle_sample_year_is_excluded() {
        let complete = series("AA", &[1000, 1100, 1200, 1300, 1400, 1500]);
        let mut gappy = series("BB", &[1000, 1100, 1200, 1300, 1400, 1500]);
        gappy.years.remove(&2010);

        let result = compare_growth_patterns(&[complete, gappy], &YEARS);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].code, "AA");
    }

    #[test]
    fn test_zero_population_sample_excludes_region() {
        let regions = vec![series("AA", &[1000, 0, 1200, 1300, 1400, 1500])];
        assert!(compare_growth_patterns(&regions, &YEARS).is_empty());
    }

    #[test]
    fn test_single_period_has_zero_averages() {
        let regions = vec![series("AA", &[1000, 1100])];
        let result = compare_growth_patterns(&regions, &[2000, 2005]);

        assert_eq!(result[0].period_rates.len(), 1);
        assert_eq!(result[0].early_average, 0.0);
        assert_eq!(result[0].late_average, 0.0);
        assert_eq!(result[0].acceleration, 0.0);
        assert!((result[0].total_growth - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_rankings() {
        let regions = vec![
            // 先快後慢
            series("SL", &[1000, 1200, 1440, 1500, 1510, 1520]),
            // 先慢後快
            series("UP", &[1000, 1010, 1020, 1100, 1300, 1600]),
            series("FL", &[1000, 1000, 1000, 1000, 1000, 1000]),
        ];
        let patterns = compare_growth_patterns(&regions, &YEARS);

        let accel: Vec<String> = rank_by_acceleration(patterns.clone())
            .into_iter()
            .map(|p| p.code)
            .collect();
        assert_eq!(accel, vec!["UP", "FL", "SL"]);

        let decel: Vec<String> = rank_by_deceleration(patterns.clone())
            .into_iter()
            .map(|p| p.code)
            .collect();
        assert_eq!(decel, vec!["SL", "FL", "UP"]);

        let total: Vec<String> = rank_by_total_growth(patterns)
            .into_iter()
            .map(|p| p.code)
            .collect();
        assert_eq!(total, vec!["UP", "SL", "FL"]);
    }
}
