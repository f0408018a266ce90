use super::{sort_desc_by, AgeBands};
use crate::core::timeseries::{ordered_by_code, TimeSeries};
use crate::domain::model::{DerivedMetrics, RegionRecord};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeComposition {
    pub youth_percent: f64,
    pub working_percent: f64,
    pub elderly_percent: f64,
}

impl AgeComposition {
    fn of(metrics: &DerivedMetrics, bands: &AgeBands) -> Self {
        Self {
            youth_percent: bands.youth.share(metrics),
            working_percent: bands.working_age.share(metrics),
            elderly_percent: bands.elderly.share(metrics),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeStructureShift {
    pub code: String,
    pub name: String,
    pub base: AgeComposition,
    pub latest: AgeComposition,
    /// Percentage-point change of the youth share.
    pub youth_change: f64,
    pub elderly_change: f64,
}

/// Youth, working-age and elderly shares at both ends of the window.
pub fn find_age_structure_shifts(
    regions: &[RegionRecord],
    bands: &AgeBands,
    base_year: i32,
    latest_year: i32,
) -> Vec<AgeStructureShift> {
    ordered_by_code(regions)
        .into_iter()
        .filter_map(|region| {
            let (base, latest) = TimeSeries::new(region).endpoints(base_year, latest_year)?;
            let base = AgeComposition::of(&base, bands);
            let latest = AgeComposition::of(&latest, bands);

            Some(AgeStructureShift {
                code: region.code().to_string(),
                name: region.name().to_string(),
                base,
                latest,
                youth_change: latest.youth_percent - base.youth_percent,
                elderly_change: latest.elderly_percent - base.elderly_percent,
            })
        })
        .collect()
}

pub fn rank_youth_gainers(mut shifts: Vec<AgeStructureShift>) -> Vec<AgeStructureShift> {
    sort_desc_by(&mut shifts, |s| s.youth_change, |s| s.code.as_str());
    shifts
}

pub fn rank_elderly_gainers(mut shifts: Vec<AgeStructureShift>) -> Vec<AgeStructureShift> {
    sort_desc_by(&mut shifts, |s| s.elderly_change, |s| s.code.as_str());
    shifts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::insights::fixtures::{region, snapshot};

    fn aging_region(code: &str, base: [u64; 3], latest: [u64; 3]) -> RegionRecord {
        let rows = |[young, working, old]: [u64; 3]| {
            [("10-14", young, young), ("30-34", working, working), ("70-74", old, old)]
        };
        region(
            code,
            code,
            vec![snapshot(2000, &rows(base)), snapshot(2024, &rows(latest))],
        )
    }

    #[test]
    fn test_shift_in_percentage_points() {
        let regions = vec![aging_region("ME", [30, 50, 20], [20, 50, 30])];
        let shifts = find_age_structure_shifts(&regions, &AgeBands::default(), 2000, 2024);

        assert_eq!(shifts.len(), 1);
        assert!((shifts[0].base.youth_percent - 30.0).abs() < 1e-9);
        assert!((shifts[0].latest.working_percent - 50.0).abs() < 1e-9);
        assert!((shifts[0].youth_change + 10.0).abs() < 1e-9);
        assert!((shifts[0].elderly_change - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_rankings() {
        let regions = vec![
            aging_region("ME", [30, 50, 20], [20, 50, 30]),
            aging_region("UT", [30, 60, 10], [35, 55, 10]),
            aging_region("FL", [25, 50, 25], [22, 45, 33]),
        ];
        let shifts = find_age_structure_shifts(&regions, &AgeBands::default(), 2000, 2024);

        let youth: Vec<String> = rank_youth_gainers(shifts.clone())
            .into_iter()
            .map(|s| s.code)
            .collect();
        assert_eq!(youth, vec!["UT", "FL", "ME"]);

        let elderly: Vec<String> = rank_elderly_gainers(shifts)
            .into_iter()
            .map(|s| s.code)
            .collect();
        assert_eq!(elderly, vec!["ME", "FL", "UT"]);
    }

    #[test]
    fn test_missing_base_year_skips_region() {
        let regions = vec![region("AA", "AA", vec![snapshot(2024, &[("10-14", 1, 1)])])];
        assert!(find_age_structure_shifts(&regions, &AgeBands::default(), 2000, 2024).is_empty());
    }
}
