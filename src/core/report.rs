use crate::core::insights::age_shift::{self, AgeStructureShift};
use crate::core::insights::age_structure::{self, AgeStructureProfile};
use crate::core::insights::extremes::{self, MetricExtreme};
use crate::core::insights::gender::{self, GenderAnomaly};
use crate::core::insights::growth::{self, GrowthPattern};
use crate::core::insights::growth_gaps::{self, GrowthGap};
use crate::core::insights::milestones::{self, MilestoneEvent};
use crate::core::insights::neighbors::{self, NeighborContrast, NeighborPair};
use crate::core::insights::regional::{self, GroupLabels, RegionalGroup};
use crate::core::insights::stage::{self, StageAssessment};
use crate::core::insights::AgeBands;
use crate::core::summary::{self, RegionSummary};
use crate::domain::model::RegionRecord;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the finders need besides the region records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub base_year: i32,
    pub latest_year: i32,
    pub sample_years: Vec<i32>,
    pub bands: AgeBands,
    pub neighbors: Vec<NeighborPair>,
    pub milestone_unit: u64,
    pub grouping: GroupLabels,
    pub gap_fraction: f64,
    pub gap_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_year: 2000,
            latest_year: 2024,
            sample_years: vec![2000, 2005, 2010, 2015, 2020, 2024],
            bands: AgeBands::default(),
            neighbors: Vec::new(),
            milestone_unit: 1_000_000,
            grouping: GroupLabels::default(),
            gap_fraction: 0.1,
            gap_limit: 10,
        }
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_year_window("analysis.latest_year", self.base_year, self.latest_year)?;
        validation::validate_sample_years("analysis.sample_years", &self.sample_years)?;
        validation::validate_positive_number("analysis.milestone_unit", self.milestone_unit, 1)?;
        validation::validate_range("analysis.gap_fraction", self.gap_fraction, 0.0, 1.0)?;

        for band in self.bands.all() {
            validation::validate_unique_labels(&format!("bands.{}", band.name), &band.ranges)?;
        }
        for (index, pair) in self.neighbors.iter().enumerate() {
            let field = format!("neighbors[{}]", index);
            validation::validate_non_empty_string(&field, &pair.first)?;
            validation::validate_non_empty_string(&field, &pair.second)?;
        }

        Ok(())
    }
}

/// One run's worth of insights. Written once by the report sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    pub generated_at: DateTime<Utc>,
    pub base_year: i32,
    pub latest_year: i32,
    pub region_count: usize,
    pub summaries: Vec<RegionSummary>,
    pub extremes: Vec<MetricExtreme>,
    pub age_structure: Vec<AgeStructureProfile>,
    pub gender_anomalies: Vec<GenderAnomaly>,
    pub growth_patterns: Vec<GrowthPattern>,
    pub neighbor_contrasts: Vec<NeighborContrast>,
    pub milestones: Vec<MilestoneEvent>,
    pub regional_groups: Vec<RegionalGroup>,
    pub age_shifts: Vec<AgeStructureShift>,
    pub growth_gaps: Vec<GrowthGap>,
    pub stages: Vec<StageAssessment>,
}

/// Runs every finder over `regions`.
///
/// Gender anomalies are ranked by distance from parity, growth patterns by
/// acceleration and age shifts by elderly gain; the rest keep each finder's
/// own order.
pub fn build_report(regions: &[RegionRecord], config: &AnalysisConfig) -> InsightReport {
    let base = config.base_year;
    let latest = config.latest_year;

    let summaries = summary::summarize_regions(regions, base, latest);
    tracing::debug!("{} of {} regions have both endpoints", summaries.len(), regions.len());

    let extremes = extremes::find_extremes(&summaries);
    let regional_groups = regional::analyze_regional_patterns(&summaries, &config.grouping);
    let growth_gaps =
        growth_gaps::find_growth_gaps(&summaries, config.gap_fraction, config.gap_limit);

    InsightReport {
        generated_at: Utc::now(),
        base_year: base,
        latest_year: latest,
        region_count: regions.len(),
        extremes,
        age_structure: age_structure::find_extreme_age_distributions(
            regions,
            &config.bands,
            latest,
        ),
        gender_anomalies: gender::rank_by_parity_deviation(gender::find_gender_anomalies(
            regions, latest,
        )),
        growth_patterns: growth::rank_by_acceleration(growth::compare_growth_patterns(
            regions,
            &config.sample_years,
        )),
        neighbor_contrasts: neighbors::find_neighbor_contrasts(
            regions,
            &config.neighbors,
            base,
            latest,
        ),
        milestones: milestones::find_population_milestones(
            regions,
            config.milestone_unit,
            base,
            latest,
        ),
        regional_groups,
        age_shifts: age_shift::rank_elderly_gainers(age_shift::find_age_structure_shifts(
            regions,
            &config.bands,
            base,
            latest,
        )),
        growth_gaps,
        stages: stage::classify_stages(regions, &config.bands, latest),
        summaries,
    }
}
