//! Demographic transition stage, estimated from age structure alone.
//!
//! Birth and death rates are not part of the input, so both are
//! approximated from the children and elderly shares.

use super::AgeBands;
use crate::core::timeseries::{ordered_by_code, TimeSeries};
use crate::domain::model::{DerivedMetrics, RegionRecord};
use serde::Serialize;

const BIRTH_PROXY_FACTOR: f64 = 3.33;
const DEATH_PROXY_FACTOR: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TransitionStage {
    PreTransition,
    EarlyTransition,
    LateTransition,
    PostTransition,
    PostTransitionDecline,
}

impl TransitionStage {
    pub fn number(&self) -> u8 {
        match self {
            Self::PreTransition => 1,
            Self::EarlyTransition => 2,
            Self::LateTransition => 3,
            Self::PostTransition => 4,
            Self::PostTransitionDecline => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PreTransition => "Stage 1: Pre-Transition",
            Self::EarlyTransition => "Stage 2: Early Transition",
            Self::LateTransition => "Stage 3: Late Transition",
            Self::PostTransition => "Stage 4: Post-Transition",
            Self::PostTransitionDecline => "Stage 5: Post-Transition Decline",
        }
    }

    /// Stage from the children (0-14) and elderly (65+) shares, in percent.
    pub fn classify(children_share: f64, elderly_share: f64) -> Self {
        let birth = children_share * BIRTH_PROXY_FACTOR;
        let death = elderly_share * DEATH_PROXY_FACTOR;

        if birth > 40.0 && death > 25.0 && children_share > 40.0 {
            Self::PreTransition
        } else if birth > 30.0 && death < 20.0 && children_share > 35.0 {
            Self::EarlyTransition
        } else if (15.0..=30.0).contains(&birth)
            && death < 15.0
            && (25.0..=35.0).contains(&children_share)
        {
            Self::LateTransition
        } else if birth < 10.0 && elderly_share > 20.0 {
            Self::PostTransitionDecline
        } else {
            Self::PostTransition
        }
    }
}

/// Dependants per 100 working-age people, and related ratios.
/// A field is `None` when its denominator share is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyIndicators {
    pub child_dependency: Option<f64>,
    pub old_age_dependency: Option<f64>,
    pub total_dependency: Option<f64>,
    pub potential_support: Option<f64>,
    pub aging_index: Option<f64>,
}

fn ratio(numerator: f64, denominator: f64, scale: f64) -> Option<f64> {
    (denominator > 0.0).then(|| numerator / denominator * scale)
}

impl DependencyIndicators {
    pub fn from_shares(children: f64, working: f64, elderly: f64) -> Self {
        Self {
            child_dependency: ratio(children, working, 100.0),
            old_age_dependency: ratio(elderly, working, 100.0),
            total_dependency: ratio(children + elderly, working, 100.0),
            potential_support: ratio(working, elderly, 1.0),
            aging_index: ratio(elderly, children, 100.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageAssessment {
    pub code: String,
    pub name: String,
    pub stage: TransitionStage,
    pub stage_number: u8,
    pub label: String,
    pub children_share: f64,
    pub elderly_share: f64,
    pub dependency: DependencyIndicators,
}

fn assess(region: &RegionRecord, metrics: &DerivedMetrics, bands: &AgeBands) -> StageAssessment {
    let children = bands.children.share(metrics);
    let elderly = bands.elderly.share(metrics);
    let working = bands.labour_force.share(metrics);
    let stage = TransitionStage::classify(children, elderly);

    StageAssessment {
        code: region.code().to_string(),
        name: region.name().to_string(),
        stage,
        stage_number: stage.number(),
        label: stage.label().to_string(),
        children_share: children,
        elderly_share: elderly,
        dependency: DependencyIndicators::from_shares(children, working, elderly),
    }
}

pub fn classify_stages(
    regions: &[RegionRecord],
    bands: &AgeBands,
    year: i32,
) -> Vec<StageAssessment> {
    ordered_by_code(regions)
        .into_iter()
        .filter_map(|region| {
            let metrics = TimeSeries::new(region)
                .metrics_for(year)
                .map_err(|reason| {
                    tracing::debug!("Stages: skipping {}: {}", region.name(), reason)
                })
                .ok()?;
            Some(assess(region, &metrics, bands))
        })
        .collect()
}
