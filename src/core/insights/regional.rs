use super::mean;
use crate::core::summary::RegionSummary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a region's grouping label comes from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum GroupLabels {
    /// The `group` field of the region identity.
    #[default]
    Identity,
    /// Caller-assigned labels keyed by region code.
    Explicit { labels: BTreeMap<String, String> },
}

impl GroupLabels {
    pub fn label_for<'a>(&'a self, summary: &'a RegionSummary) -> Option<&'a str> {
        match self {
            Self::Identity => summary.group.as_deref(),
            Self::Explicit { labels } => labels.get(&summary.code).map(String::as_str),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalGroup {
    pub label: String,
    pub mean_growth_rate: f64,
    pub mean_latest_median_age: f64,
    pub mean_age_change: f64,
    pub member_count: usize,
    pub members: Vec<String>,
}

/// Per-group averages, ordered by label. Unlabelled regions are left out.
pub fn analyze_regional_patterns(
    summaries: &[RegionSummary],
    labels: &GroupLabels,
) -> Vec<RegionalGroup> {
    let mut groups: BTreeMap<&str, Vec<&RegionSummary>> = BTreeMap::new();
    for summary in summaries {
        match labels.label_for(summary) {
            Some(label) => groups.entry(label).or_default().push(summary),
            None => tracing::debug!("Regional patterns: {} has no group label", summary.name),
        }
    }

    groups
        .into_iter()
        .map(|(label, members)| {
            let average = |field: fn(&RegionSummary) -> f64| {
                mean(&members.iter().map(|s| field(s)).collect::<Vec<f64>>())
            };

            RegionalGroup {
                label: label.to_string(),
                mean_growth_rate: average(|s| s.growth_rate),
                mean_latest_median_age: average(|s| s.latest_median_age),
                mean_age_change: average(|s| s.age_change),
                member_count: members.len(),
                members: members.iter().map(|s| s.name.clone()).collect(),
            }
        })
        .collect()
}
