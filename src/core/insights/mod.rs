//! Insight finders. Each one is a pure function of the region records and
//! its configuration; none reads another finder's output.

pub mod age_shift;
pub mod age_structure;
pub mod extremes;
pub mod gender;
pub mod growth;
pub mod growth_gaps;
pub mod milestones;
pub mod neighbors;
pub mod regional;
pub mod stage;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::domain::model::DerivedMetrics;
use serde::{Deserialize, Serialize};

/// Named set of age-range labels whose population shares are summed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeBand {
    pub name: String,
    pub ranges: Vec<String>,
}

impl AgeBand {
    pub fn new(name: &str, ranges: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            ranges: ranges.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// Sum of percent-of-total shares for this band; absent labels add 0.
    pub fn share(&self, metrics: &DerivedMetrics) -> f64 {
        self.ranges
            .iter()
            .filter_map(|range| metrics.share(range))
            .map(|share| share.percent)
            .sum()
    }
}

const ELDERLY_RANGES: &[&str] = &[
    "65-69", "70-74", "75-79", "80-84", "85+", "85-89", "90-94", "95-99", "100+",
];

/// Band partition used by the age-structure finders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeBands {
    pub young_adult: AgeBand,
    pub middle_age: AgeBand,
    pub children: AgeBand,
    pub youth: AgeBand,
    pub working_age: AgeBand,
    pub labour_force: AgeBand,
    pub elderly: AgeBand,
}

impl Default for AgeBands {
    fn default() -> Self {
        Self {
            young_adult: AgeBand::new("young_adult", &["20-24", "25-29", "30-34"]),
            middle_age: AgeBand::new("middle_age", &["35-39", "40-44", "45-49", "50-54"]),
            children: AgeBand::new("children", &["0-4", "5-9", "10-14"]),
            youth: AgeBand::new("youth", &["0-4", "5-9", "10-14", "15-19"]),
            working_age: AgeBand::new(
                "working_age",
                &[
                    "20-24", "25-29", "30-34", "35-39", "40-44", "45-49", "50-54", "55-59",
                    "60-64",
                ],
            ),
            labour_force: AgeBand::new(
                "labour_force",
                &[
                    "15-19", "20-24", "25-29", "30-34", "35-39", "40-44", "45-49", "50-54",
                    "55-59", "60-64",
                ],
            ),
            elderly: AgeBand::new("elderly", ELDERLY_RANGES),
        }
    }
}

impl AgeBands {
    pub fn all(&self) -> [&AgeBand; 7] {
        [
            &self.young_adult,
            &self.middle_age,
            &self.children,
            &self.youth,
            &self.working_age,
            &self.labour_force,
            &self.elderly,
        ]
    }
}

/// Descending by `key`, ties broken by ascending region code.
pub(crate) fn sort_desc_by<T>(items: &mut [T], key: impl Fn(&T) -> f64, code: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| {
        key(b)
            .total_cmp(&key(a))
            .then_with(|| code(a).cmp(code(b)))
    });
}

/// Ascending by `key`, ties broken by ascending region code.
pub(crate) fn sort_asc_by<T>(items: &mut [T], key: impl Fn(&T) -> f64, code: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| {
        key(a)
            .total_cmp(&key(b))
            .then_with(|| code(a).cmp(code(b)))
    });
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
