use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identity of a tracked region (country, state or territory).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionIdentity {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl RegionIdentity {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            group: None,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// 以代碼或顯示名稱比對
    pub fn matches(&self, key: &str) -> bool {
        self.code == key || self.name == key
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeGroup {
    pub age_range: String,
    pub total: u64,
    pub male: u64,
    pub female: u64,
}

impl AgeGroup {
    pub fn new(age_range: impl Into<String>, male: u64, female: u64) -> Self {
        Self {
            age_range: age_range.into(),
            total: male + female,
            male,
            female,
        }
    }

    /// Share of this group's total that is male, 0 for an empty group.
    pub fn male_percent(&self) -> f64 {
        percent_of(self.male, self.total)
    }

    pub fn female_percent(&self) -> f64 {
        percent_of(self.female, self.total)
    }
}

fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Recorded population-by-age-and-sex state of a region for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSnapshot {
    pub year: i32,
    pub total_population: u64,
    pub male_population: u64,
    pub female_population: u64,
    pub median_age: f64,
    #[serde(default)]
    pub age_groups: Vec<AgeGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub identity: RegionIdentity,
    pub years: BTreeMap<i32, YearSnapshot>,
}

impl RegionRecord {
    pub fn new(identity: RegionIdentity) -> Self {
        Self {
            identity,
            years: BTreeMap::new(),
        }
    }

    pub fn with_snapshot(mut self, snapshot: YearSnapshot) -> Self {
        self.years.insert(snapshot.year, snapshot);
        self
    }

    pub fn code(&self) -> &str {
        &self.identity.code
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn snapshot(&self, year: i32) -> Option<&YearSnapshot> {
        self.years.get(&year)
    }
}

/// Why a metric could not be computed. This is an expected outcome, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Unavailable {
    MissingYear(i32),
    ZeroFemalePopulation,
    ZeroTotalPopulation,
    ZeroBasePopulation,
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingYear(year) => write!(f, "no snapshot for {}", year),
            Self::ZeroFemalePopulation => write!(f, "female population is zero"),
            Self::ZeroTotalPopulation => write!(f, "total population is zero"),
            Self::ZeroBasePopulation => write!(f, "base population is zero"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeShare {
    pub age_range: String,
    /// Percent of the region's total population.
    pub percent: f64,
    pub male_percent: f64,
    pub female_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub year: i32,
    pub total_population: u64,
    pub male_population: u64,
    pub female_population: u64,
    pub median_age: f64,
    pub gender_ratio: f64,
    /// Kept in the snapshot's stored age-group order.
    pub age_shares: Vec<AgeShare>,
}

impl DerivedMetrics {
    pub fn share(&self, age_range: &str) -> Option<&AgeShare> {
        self.age_shares.iter().find(|s| s.age_range == age_range)
    }
}
