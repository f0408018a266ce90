use crate::adapters::cleaning::merge_elderly_groups;
use crate::domain::model::{AgeGroup, RegionIdentity, RegionRecord, YearSnapshot};
use crate::domain::ports::RegionRepository;
use crate::utils::error::{InsightError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk region document. Accepts both the nested `identity` layout and
/// the flat upstream layout (`stateCode`/`countryCode`, `stateName`/...).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegionDocument {
    identity: Option<RegionIdentity>,
    #[serde(alias = "stateCode", alias = "countryCode")]
    code: Option<String>,
    #[serde(alias = "stateName", alias = "countryName")]
    name: Option<String>,
    #[serde(alias = "group")]
    region: Option<String>,
    years: BTreeMap<String, SnapshotDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotDocument {
    total_population: Option<u64>,
    male_population: u64,
    female_population: u64,
    median_age: f64,
    #[serde(default)]
    age_groups: Vec<AgeGroupDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AgeGroupDocument {
    #[serde(alias = "range")]
    age_range: Option<String>,
    age_group: Option<AgeGroupLabel>,
    male: u64,
    female: u64,
    total: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct AgeGroupLabel {
    range: String,
}

fn malformed(source_name: &str, message: impl Into<String>) -> InsightError {
    InsightError::MalformedRegionError {
        source_name: source_name.to_string(),
        message: message.into(),
    }
}

impl RegionDocument {
    fn identity(&mut self, source_name: &str) -> Result<RegionIdentity> {
        if let Some(identity) = self.identity.take() {
            return Ok(identity);
        }

        let code = self
            .code
            .take()
            .ok_or_else(|| malformed(source_name, "missing region code"))?;
        let name = self.name.take().unwrap_or_else(|| code.clone());
        let identity = RegionIdentity::new(code, name);

        Ok(match self.region.take() {
            Some(group) => identity.with_group(group),
            None => identity,
        })
    }
}

impl AgeGroupDocument {
    fn into_age_group(self, source_name: &str) -> Result<AgeGroup> {
        let age_range = self
            .age_range
            .or_else(|| self.age_group.map(|g| g.range))
            .ok_or_else(|| malformed(source_name, "age group without a range label"))?;

        Ok(AgeGroup {
            age_range,
            total: self.total.unwrap_or(self.male + self.female),
            male: self.male,
            female: self.female,
        })
    }
}

/// Parses one region document. `source_name` only labels errors and logs.
pub fn parse_region(source_name: &str, bytes: &[u8]) -> Result<RegionRecord> {
    let mut document: RegionDocument =
        serde_json::from_slice(bytes).map_err(|e| malformed(source_name, e.to_string()))?;

    let identity = document.identity(source_name)?;
    let mut record = RegionRecord::new(identity);

    for (key, snapshot) in document.years {
        let year: i32 = key
            .trim()
            .parse()
            .map_err(|_| malformed(source_name, format!("year key '{}' is not a number", key)))?;

        let mut age_groups = snapshot
            .age_groups
            .into_iter()
            .map(|g| g.into_age_group(source_name))
            .collect::<Result<Vec<_>>>()?;

        if merge_elderly_groups(&mut age_groups) {
            tracing::debug!("{}: merged duplicated elderly groups for {}", source_name, year);
        }

        record = record.with_snapshot(YearSnapshot {
            year,
            total_population: snapshot
                .total_population
                .unwrap_or(snapshot.male_population + snapshot.female_population),
            male_population: snapshot.male_population,
            female_population: snapshot.female_population,
            median_age: snapshot.median_age,
            age_groups,
        });
    }

    Ok(record)
}

/// Reads every `*.json` file of a directory as one region.
#[derive(Debug, Clone)]
pub struct JsonDirectoryRepository {
    data_dir: PathBuf,
}

impl JsonDirectoryRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    async fn json_files(&self) -> Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(&self.data_dir).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }

        // 固定讀取順序
        files.sort();
        Ok(files)
    }
}

impl RegionRepository for JsonDirectoryRepository {
    async fn list_regions(&self) -> Result<Vec<RegionRecord>> {
        let files = self.json_files().await?;
        tracing::debug!("Found {} JSON files in {}", files.len(), self.data_dir.display());

        let mut regions = Vec::with_capacity(files.len());
        for path in files {
            let source_name = path.display().to_string();
            let bytes = tokio::fs::read(&path).await?;

            match parse_region(&source_name, &bytes) {
                Ok(region) => regions.push(region),
                Err(e) => {
                    tracing::warn!("⚠️ Skipping region file: {}", e);
                }
            }
        }

        if regions.is_empty() {
            tracing::warn!("No regions loaded from {}", self.data_dir.display());
        }
        Ok(regions)
    }
}
