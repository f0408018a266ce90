//! Zip bundle of one report: `report.json` plus one CSV table per finder.

use crate::core::insights::extremes::ExtremeMetric;
use crate::core::report::InsightReport;
use crate::utils::error::{InsightError, Result};
use serde::Serialize;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const REPORT_JSON: &str = "report.json";

// 欄位名稱與各列型別的 camelCase 序列化順序一致，空表也照寫
const SUMMARY_HEADERS: &[&str] = &[
    "code",
    "name",
    "group",
    "basePopulation",
    "latestPopulation",
    "growthRate",
    "growthAbsolute",
    "baseMedianAge",
    "latestMedianAge",
    "ageChange",
    "baseGenderRatio",
    "latestGenderRatio",
    "genderRatioShift",
];
const EXTREME_HEADERS: &[&str] =
    &["metric", "maxCode", "maxName", "maxValue", "minCode", "minName", "minValue"];
const AGE_STRUCTURE_HEADERS: &[&str] = &[
    "code",
    "name",
    "youthBulgeRatio",
    "youngAdultShare",
    "middleAgeShare",
    "elderlyShare",
    "childrenShare",
    "medianAge",
];
const GENDER_HEADERS: &[&str] = &[
    "code",
    "name",
    "overallGenderRatio",
    "mostMaleAge",
    "mostMaleRatio",
    "mostFemaleAge",
    "mostFemaleRatio",
];
const GROWTH_PATTERN_HEADERS: &[&str] =
    &["code", "name", "earlyAverage", "lateAverage", "acceleration", "totalGrowth"];
const NEIGHBOR_HEADERS: &[&str] = &[
    "pair",
    "firstCode",
    "secondCode",
    "firstGrowth",
    "secondGrowth",
    "growthDifference",
    "firstMedianAge",
    "secondMedianAge",
    "ageDifference",
    "genderDifference",
];
const MILESTONE_HEADERS: &[&str] = &[
    "code",
    "name",
    "direction",
    "fromUnits",
    "toUnits",
    "unitSize",
    "basePopulation",
    "latestPopulation",
];
const REGIONAL_GROUP_HEADERS: &[&str] = &[
    "label",
    "memberCount",
    "meanGrowthRate",
    "meanLatestMedianAge",
    "meanAgeChange",
    "members",
];
const AGE_SHIFT_HEADERS: &[&str] = &[
    "code",
    "name",
    "baseYouthPercent",
    "latestYouthPercent",
    "baseWorkingPercent",
    "latestWorkingPercent",
    "baseElderlyPercent",
    "latestElderlyPercent",
    "youthChange",
    "elderlyChange",
];
const GROWTH_GAP_HEADERS: &[&str] = &["lower", "higher", "lowerRate", "higherRate", "difference"];
const STAGE_HEADERS: &[&str] = &[
    "code",
    "name",
    "stage",
    "label",
    "childrenShare",
    "elderlyShare",
    "childDependency",
    "oldAgeDependency",
    "totalDependency",
    "potentialSupport",
    "agingIndex",
];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtremeRow<'a> {
    metric: ExtremeMetric,
    max_code: &'a str,
    max_name: &'a str,
    max_value: f64,
    min_code: &'a str,
    min_name: &'a str,
    min_value: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GrowthPatternRow<'a> {
    code: &'a str,
    name: &'a str,
    early_average: f64,
    late_average: f64,
    acceleration: f64,
    total_growth: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegionalGroupRow<'a> {
    label: &'a str,
    member_count: usize,
    mean_growth_rate: f64,
    mean_latest_median_age: f64,
    mean_age_change: f64,
    members: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AgeShiftRow<'a> {
    code: &'a str,
    name: &'a str,
    base_youth_percent: f64,
    latest_youth_percent: f64,
    base_working_percent: f64,
    latest_working_percent: f64,
    base_elderly_percent: f64,
    latest_elderly_percent: f64,
    youth_change: f64,
    elderly_change: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StageRow<'a> {
    code: &'a str,
    name: &'a str,
    stage: u8,
    label: &'a str,
    children_share: f64,
    elderly_share: f64,
    child_dependency: Option<f64>,
    old_age_dependency: Option<f64>,
    total_dependency: Option<f64>,
    potential_support: Option<f64>,
    aging_index: Option<f64>,
}

/// Serializes rows into CSV bytes under `headers`.
/// The header line is written even when there are no rows.
pub fn csv_table<T: Serialize>(
    headers: &[&str],
    rows: impl IntoIterator<Item = T>,
) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| InsightError::IoError(e.into_error()))
}

/// CSV tables in archive order, file name first.
pub fn report_tables(report: &InsightReport) -> Result<Vec<(&'static str, Vec<u8>)>> {
    let extremes = report.extremes.iter().map(|e| ExtremeRow {
        metric: e.metric,
        max_code: &e.max.code,
        max_name: &e.max.name,
        max_value: e.max.value,
        min_code: &e.min.code,
        min_name: &e.min.name,
        min_value: e.min.value,
    });
    let growth = report.growth_patterns.iter().map(|p| GrowthPatternRow {
        code: &p.code,
        name: &p.name,
        early_average: p.early_average,
        late_average: p.late_average,
        acceleration: p.acceleration,
        total_growth: p.total_growth,
    });
    let regional = report.regional_groups.iter().map(|g| RegionalGroupRow {
        label: &g.label,
        member_count: g.member_count,
        mean_growth_rate: g.mean_growth_rate,
        mean_latest_median_age: g.mean_latest_median_age,
        mean_age_change: g.mean_age_change,
        members: g.members.join("; "),
    });
    let shifts = report.age_shifts.iter().map(|s| AgeShiftRow {
        code: &s.code,
        name: &s.name,
        base_youth_percent: s.base.youth_percent,
        latest_youth_percent: s.latest.youth_percent,
        base_working_percent: s.base.working_percent,
        latest_working_percent: s.latest.working_percent,
        base_elderly_percent: s.base.elderly_percent,
        latest_elderly_percent: s.latest.elderly_percent,
        youth_change: s.youth_change,
        elderly_change: s.elderly_change,
    });
    let stages = report.stages.iter().map(|s| StageRow {
        code: &s.code,
        name: &s.name,
        stage: s.stage_number,
        label: &s.label,
        children_share: s.children_share,
        elderly_share: s.elderly_share,
        child_dependency: s.dependency.child_dependency,
        old_age_dependency: s.dependency.old_age_dependency,
        total_dependency: s.dependency.total_dependency,
        potential_support: s.dependency.potential_support,
        aging_index: s.dependency.aging_index,
    });

    Ok(vec![
        ("summaries.csv", csv_table(SUMMARY_HEADERS, &report.summaries)?),
        ("extremes.csv", csv_table(EXTREME_HEADERS, extremes)?),
        ("age_structure.csv", csv_table(AGE_STRUCTURE_HEADERS, &report.age_structure)?),
        ("gender_anomalies.csv", csv_table(GENDER_HEADERS, &report.gender_anomalies)?),
        ("growth_patterns.csv", csv_table(GROWTH_PATTERN_HEADERS, growth)?),
        (
            "neighbor_contrasts.csv",
            csv_table(NEIGHBOR_HEADERS, &report.neighbor_contrasts)?,
        ),
        ("milestones.csv", csv_table(MILESTONE_HEADERS, &report.milestones)?),
        ("regional_groups.csv", csv_table(REGIONAL_GROUP_HEADERS, regional)?),
        ("age_shifts.csv", csv_table(AGE_SHIFT_HEADERS, shifts)?),
        ("growth_gaps.csv", csv_table(GROWTH_GAP_HEADERS, &report.growth_gaps)?),
        ("stages.csv", csv_table(STAGE_HEADERS, stages)?),
    ])
}

pub fn write_archive(report: &InsightReport) -> Result<Vec<u8>> {
    let tables = report_tables(report)?;
    tracing::debug!("Creating ZIP file with {} files", tables.len() + 1);

    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    zip.start_file::<_, ()>(REPORT_JSON, FileOptions::default())?;
    let json_data = serde_json::to_string_pretty(report)?;
    zip.write_all(json_data.as_bytes())?;

    for (name, data) in tables {
        zip.start_file::<_, ()>(name, FileOptions::default())?;
        zip.write_all(&data)?;
    }

    // 完成並取回底層 Vec<u8>
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
