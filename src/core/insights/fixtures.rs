use crate::domain::model::{AgeGroup, RegionIdentity, RegionRecord, YearSnapshot};

/// Snapshot built from `(age_range, male, female)` rows; totals are summed.
pub(crate) fn snapshot(year: i32, groups: &[(&str, u64, u64)]) -> YearSnapshot {
    let age_groups: Vec<AgeGroup> = groups
        .iter()
        .map(|&(range, male, female)| AgeGroup::new(range, male, female))
        .collect();
    let male_population: u64 = age_groups.iter().map(|g| g.male).sum();
    let female_population: u64 = age_groups.iter().map(|g| g.female).sum();

    YearSnapshot {
        year,
        total_population: male_population + female_population,
        male_population,
        female_population,
        median_age: 35.0,
        age_groups,
    }
}

/// Snapshot with a single age group and an even sex split.
pub(crate) fn population_snapshot(year: i32, total: u64) -> YearSnapshot {
    let male = total / 2;
    snapshot(year, &[("0-100", male, total - male)])
}

pub(crate) fn with_median_age(mut snapshot: YearSnapshot, median_age: f64) -> YearSnapshot {
    snapshot.median_age = median_age;
    snapshot
}

pub(crate) fn region(code: &str, name: &str, snapshots: Vec<YearSnapshot>) -> RegionRecord {
    snapshots
        .into_iter()
        .fold(RegionRecord::new(RegionIdentity::new(code, name)), |record, snap| {
            record.with_snapshot(snap)
        })
}

pub(crate) fn grouped_region(
    code: &str,
    name: &str,
    group: &str,
    snapshots: Vec<YearSnapshot>,
) -> RegionRecord {
    let mut record = region(code, name, snapshots);
    record.identity.group = Some(group.to_string());
    record
}
