//! Metrics calculator: turns a raw [`YearSnapshot`] into [`DerivedMetrics`].
//!
//! Values are taken as given. Zero denominators are reported as
//! [`Unavailable`] instead of producing NaN or infinity.

use crate::domain::model::{AgeGroup, AgeShare, DerivedMetrics, Unavailable, YearSnapshot};

/// Males per 100 females.
pub fn gender_ratio(male: u64, female: u64) -> Result<f64, Unavailable> {
    if female == 0 {
        return Err(Unavailable::ZeroFemalePopulation);
    }
    Ok(male as f64 / female as f64 * 100.0)
}

/// Percent of the total population that falls into `group`.
pub fn age_group_share(group: &AgeGroup, total_population: u64) -> Result<f64, Unavailable> {
    if total_population == 0 {
        return Err(Unavailable::ZeroTotalPopulation);
    }
    Ok(group.total as f64 / total_population as f64 * 100.0)
}

/// Percent change from `from` to `to`.
pub fn percent_change(from: u64, to: u64) -> Result<f64, Unavailable> {
    if from == 0 {
        return Err(Unavailable::ZeroBasePopulation);
    }
    Ok((to as f64 - from as f64) / from as f64 * 100.0)
}

pub fn derive_metrics(snapshot: &YearSnapshot) -> Result<DerivedMetrics, Unavailable> {
    let gender_ratio = gender_ratio(snapshot.male_population, snapshot.female_population)?;

    let age_shares = snapshot
        .age_groups
        .iter()
        .map(|group| {
            Ok(AgeShare {
                age_range: group.age_range.clone(),
                percent: age_group_share(group, snapshot.total_population)?,
                male_percent: group.male_percent(),
                female_percent: group.female_percent(),
            })
        })
        .collect::<Result<Vec<_>, Unavailable>>()?;

    // 沒有年齡分組時也要擋下總人口為零的情況
    if snapshot.total_population == 0 {
        return Err(Unavailable::ZeroTotalPopulation);
    }

    Ok(DerivedMetrics {
        year: snapshot.year,
        total_population: snapshot.total_population,
        male_population: snapshot.male_population,
        female_population: snapshot.female_population,
        median_age: snapshot.median_age,
        gender_ratio,
        age_shares,
    })
}
