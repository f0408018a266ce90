use crate::utils::error::{InsightError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(InsightError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(InsightError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(InsightError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(InsightError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(InsightError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 年份列表必須嚴格遞增且至少兩筆
pub fn validate_sample_years(field_name: &str, years: &[i32]) -> Result<()> {
    if years.len() < 2 {
        return Err(InsightError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format!("{:?}", years),
            reason: "At least two sample years are required".to_string(),
        });
    }

    if let Some(pair) = years.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(InsightError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format!("{:?}", years),
            reason: format!("Years must be strictly increasing ({} >= {})", pair[0], pair[1]),
        });
    }

    Ok(())
}

pub fn validate_year_window(field_name: &str, base_year: i32, latest_year: i32) -> Result<()> {
    if base_year >= latest_year {
        return Err(InsightError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format!("{}..{}", base_year, latest_year),
            reason: "Base year must be earlier than latest year".to_string(),
        });
    }
    Ok(())
}

/// 同一個年齡標籤不可出現兩次
pub fn validate_unique_labels(field_name: &str, labels: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for label in labels {
        validate_non_empty_string(field_name, label)?;
        if !seen.insert(label.as_str()) {
            return Err(InsightError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: label.clone(),
                reason: "Duplicate age range label".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("milestones.unit_size", 1_000_000, 1).is_ok());
        assert!(validate_positive_number("milestones.unit_size", 0, 1).is_err());
    }

    #[test]
    fn test_validate_sample_years() {
        assert!(validate_sample_years("growth.sample_years", &[2000, 2005, 2010]).is_ok());
        assert!(validate_sample_years("growth.sample_years", &[2000]).is_err());
        assert!(validate_sample_years("growth.sample_years", &[2000, 2000, 2010]).is_err());
        assert!(validate_sample_years("growth.sample_years", &[2010, 2005]).is_err());
    }

    #[test]
    fn test_validate_year_window() {
        assert!(validate_year_window("analysis", 2000, 2024).is_ok());
        assert!(validate_year_window("analysis", 2024, 2024).is_err());
    }

    #[test]
    fn test_validate_unique_labels() {
        let labels = vec!["20-24".to_string(), "25-29".to_string()];
        assert!(validate_unique_labels("bands.young_adult", &labels).is_ok());

        let duplicated = vec!["20-24".to_string(), "20-24".to_string()];
        assert!(validate_unique_labels("bands.young_adult", &duplicated).is_err());

        let blank = vec![" ".to_string()];
        assert!(validate_unique_labels("bands.young_adult", &blank).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("contrasts.gap_fraction", 0.1, 0.0, 1.0).is_ok());
        assert!(validate_range("contrasts.gap_fraction", 1.5, 0.0, 1.0).is_err());
    }
}
