use crate::core::summary::RegionSummary;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtremeMetric {
    GrowthRate,
    AbsoluteGrowth,
    MedianAge,
    AgeChange,
    GenderRatio,
    GenderRatioShift,
}

impl ExtremeMetric {
    pub const ALL: [ExtremeMetric; 6] = [
        Self::GrowthRate,
        Self::AbsoluteGrowth,
        Self::MedianAge,
        Self::AgeChange,
        Self::GenderRatio,
        Self::GenderRatioShift,
    ];

    pub fn value(&self, summary: &RegionSummary) -> f64 {
        match self {
            Self::GrowthRate => summary.growth_rate,
            Self::AbsoluteGrowth => summary.growth_absolute as f64,
            Self::MedianAge => summary.latest_median_age,
            Self::AgeChange => summary.age_change,
            Self::GenderRatio => summary.latest_gender_ratio,
            Self::GenderRatioShift => summary.gender_ratio_shift.abs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtremeHolder {
    pub code: String,
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricExtreme {
    pub metric: ExtremeMetric,
    pub max: ExtremeHolder,
    pub min: ExtremeHolder,
}

impl MetricExtreme {
    fn holder(summary: &RegionSummary, value: f64) -> ExtremeHolder {
        ExtremeHolder {
            code: summary.code.clone(),
            name: summary.name.clone(),
            value,
        }
    }
}

/// Max and min holder of every tracked metric.
///
/// Summaries are scanned in region-code order and a later region must beat
/// the current holder strictly, so the lowest code wins a tie. Returns an
/// empty list when there are no summaries.
pub fn find_extremes(summaries: &[RegionSummary]) -> Vec<MetricExtreme> {
    let mut ordered: Vec<&RegionSummary> = summaries.iter().collect();
    ordered.sort_by(|a, b| a.code.cmp(&b.code));

    let Some((first, rest)) = ordered.split_first() else {
        return Vec::new();
    };

    ExtremeMetric::ALL
        .iter()
        .map(|metric| {
            let mut max = (*first, metric.value(first));
            let mut min = max;

            for &summary in rest {
                let value = metric.value(summary);
                if value > max.1 {
                    max = (summary, value);
                }
                if value < min.1 {
                    min = (summary, value);
                }
            }

            MetricExtreme {
                metric: *metric,
                max: MetricExtreme::holder(max.0, max.1),
                min: MetricExtreme::holder(min.0, min.1),
            }
        })
        .collect()
}

/// Convenience lookup into the output of [`find_extremes`].
pub fn extreme_for(extremes: &[MetricExtreme], metric: ExtremeMetric) -> Option<&MetricExtreme> {
    extremes.iter().find(|e| e.metric == metric)
}
