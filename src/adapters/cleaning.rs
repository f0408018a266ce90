//! Upstream data fixes applied while loading snapshots.

use crate::domain::model::AgeGroup;

fn group_total(groups: &[AgeGroup], range: &str) -> Option<u64> {
    groups.iter().find(|g| g.age_range == range).map(|g| g.total)
}

/// Some upstream files report the 85+ population twice, once as `85-89` and
/// again as `100+`, with empty `90-94` and `95-99` groups. In that case the
/// three bogus groups are dropped and `85-89` becomes `85+`.
///
/// Returns whether the groups were changed.
pub fn merge_elderly_groups(groups: &mut Vec<AgeGroup>) -> bool {
    let (Some(base), Some(g90), Some(g95), Some(g100)) = (
        group_total(groups, "85-89"),
        group_total(groups, "90-94"),
        group_total(groups, "95-99"),
        group_total(groups, "100+"),
    ) else {
        return false;
    };

    if g90 != 0 || g95 != 0 || g100 != base {
        return false;
    }

    groups.retain(|g| !matches!(g.age_range.as_str(), "90-94" | "95-99" | "100+"));
    for group in groups.iter_mut().filter(|g| g.age_range == "85-89") {
        group.age_range = "85+".to_string();
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elderly(g90: (u64, u64), g100: (u64, u64)) -> Vec<AgeGroup> {
        vec![
            AgeGroup::new("80-84", 40, 60),
            AgeGroup::new("85-89", 20, 30),
            AgeGroup::new("90-94", g90.0, g90.1),
            AgeGroup::new("95-99", 0, 0),
            AgeGroup::new("100+", g100.0, g100.1),
        ]
    }

    #[test]
    fn test_duplicated_elderly_groups_are_merged() {
        let mut groups = elderly((0, 0), (20, 30));
        assert!(merge_elderly_groups(&mut groups));

        let ranges: Vec<&str> = groups.iter().map(|g| g.age_range.as_str()).collect();
        assert_eq!(ranges, vec!["80-84", "85+"]);
        assert_eq!(groups[1].total, 50);
    }

    #[test]
    fn test_real_data_is_left_alone() {
        let mut groups = elderly((8, 12), (1, 2));
        assert!(!merge_elderly_groups(&mut groups));
        assert_eq!(groups.len(), 5);

        let mut partial = vec![AgeGroup::new("85-89", 1, 1), AgeGroup::new("100+", 1, 1)];
        assert!(!merge_elderly_groups(&mut partial));
    }
}
