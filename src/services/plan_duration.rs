//! Plan length derived from how many days per week the person trains.

pub const MIN_PLAN_WEEKS: u32 = 4;
pub const MAX_PLAN_WEEKS: u32 = 6;

/// A quarter of a year, in days.
pub const TARGET_TRAINING_DAYS: f64 = 0.25 * 365.0;

/// Grows the plan from four weeks until the total session count reaches the
/// quarter-year target or the six-week cap, whichever comes first. With at
/// most seven sessions a week the cap always wins.
///
/// Returns `None` when there are no training days to plan for.
pub fn determine_num_weeks(days_per_week: usize) -> Option<u32> {
    if days_per_week == 0 {
        return None;
    }

    let mut weeks = MIN_PLAN_WEEKS;
    while (days_per_week as f64) * (weeks as f64) < TARGET_TRAINING_DAYS && weeks < MAX_PLAN_WEEKS {
        weeks += 1;
    }
    Some(weeks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_every_week_length_hits_the_cap() {
        for days in 1..=7 {
            assert_eq!(determine_num_weeks(days), Some(6), "days per week: {}", days);
        }
    }

    #[test]
    fn test_no_days_is_undeterminable() {
        assert_eq!(determine_num_weeks(0), None);
    }

    #[test]
    fn test_target_reachable_only_with_many_days() {
        // 23 sessions a week clear the target within four weeks.
        assert_eq!(determine_num_weeks(23), Some(4));
        assert_eq!(determine_num_weeks(19), Some(5));
    }

    proptest! {
        #[test]
        fn prop_weeks_bounded_and_non_decreasing(days in 1usize..=7) {
            let weeks = determine_num_weeks(days).unwrap();
            prop_assert!((MIN_PLAN_WEEKS..=MAX_PLAN_WEEKS).contains(&weeks));
            if days < 7 {
                prop_assert!(determine_num_weeks(days + 1).unwrap() >= weeks);
            }
        }
    }
}
