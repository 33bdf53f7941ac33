use chrono::Weekday;

/// Canonical English name stored on day records.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_follow_calendar_index() {
        let expected = [
            "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
        ];
        let mut weekday = Weekday::Mon;
        for (index, name) in expected.iter().enumerate() {
            assert_eq!(weekday_name(weekday), *name);
            assert_eq!(weekday.number_from_monday() as usize, index + 1);
            weekday = weekday.succ();
        }
    }
}
