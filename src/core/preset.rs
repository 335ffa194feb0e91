// LogLens - core/preset.rs
//
// Named date-range shortcuts and preset classification for highlighting.

use crate::core::model::LocalSelection;
use crate::core::timezone::local_today;
use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;

/// A named whole-day date range relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Today,
    Yesterday,
    /// Two days ago through today, inclusive.
    Last3Days,
}

impl Preset {
    /// All presets in matching (and button) order.
    pub fn all() -> &'static [Preset] {
        &[Preset::Today, Preset::Yesterday, Preset::Last3Days]
    }

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            Preset::Today => "Today",
            Preset::Yesterday => "Yesterday",
            Preset::Last3Days => "Last 3 Days",
        }
    }

    /// Evaluate the rule against `now` in `tz`: a whole-day local selection.
    pub fn selection(&self, now: DateTime<Utc>, tz: Tz) -> LocalSelection {
        let today = local_today(now, tz);
        let (from, to) = match self {
            Preset::Today => (today, today),
            Preset::Yesterday => {
                let yesterday = days_before(today, 1);
                (yesterday, yesterday)
            }
            Preset::Last3Days => (days_before(today, 2), today),
        };
        LocalSelection::whole_days(from, to)
    }
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(date)
}

/// The first preset whose rule reproduces `selection` exactly, compared by
/// local calendar date and time-of-day rather than by instant.
///
/// A selection with an open side never matches.
pub fn match_preset(selection: &LocalSelection, now: DateTime<Utc>, tz: Tz) -> Option<Preset> {
    if selection.range.from.is_none() || selection.range.to.is_none() {
        return None;
    }
    Preset::all()
        .iter()
        .copied()
        .find(|preset| preset.selection(now, tz) == *selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::DateRange;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_preset_ranges_cross_month_boundary() {
        let now = utc("2024-03-01T12:00:00Z");
        let tz = chrono_tz::UTC;
        assert_eq!(
            Preset::Yesterday.selection(now, tz).range,
            DateRange::day(date(2024, 2, 29))
        );
        assert_eq!(
            Preset::Last3Days.selection(now, tz).range,
            DateRange::between(date(2024, 2, 28), date(2024, 3, 1))
        );
    }

    #[test]
    fn test_matches_each_preset() {
        let now = utc("2024-06-15T10:00:00Z");
        let tz = chrono_tz::Europe::Paris;
        for preset in Preset::all() {
            let sel = preset.selection(now, tz);
            assert_eq!(match_preset(&sel, now, tz), Some(*preset));
        }
    }

    #[test]
    fn test_today_is_local_date_not_utc_date() {
        // 22:30Z on the 15th is already the 16th in Tokyo.
        let now = utc("2024-06-15T22:30:00Z");
        let tz = chrono_tz::Asia::Tokyo;
        let sel = LocalSelection::whole_days(date(2024, 6, 16), date(2024, 6, 16));
        assert_eq!(match_preset(&sel, now, tz), Some(Preset::Today));
        assert_eq!(match_preset(&sel, now, chrono_tz::UTC), None);
    }

    #[test]
    fn test_non_preset_shapes_do_not_match() {
        let now = utc("2024-06-15T10:00:00Z");
        let tz = chrono_tz::UTC;

        // Two-day range.
        let two_days = LocalSelection::whole_days(date(2024, 6, 14), date(2024, 6, 15));
        assert_eq!(match_preset(&two_days, now, tz), None);

        // Four-day range ending today.
        let four_days = LocalSelection::whole_days(date(2024, 6, 12), date(2024, 6, 15));
        assert_eq!(match_preset(&four_days, now, tz), None);

        // Today, but a narrowed time-of-day.
        let mut narrowed = Preset::Today.selection(now, tz);
        narrowed.start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert_eq!(match_preset(&narrowed, now, tz), None);

        // Open-ended.
        let mut open = Preset::Today.selection(now, tz);
        open.range.to = None;
        assert_eq!(match_preset(&open, now, tz), None);
    }
}
