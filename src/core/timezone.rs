// LogLens - core/timezone.rs
//
// IANA timezone resolution and wall-clock <-> UTC conversion.
//
// The timezone is always an explicit value passed into each conversion; no
// code in this module reads the process default zone except the
// `SystemZoneResolver`, which the host calls once at startup.
//
// Conversions use the official rules for the specific date (chrono-tz), so
// the same wall-clock time maps to different UTC offsets across DST
// transitions. Wall-clock times that do not map to exactly one instant:
//   - ambiguous (clocks fall back): the earlier instant is used.
//   - nonexistent (clocks spring forward): the time is read with the offset
//     in force before the transition, landing just after the gap.

use crate::util::error::TimezoneError;
use chrono::{
    DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone, Utc,
};
use chrono_tz::Tz;

/// Source of the IANA zone the user's wall-clock times are expressed in.
pub trait ZoneResolver {
    fn resolve(&self) -> Result<Tz, TimezoneError>;
}

/// Reads the operating system's configured zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemZoneResolver;

impl ZoneResolver for SystemZoneResolver {
    fn resolve(&self) -> Result<Tz, TimezoneError> {
        let name = iana_time_zone::get_timezone()
            .map_err(|source| TimezoneError::HostDetection { source })?;
        parse_zone(&name)
    }
}

/// Always yields the configured zone (CLI or config override).
#[derive(Debug, Clone, Copy)]
pub struct FixedZoneResolver(pub Tz);

impl ZoneResolver for FixedZoneResolver {
    fn resolve(&self) -> Result<Tz, TimezoneError> {
        Ok(self.0)
    }
}

/// Parse an IANA zone identifier such as `Europe/Berlin`.
pub fn parse_zone(name: &str) -> Result<Tz, TimezoneError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| TimezoneError::UnknownZone {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

/// Resolve a zone, falling back to UTC with a warning on failure.
pub fn resolve_or_utc(resolver: &dyn ZoneResolver) -> Tz {
    match resolver.resolve() {
        Ok(tz) => {
            tracing::info!(timezone = tz.name(), "Timezone resolved");
            tz
        }
        Err(e) => {
            tracing::warn!(error = %e, "Timezone resolution failed; using UTC");
            Tz::UTC
        }
    }
}

/// Interpret `date` + `time` as wall-clock time in `tz` and return the
/// equivalent UTC instant.
pub fn local_to_utc(date: NaiveDate, time: NaiveTime, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            let day_before = naive.checked_sub_signed(TimeDelta::days(1)).unwrap_or(naive);
            let before = tz.offset_from_utc_datetime(&day_before).fix();
            match naive.checked_sub_signed(TimeDelta::seconds(i64::from(before.local_minus_utc())))
            {
                Some(utc) => {
                    tracing::debug!(
                        local = %naive,
                        timezone = tz.name(),
                        "Wall-clock time falls in a DST gap; shifted past the transition"
                    );
                    Utc.from_utc_datetime(&utc)
                }
                // Edge of the representable range: no offset can be applied.
                None => {
                    tracing::warn!(
                        local = %naive,
                        timezone = tz.name(),
                        "Wall-clock time outside the convertible range; read as UTC"
                    );
                    Utc.from_utc_datetime(&naive)
                }
            }
        }
    }
}

/// The wall-clock date and time a user in `tz` perceives for the UTC epoch
/// second `secs`. `None` only for timestamps outside chrono's range.
pub fn utc_to_local(secs: i64, tz: Tz) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.with_timezone(&tz).naive_local())
}

/// The local calendar date in `tz` at the instant `now`.
pub fn local_today(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_parse_zone_known_and_unknown() {
        assert_eq!(parse_zone("Europe/Berlin").unwrap(), chrono_tz::Europe::Berlin);
        assert!(matches!(
            parse_zone("Mars/Olympus"),
            Err(TimezoneError::UnknownZone { .. })
        ));
    }

    #[test]
    fn test_fixed_resolver_and_fallback() {
        let tz = resolve_or_utc(&FixedZoneResolver(chrono_tz::Asia::Tokyo));
        assert_eq!(tz, chrono_tz::Asia::Tokyo);
    }

    #[test]
    fn test_offset_follows_date_specific_rules() {
        let ny = chrono_tz::America::New_York;
        // Winter: UTC-5.
        assert_eq!(
            local_to_utc(date(2024, 1, 15), hms(12, 0, 0), ny),
            utc("2024-01-15T17:00:00Z")
        );
        // Summer: UTC-4.
        assert_eq!(
            local_to_utc(date(2024, 7, 15), hms(12, 0, 0), ny),
            utc("2024-07-15T16:00:00Z")
        );
    }

    #[test]
    fn test_nonexistent_local_time_lands_after_gap() {
        let ny = chrono_tz::America::New_York;
        // 02:30 does not exist on 2024-03-10; read with EST (-5) it is 03:30 EDT.
        let instant = local_to_utc(date(2024, 3, 10), hms(2, 30, 0), ny);
        assert_eq!(instant, utc("2024-03-10T07:30:00Z"));
        assert_eq!(
            utc_to_local(instant.timestamp(), ny).unwrap(),
            date(2024, 3, 10).and_time(hms(3, 30, 0))
        );
    }

    #[test]
    fn test_ambiguous_local_time_uses_earlier_instant() {
        let ny = chrono_tz::America::New_York;
        // 01:30 happens twice on 2024-11-03; the EDT occurrence comes first.
        assert_eq!(
            local_to_utc(date(2024, 11, 3), hms(1, 30, 0), ny),
            utc("2024-11-03T05:30:00Z")
        );
    }

    #[test]
    fn test_range_edges_do_not_overflow() {
        let ny = chrono_tz::America::New_York;
        let late = local_to_utc(NaiveDate::MAX, hms(23, 59, 59), ny);
        assert!(late.date_naive() >= NaiveDate::MAX.pred_opt().unwrap());

        let tokyo = chrono_tz::Asia::Tokyo;
        let early = local_to_utc(NaiveDate::MIN, hms(0, 0, 0), tokyo);
        assert!(early.date_naive() <= NaiveDate::MIN.succ_opt().unwrap());
    }

    #[test]
    fn test_local_today_differs_across_zones() {
        let now = utc("2024-05-01T23:30:00Z");
        assert_eq!(local_today(now, chrono_tz::UTC), date(2024, 5, 1));
        assert_eq!(local_today(now, chrono_tz::Asia::Tokyo), date(2024, 5, 2));
        assert_eq!(
            local_today(now, chrono_tz::America::Los_Angeles),
            date(2024, 5, 1)
        );
    }
}
