/// Canonical clock time and the arithmetic shared by the whole engine
/// The 24-hour hour/minute pair is the single source of truth for selection

use std::fmt;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A canonical 24-hour clock time. Hour is 0-23, minute is 0-59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

/// Whether the selected time falls before or after noon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    Am,
    Pm,
}

impl ClockTime {
    /// Build a clock time, clamping out-of-range components into 0-23 / 0-59
    pub fn new(hour: u8, minute: u8) -> Self {
        Self {
            hour: hour.min(23),
            minute: minute.min(59),
        }
    }

    /// Build a clock time from minutes since midnight, wrapping at 24h
    pub fn from_total_minutes(total: u32) -> Self {
        let total = total % MINUTES_PER_DAY;
        Self {
            hour: (total / 60) as u8,
            minute: (total % 60) as u8,
        }
    }

    /// Minutes since midnight (0-1439), the comparison form for bounds checks
    pub fn minutes_from_midnight(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    /// Lenient `HH:MM` parse. Components that fail to parse become 0;
    /// numeric components out of range are clamped. Never fails: a
    /// malformed string yields a visibly-wrong selection, not a crash.
    pub fn parse_lenient(s: &str) -> Self {
        let mut parts = s.split(':');
        let hour = parts
            .next()
            .and_then(|p| p.trim().parse::<u8>().ok())
            .unwrap_or(0);
        let minute = parts
            .next()
            .and_then(|p| p.trim().parse::<u8>().ok())
            .unwrap_or(0);
        Self::new(hour, minute)
    }

    pub fn period(&self) -> DayPeriod {
        if self.hour >= 12 {
            DayPeriod::Pm
        } else {
            DayPeriod::Am
        }
    }

    /// The hour value shown on a 12-hour wheel (1-12; 0 and 12 both show 12)
    pub fn display_hour_12(&self) -> u8 {
        let h = self.hour % 12;
        if h == 0 {
            12
        } else {
            h
        }
    }

    /// Human-readable form: `HH:MM` in 24-hour mode, `hh:MM AM|PM` otherwise
    pub fn format_display(&self, is_12h: bool) -> String {
        if !is_12h {
            return self.to_string();
        }
        let period = match self.period() {
            DayPeriod::Am => "AM",
            DayPeriod::Pm => "PM",
        };
        format!("{:02}:{:02} {}", self.display_hour_12(), self.minute, period)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct Visitor;

        impl de::Visitor<'_> for Visitor {
            type Value = ClockTime;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a clock time string like \"09:30\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ClockTime, E> {
                Ok(ClockTime::parse_lenient(v))
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}

/// Round a minute to the nearest multiple of `interval`, taken modulo 60.
/// Rounding 58 with interval 30 yields 0; callers decide whether that
/// wraps into the next hour (the initial-selection correction does, the
/// plain initial rounding does not).
pub fn round_to_interval(minute: u8, interval: u8) -> u8 {
    let interval = interval.max(1) as u32;
    let minute = minute as u32;
    // Integer half-up rounding: round(minute / interval) * interval
    let rounded = (minute * 2 + interval) / (interval * 2) * interval;
    (rounded % 60) as u8
}

/// Round a minute up to the next multiple of `interval`, returning the
/// unwrapped value (may be 60; the caller carries the hour).
pub fn ceil_to_interval(minute: u8, interval: u8) -> u8 {
    let interval = interval.max(1) as u32;
    let minute = minute as u32;
    (minute.div_ceil(interval) * interval) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    // === parse_lenient tests ===

    #[test]
    fn test_parse_well_formed() {
        assert_eq!(ClockTime::parse_lenient("09:30"), ClockTime::new(9, 30));
        assert_eq!(ClockTime::parse_lenient("00:00"), ClockTime::new(0, 0));
        assert_eq!(ClockTime::parse_lenient("23:59"), ClockTime::new(23, 59));
    }

    #[test]
    fn test_parse_malformed_components_become_zero() {
        assert_eq!(ClockTime::parse_lenient("ab:cd"), ClockTime::new(0, 0));
        assert_eq!(ClockTime::parse_lenient(""), ClockTime::new(0, 0));
        assert_eq!(ClockTime::parse_lenient("nope"), ClockTime::new(0, 0));
        // Partial damage: good hour, bad minute
        assert_eq!(ClockTime::parse_lenient("12:xx"), ClockTime::new(12, 0));
        assert_eq!(ClockTime::parse_lenient("12"), ClockTime::new(12, 0));
    }

    #[test]
    fn test_parse_out_of_range_clamps() {
        assert_eq!(ClockTime::parse_lenient("99:99"), ClockTime::new(23, 59));
        assert_eq!(ClockTime::parse_lenient("24:00"), ClockTime::new(23, 0));
    }

    #[test]
    fn test_parse_negative_components_become_zero() {
        // "-5" fails the u8 parse, so it degrades to 0 like any other garbage
        assert_eq!(ClockTime::parse_lenient("-5:-10"), ClockTime::new(0, 0));
    }

    #[test]
    fn test_parse_extra_components_ignored() {
        assert_eq!(ClockTime::parse_lenient("09:30:45"), ClockTime::new(9, 30));
    }

    // === display tests ===

    #[test]
    fn test_display_zero_padded() {
        assert_eq!(ClockTime::new(9, 5).to_string(), "09:05");
        assert_eq!(ClockTime::new(0, 0).to_string(), "00:00");
        assert_eq!(ClockTime::new(23, 59).to_string(), "23:59");
    }

    #[test]
    fn test_format_display_12h() {
        assert_eq!(ClockTime::new(0, 5).format_display(true), "12:05 AM");
        assert_eq!(ClockTime::new(12, 0).format_display(true), "12:00 PM");
        assert_eq!(ClockTime::new(13, 30).format_display(true), "01:30 PM");
        assert_eq!(ClockTime::new(9, 15).format_display(true), "09:15 AM");
    }

    #[test]
    fn test_format_display_24h() {
        assert_eq!(ClockTime::new(13, 30).format_display(false), "13:30");
        assert_eq!(ClockTime::new(0, 5).format_display(false), "00:05");
    }

    // === total-minutes tests ===

    #[test]
    fn test_minutes_from_midnight() {
        assert_eq!(ClockTime::new(0, 0).minutes_from_midnight(), 0);
        assert_eq!(ClockTime::new(9, 30).minutes_from_midnight(), 570);
        assert_eq!(ClockTime::new(23, 59).minutes_from_midnight(), 1439);
    }

    #[test]
    fn test_from_total_minutes_wraps() {
        assert_eq!(ClockTime::from_total_minutes(570), ClockTime::new(9, 30));
        assert_eq!(ClockTime::from_total_minutes(1440), ClockTime::new(0, 0));
        assert_eq!(ClockTime::from_total_minutes(1441), ClockTime::new(0, 1));
    }

    // === rounding tests ===

    #[test]
    fn test_round_to_interval_nearest() {
        assert_eq!(round_to_interval(14, 30), 0);
        assert_eq!(round_to_interval(15, 30), 30); // half rounds up
        assert_eq!(round_to_interval(44, 30), 30);
        assert_eq!(round_to_interval(29, 15), 30);
        assert_eq!(round_to_interval(7, 1), 7);
    }

    #[test]
    fn test_round_to_interval_wraps_to_zero() {
        // 58 with interval 30 rounds to 60, which wraps to 0
        assert_eq!(round_to_interval(58, 30), 0);
        assert_eq!(round_to_interval(59, 15), 0);
    }

    #[test]
    fn test_round_to_interval_non_divisor() {
        // 7 does not divide 60; results must still land in 0-59
        assert_eq!(round_to_interval(58, 7), 56);
        assert_eq!(round_to_interval(3, 7), 0);
        assert_eq!(round_to_interval(4, 7), 7);
    }

    #[test]
    fn test_round_zero_interval_treated_as_one() {
        assert_eq!(round_to_interval(42, 0), 42);
    }

    #[test]
    fn test_ceil_to_interval() {
        assert_eq!(ceil_to_interval(15, 30), 30);
        assert_eq!(ceil_to_interval(30, 30), 30);
        assert_eq!(ceil_to_interval(31, 30), 60); // caller carries the hour
        assert_eq!(ceil_to_interval(0, 15), 0);
    }

    // === serde tests ===

    #[test]
    fn test_serde_round_trip() {
        let t = ClockTime::new(9, 5);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"09:05\"");
        let back: ClockTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_serde_lenient_input() {
        let t: ClockTime = serde_json::from_str("\"garbage\"").unwrap();
        assert_eq!(t, ClockTime::new(0, 0));
    }
}


/// Kani formal verification proofs
#[cfg(kani)]
mod kani_proofs {
    use super::*;

    #[kani::proof]
    fn rounding_always_in_range() {
        let minute: u8 = kani::any();
        kani::assume(minute < 60);
        let interval: u8 = kani::any();

        let rounded = round_to_interval(minute, interval);
        kani::assert(rounded < 60, "rounded minute must stay in 0-59");
    }

    #[kani::proof]
    fn constructor_clamps() {
        let hour: u8 = kani::any();
        let minute: u8 = kani::any();
        let t = ClockTime::new(hour, minute);
        kani::assert(t.hour <= 23, "hour clamped to 0-23");
        kani::assert(t.minute <= 59, "minute clamped to 0-59");
    }

    #[kani::proof]
    fn total_minutes_bounded() {
        let total: u32 = kani::any();
        let t = ClockTime::from_total_minutes(total);
        kani::assert(t.hour < 24, "wrapped hour in range");
        kani::assert(t.minute < 60, "wrapped minute in range");
    }
}
