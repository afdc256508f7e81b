/// Bounds resolver: turns fixed clock strings or relative "now"-based
/// descriptors into concrete optional bounds against the current wall clock

use serde::Deserialize;
use tracing::warn;

use crate::clock::Clock;
use crate::time::{ceil_to_interval, round_to_interval, ClockTime, MINUTES_PER_DAY};

/// Dynamic bound anchored at the current wall-clock time.
/// Matches the JSON descriptor `{"type":"now","offsetMinutes":N,"roundUp":B}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RelativeBound {
    #[serde(rename_all = "camelCase")]
    Now {
        #[serde(default)]
        offset_minutes: i32,
        #[serde(default)]
        round_up: bool,
    },
}

/// A minimum or maximum constraint, fixed or resolved against "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSpec {
    Fixed(ClockTime),
    Relative(RelativeBound),
}

impl BoundSpec {
    /// Parse a bound from its external string form: either a clock string
    /// (leniently) or a JSON relative descriptor. A malformed descriptor
    /// degrades to the lenient clock parse rather than failing.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with('{') {
            match serde_json::from_str::<RelativeBound>(trimmed) {
                Ok(rel) => return BoundSpec::Relative(rel),
                Err(e) => {
                    warn!("malformed relative bound descriptor ({e}), treating as clock string");
                }
            }
        }
        BoundSpec::Fixed(ClockTime::parse_lenient(trimmed))
    }

    pub fn is_relative(&self) -> bool {
        matches!(self, BoundSpec::Relative(_))
    }
}

/// Concrete bounds after resolution. Either, both, or neither may be
/// present; min <= max is deliberately NOT enforced (an inverted range
/// simply yields zero valid minutes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedBounds {
    pub min: Option<ClockTime>,
    pub max: Option<ClockTime>,
}

/// Resolve one bound spec against the clock. Fixed bounds pass through
/// unchanged; relative bounds add their offset to now (wrapping at 24h)
/// and optionally round the minute up to the next interval multiple,
/// carrying one hour on overflow.
pub fn resolve(
    spec: Option<&BoundSpec>,
    minute_interval: u8,
    clock: &dyn Clock,
) -> Option<ClockTime> {
    let spec = spec?;
    match spec {
        BoundSpec::Fixed(t) => Some(*t),
        BoundSpec::Relative(RelativeBound::Now {
            offset_minutes,
            round_up,
        }) => {
            let now = clock.now();
            let total = (now.minutes_from_midnight() as i64 + *offset_minutes as i64)
                .rem_euclid(MINUTES_PER_DAY as i64) as u32;
            let mut resolved = ClockTime::from_total_minutes(total);

            if *round_up {
                let interval = minute_interval.max(1);
                if resolved.minute % interval != 0 {
                    let ceiled = ceil_to_interval(resolved.minute, interval);
                    if ceiled >= 60 {
                        resolved = ClockTime::new((resolved.hour + 1) % 24, 0);
                    } else {
                        resolved = ClockTime::new(resolved.hour, ceiled);
                    }
                }
            }
            Some(resolved)
        }
    }
}

/// Resolve the min/max pair in one pass
pub fn resolve_pair(
    min: Option<&BoundSpec>,
    max: Option<&BoundSpec>,
    minute_interval: u8,
    clock: &dyn Clock,
) -> ResolvedBounds {
    ResolvedBounds {
        min: resolve(min, minute_interval, clock),
        max: resolve(max, minute_interval, clock),
    }
}

/// Initial-selection correction performed on the closed-to-open transition.
/// The initial minute is rounded to the nearest interval multiple (modulo
/// 60, hour deliberately untouched on this path); if the result falls
/// strictly before the resolved min, the selection snaps to the smallest
/// interval-aligned minute at or after min, carrying into the next hour on
/// overflow. There is no symmetric correction against max.
pub fn correct_initial(initial: ClockTime, min: Option<ClockTime>, minute_interval: u8) -> ClockTime {
    let mut hour = initial.hour;
    let mut minute = round_to_interval(initial.minute, minute_interval);

    if let Some(min) = min {
        let current_total = hour as u32 * 60 + minute as u32;
        if current_total < min.minutes_from_midnight() {
            let next_valid = ceil_to_interval(min.minute, minute_interval);
            if next_valid >= 60 {
                hour = (min.hour + 1) % 24;
                minute = 0;
            } else {
                hour = min.hour;
                minute = next_valid;
            }
        }
    }

    ClockTime::new(hour, minute)
}



/// Kani formal verification proofs
#[cfg(kani)]
mod kani_proofs {
    use super::*;

    #[kani::proof]
    fn correction_components_in_range() {
        let init_h: u8 = kani::any();
        kani::assume(init_h < 24);
        let init_m: u8 = kani::any();
        kani::assume(init_m < 60);
        let min_h: u8 = kani::any();
        kani::assume(min_h < 24);
        let min_m: u8 = kani::any();
        kani::assume(min_m < 60);
        let interval: u8 = kani::any();
        kani::assume(interval >= 1);

        let corrected = correct_initial(
            ClockTime::new(init_h, init_m),
            Some(ClockTime::new(min_h, min_m)),
            interval,
        );
        kani::assert(corrected.hour < 24, "corrected hour in range");
        kani::assert(corrected.minute < 60, "corrected minute in range");
    }
}
