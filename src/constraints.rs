/// Validity checks over the selected time: resolved bounds, the per-hour
/// blocklist, and the caller-supplied predicate, all ANDed together

use crate::bounds::ResolvedBounds;
use crate::time::ClockTime;

/// Caller-supplied rejection predicate; returns true to disable a time
pub type DisablePredicate = Box<dyn Fn(u8, u8) -> bool + Send + Sync>;

/// Per-row feasibility, used to dim individual wheel rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Valid,
    Invalid,
}

/// A borrowed view of everything that constrains the selection. Derived
/// values are recomputed from this on demand, never cached.
pub struct Constraints<'a> {
    pub bounds: ResolvedBounds,
    pub disabled_hours: &'a [u8],
    pub minute_interval: u8,
    pub should_disable: Option<&'a (dyn Fn(u8, u8) -> bool + Send + Sync)>,
}

impl Constraints<'_> {
    /// The four ANDed checks: at or after min, at or before max, hour not
    /// in the disabled set, predicate does not reject. Compared in
    /// minutes-since-midnight; an inverted min/max range fails everything.
    pub fn check_validity(&self, hour: u8, minute: u8) -> bool {
        let current = hour as u32 * 60 + minute as u32;
        if let Some(min) = self.bounds.min {
            if current < min.minutes_from_midnight() {
                return false;
            }
        }
        if let Some(max) = self.bounds.max {
            if current > max.minutes_from_midnight() {
                return false;
            }
        }
        if self.disabled_hours.contains(&hour) {
            return false;
        }
        if let Some(should_disable) = self.should_disable {
            if should_disable(hour, minute) {
                return false;
            }
        }
        true
    }

    /// Hour-row feasibility uses only the hour component: the disabled set
    /// plus the min/max HOUR window. Minute-level detail and the custom
    /// predicate are deferred to the minute wheel.
    pub fn hour_status(&self, canonical_hour: u8) -> RowStatus {
        if self.disabled_hours.contains(&canonical_hour) {
            return RowStatus::Invalid;
        }
        let min_hour = self.bounds.min.map(|t| t.hour).unwrap_or(0);
        let max_hour = self.bounds.max.map(|t| t.hour).unwrap_or(23);
        if canonical_hour < min_hour || canonical_hour > max_hour {
            return RowStatus::Invalid;
        }
        RowStatus::Valid
    }

    /// Minute-row feasibility runs the full validity check against the
    /// currently selected hour
    pub fn minute_status(&self, selected_hour: u8, minute: u8) -> RowStatus {
        if self.check_validity(selected_hour, minute) {
            RowStatus::Valid
        } else {
            RowStatus::Invalid
        }
    }

    pub fn is_valid_time(&self, t: ClockTime) -> bool {
        self.check_validity(t.hour, t.minute)
    }
}
