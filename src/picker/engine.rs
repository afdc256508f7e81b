/// Selection state machine: owns the canonical hour/minute, the display
/// mode, and the open/closed lifecycle; derives validity, presets, and
/// row feasibility from the resolved bounds on demand

use std::sync::Arc;

use tracing::{debug, info};

use crate::bounds::{correct_initial, resolve_pair, ResolvedBounds};
use crate::clock::Clock;
use crate::config::Config;
use crate::constraints::{Constraints, DisablePredicate, RowStatus};
use crate::mapping::{
    display_to_canonical_hour, hour_rows, hour_to_row, minute_rows, minute_to_row, offset_to_row,
    WheelKind,
};
use crate::presets;
use crate::time::{round_to_interval, ClockTime};

/// Scrollable row-list capability, one per column. The engine commands
/// jumps; settle events travel the other way, delivered by the caller
/// into [`PickerEngine::scroll_settled`].
pub trait WheelColumn: Send {
    fn jump_to(&mut self, row: usize, animated: bool);
    fn row_height(&self) -> f32;
}

pub struct PickerEngine {
    config: Config,
    clock: Arc<dyn Clock>,
    hour_wheel: Box<dyn WheelColumn>,
    minute_wheel: Box<dyn WheelColumn>,
    should_disable: Option<DisablePredicate>,

    open: bool,
    selected: ClockTime,
    is_12_hour_mode: bool,
    internal_min: Option<ClockTime>,
    internal_max: Option<ClockTime>,

    // Programmatic-jump settle suppression. Armed before a jump is issued
    // and disarmed later by a scheduled task carrying the generation it
    // was armed for; stale disarms from superseded jumps are ignored.
    suppressed: bool,
    generation: u64,
}

impl PickerEngine {
    pub fn new(
        config: Config,
        clock: Arc<dyn Clock>,
        hour_wheel: Box<dyn WheelColumn>,
        minute_wheel: Box<dyn WheelColumn>,
    ) -> Self {
        let is_12_hour_mode = config.use_12_hour;
        Self {
            config,
            clock,
            hour_wheel,
            minute_wheel,
            should_disable: None,
            open: false,
            selected: ClockTime::new(0, 0),
            is_12_hour_mode,
            internal_min: None,
            internal_max: None,
            suppressed: false,
            generation: 0,
        }
    }

    /// Inject the caller's rejection predicate. Called fresh on every
    /// validity check, never memoized.
    pub fn set_disable_predicate<F>(&mut self, predicate: F)
    where
        F: Fn(u8, u8) -> bool + Send + Sync + 'static,
    {
        self.should_disable = Some(Box::new(predicate));
    }

    // === lifecycle ===

    /// Closed-to-open transition: resolve bounds, derive the initial
    /// selection (configured initial time, else the clock's now), round it
    /// to the minute grid, correct it against min, and sync both wheels
    /// without animation. Calling this while already open re-initializes,
    /// which is how reconfiguration is modeled. Returns the suppression
    /// generation of the initial sync jump.
    pub fn open(&mut self) -> u64 {
        let resolved = resolve_pair(
            self.config.min_time.as_ref(),
            self.config.max_time.as_ref(),
            self.config.minute_interval,
            self.clock.as_ref(),
        );
        self.internal_min = resolved.min;
        self.internal_max = resolved.max;
        self.is_12_hour_mode = self.config.use_12_hour;

        let initial = self
            .config
            .initial_time
            .unwrap_or_else(|| self.clock.now());
        let corrected = correct_initial(initial, self.internal_min, self.config.minute_interval);

        self.open = true;
        info!(
            "picker opened at {} (initial {}, window {:?}..{:?})",
            corrected, initial, self.internal_min, self.internal_max
        );
        self.scroll_to_time(corrected.hour, corrected.minute, false)
    }

    /// Open-to-closed transition. Selection does not survive; callers
    /// wanting continuity pass the confirmed value back as the next
    /// initial time. Safe to call when already closed.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.suppressed = false;
        info!("picker closed");
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    // === bounds refresh ===

    /// Re-resolve both bounds against the current wall clock. Idempotent;
    /// touches only the bounds used for validity and presets, never the
    /// selection. Driven on a cadence while a relative bound is present.
    pub fn refresh_bounds(&mut self) {
        if !self.open {
            return;
        }
        let resolved = resolve_pair(
            self.config.min_time.as_ref(),
            self.config.max_time.as_ref(),
            self.config.minute_interval,
            self.clock.as_ref(),
        );
        if resolved.min != self.internal_min || resolved.max != self.internal_max {
            debug!(
                "bounds refreshed: {:?}..{:?} -> {:?}..{:?}",
                self.internal_min, self.internal_max, resolved.min, resolved.max
            );
            self.internal_min = resolved.min;
            self.internal_max = resolved.max;
        }
    }

    pub fn has_dynamic_bounds(&self) -> bool {
        self.config.has_dynamic_bounds()
    }

    // === programmatic jumps ===

    /// Drive both wheels to the rows matching the given time and update the
    /// canonical selection immediately (independent of any animation). The
    /// minute snaps to the interval grid. Arms settle suppression and
    /// returns the generation a disarm task must present.
    fn scroll_to_time(&mut self, hour: u8, minute: u8, animated: bool) -> u64 {
        self.suppressed = true;
        self.generation += 1;

        let interval = self.config.minute_interval;
        let rounded = round_to_interval(minute, interval);
        let hour_row = hour_to_row(hour, self.is_12_hour_mode);
        let minute_row = minute_to_row(rounded, interval);

        self.selected = ClockTime::new(hour, rounded);
        self.hour_wheel.jump_to(hour_row, animated);
        self.minute_wheel.jump_to(minute_row, animated);
        debug!(
            "jump to {} (rows {}/{}, animated={}, gen {})",
            self.selected, hour_row, minute_row, animated, self.generation
        );
        self.generation
    }

    /// Clear settle suppression if `generation` is still the newest jump.
    /// Disarms from superseded jumps are stale and ignored.
    pub fn disarm_suppression(&mut self, generation: u64) {
        if generation == self.generation {
            self.suppressed = false;
        } else {
            debug!(
                "stale disarm for gen {} ignored (current {})",
                generation, self.generation
            );
        }
    }

    pub fn is_suppressing(&self) -> bool {
        self.suppressed
    }

    // === user interactions ===

    /// Direct tap on an hour row. The display value is translated to
    /// canonical using the current AM/PM half; the wheel is asked to
    /// animate to the row. Taps do not arm suppression: the settle event
    /// they trigger re-derives the same selection.
    pub fn tap_hour_row(&mut self, row: usize, value: u8) {
        if !self.open {
            return;
        }
        let canonical =
            display_to_canonical_hour(value, self.is_12_hour_mode, self.selected.hour >= 12);
        let row = row.min(hour_rows(self.is_12_hour_mode).len() - 1);
        self.hour_wheel.jump_to(row, true);
        self.selected = ClockTime::new(canonical, self.selected.minute);
    }

    /// Direct tap on a minute row
    pub fn tap_minute_row(&mut self, row: usize, value: u8) {
        if !self.open {
            return;
        }
        let row = row.min(minute_rows(self.config.minute_interval).len() - 1);
        self.minute_wheel.jump_to(row, true);
        self.selected = ClockTime::new(self.selected.hour, value);
    }

    /// The wheel capability reported that user scrolling stopped at a pixel
    /// offset. Ignored while a programmatic jump is in flight, and for
    /// offsets that land outside the row data.
    pub fn scroll_settled(&mut self, offset_px: f32, kind: WheelKind) {
        if !self.open {
            return;
        }
        if self.suppressed {
            debug!("settle at {offset_px}px ignored: programmatic jump in flight");
            return;
        }
        let row_height = match kind {
            WheelKind::Hour => self.hour_wheel.row_height(),
            WheelKind::Minute => self.minute_wheel.row_height(),
        };
        let Some(row) = offset_to_row(offset_px, row_height) else {
            return;
        };
        match kind {
            WheelKind::Hour => {
                let rows = hour_rows(self.is_12_hour_mode);
                if let Some(&value) = rows.get(row) {
                    let canonical = display_to_canonical_hour(
                        value,
                        self.is_12_hour_mode,
                        self.selected.hour >= 12,
                    );
                    if canonical != self.selected.hour {
                        self.selected = ClockTime::new(canonical, self.selected.minute);
                    }
                }
            }
            WheelKind::Minute => {
                let rows = minute_rows(self.config.minute_interval);
                if let Some(&value) = rows.get(row) {
                    if value != self.selected.minute {
                        self.selected = ClockTime::new(self.selected.hour, value);
                    }
                }
            }
        }
    }

    /// One-tap preset selection: both wheels animate, selection updates
    /// atomically
    pub fn tap_preset(&mut self, time: ClockTime) -> Option<u64> {
        if !self.open {
            return None;
        }
        Some(self.scroll_to_time(time.hour, time.minute, true))
    }

    /// Flip the selected hour across noon. The hour row index is identical
    /// for both halves in 12-hour mode, so no wheel movement is needed.
    pub fn toggle_am_pm(&mut self) {
        if !self.open {
            return;
        }
        let hour = if self.selected.hour >= 12 {
            self.selected.hour - 12
        } else {
            self.selected.hour + 12
        };
        self.selected = ClockTime::new(hour, self.selected.minute);
    }

    /// Switch display mode. The canonical selection is untouched; the hour
    /// wheel is re-synced without animation to the row matching it under
    /// the new mapping.
    pub fn set_mode(&mut self, use_12_hour: bool) -> Option<u64> {
        if !self.open || self.is_12_hour_mode == use_12_hour {
            return None;
        }
        self.is_12_hour_mode = use_12_hour;
        let t = self.selected;
        Some(self.scroll_to_time(t.hour, t.minute, false))
    }

    pub fn toggle_mode(&mut self) -> Option<u64> {
        let target = !self.is_12_hour_mode;
        self.set_mode(target)
    }

    // === derived values (pure functions of state + constraints) ===

    fn constraints(&self) -> Constraints<'_> {
        Constraints {
            bounds: ResolvedBounds {
                min: self.internal_min,
                max: self.internal_max,
            },
            disabled_hours: &self.config.disabled_hours,
            minute_interval: self.config.minute_interval,
            should_disable: self.should_disable.as_deref(),
        }
    }

    /// The four ANDed validity checks against the current selection
    pub fn is_selection_valid(&self) -> bool {
        self.constraints()
            .check_validity(self.selected.hour, self.selected.minute)
    }

    /// Feasibility of an hour row given its display value
    pub fn hour_row_status(&self, display_value: u8) -> RowStatus {
        let canonical = display_to_canonical_hour(
            display_value,
            self.is_12_hour_mode,
            self.selected.hour >= 12,
        );
        self.constraints().hour_status(canonical)
    }

    /// Feasibility of a minute row against the currently selected hour
    pub fn minute_row_status(&self, minute: u8) -> RowStatus {
        self.constraints().minute_status(self.selected.hour, minute)
    }

    pub fn generated_presets(&self) -> Vec<ClockTime> {
        presets::generate_presets(
            &self.config.presets,
            &ResolvedBounds {
                min: self.internal_min,
                max: self.internal_max,
            },
            self.config.preset_step,
        )
    }

    pub fn valid_presets(&self) -> Vec<ClockTime> {
        presets::valid_presets(&self.generated_presets(), &self.constraints())
    }

    pub fn preset_columns(&self) -> Vec<Vec<ClockTime>> {
        presets::preset_columns(&self.valid_presets())
    }

    /// Confirmed time as a zero-padded HH:MM string; None (a no-op for the
    /// caller's callback) while the selection is invalid or the picker is
    /// closed
    pub fn confirm(&self) -> Option<String> {
        if self.open && self.is_selection_valid() {
            Some(self.selected.to_string())
        } else {
            None
        }
    }

    /// Human-readable description of the active window, formatted under
    /// the current display mode
    pub fn range_feedback(&self) -> Option<String> {
        let fmt = |t: ClockTime| t.format_display(self.is_12_hour_mode);
        match (self.internal_min, self.internal_max) {
            (None, None) => None,
            (Some(min), Some(max)) => Some(format!(
                "You can select a time between {} and {}",
                fmt(min),
                fmt(max)
            )),
            (Some(min), None) => {
                Some(format!("You can select a time from {} onwards", fmt(min)))
            }
            (None, Some(max)) => Some(format!("You can select a time up to {}", fmt(max))),
        }
    }

    // === accessors ===

    pub fn selected(&self) -> ClockTime {
        self.selected
    }

    pub fn is_12_hour_mode(&self) -> bool {
        self.is_12_hour_mode
    }

    pub fn resolved_bounds(&self) -> ResolvedBounds {
        ResolvedBounds {
            min: self.internal_min,
            max: self.internal_max,
        }
    }

    /// Row values the hour wheel should render under the current mode
    pub fn hour_rows_data(&self) -> Vec<u8> {
        hour_rows(self.is_12_hour_mode)
    }

    /// Row values the minute wheel should render
    pub fn minute_rows_data(&self) -> Vec<u8> {
        minute_rows(self.config.minute_interval)
    }
}
