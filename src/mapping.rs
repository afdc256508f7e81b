/// Pure row-index mapping between wheel positions and canonical time
/// components, parameterized by display mode and minute interval

use crate::time::round_to_interval;

/// Which wheel a row index or settle offset belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelKind {
    Hour,
    Minute,
}

/// Row values for the hour wheel: 1-12 ascending in 12-hour mode,
/// 0-23 in 24-hour mode
pub fn hour_rows(is_12h: bool) -> Vec<u8> {
    if is_12h {
        (1..=12).collect()
    } else {
        (0..24).collect()
    }
}

/// Row values for the minute wheel: multiples of the interval below 60
pub fn minute_rows(minute_interval: u8) -> Vec<u8> {
    let interval = minute_interval.max(1);
    (0..60).step_by(interval as usize).collect()
}

/// Zero-based row index for a canonical hour under the given mode
pub fn hour_to_row(hour: u8, is_12h: bool) -> usize {
    if is_12h {
        let h12 = hour % 12;
        let h12 = if h12 == 0 { 12 } else { h12 };
        (h12 - 1) as usize
    } else {
        hour as usize
    }
}

/// Translate an hour-row display value back to the canonical hour. In
/// 12-hour mode the current AM/PM half disambiguates: a row value of 12
/// maps to 0 (AM) or 12 (PM), anything else to value or value+12.
pub fn display_to_canonical_hour(value: u8, is_12h: bool, currently_pm: bool) -> u8 {
    if !is_12h {
        return value.min(23);
    }
    if value == 12 {
        if currently_pm {
            12
        } else {
            0
        }
    } else if currently_pm {
        (value + 12).min(23)
    } else {
        value.min(23)
    }
}

/// Row index for a canonical minute: snap to the interval grid, divide,
/// and clamp into the wheel's row count
pub fn minute_to_row(minute: u8, minute_interval: u8) -> usize {
    let interval = minute_interval.max(1);
    let rounded = round_to_interval(minute, interval);
    let row = (rounded / interval) as usize;
    let row_count = minute_rows(interval).len();
    row.min(row_count.saturating_sub(1))
}

/// Convert a settle offset in pixels to a row index by nearest-row
/// rounding. Negative offsets (overscroll) yield None.
pub fn offset_to_row(offset_px: f32, row_height: f32) -> Option<usize> {
    if row_height <= 0.0 || !offset_px.is_finite() {
        return None;
    }
    let row = (offset_px / row_height).round();
    if row < 0.0 {
        return None;
    }
    Some(row as usize)
}
