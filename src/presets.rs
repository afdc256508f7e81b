/// Quick-pick preset derivation: an explicit caller list used verbatim,
/// or a ladder generated across the resolved bounds

use crate::bounds::ResolvedBounds;
use crate::constraints::Constraints;
use crate::time::ClockTime;

/// Presets are laid out in fixed-size columns of this many rows
const PRESET_COLUMN_ROWS: usize = 2;

/// Generate the preset list. A non-empty explicit list wins verbatim and
/// unfiltered; otherwise a ladder runs from min to max in `preset_step`
/// minute increments, inclusive of any endpoint it lands on exactly and
/// never emitting a value past max. Missing either bound means no ladder.
pub fn generate_presets(
    explicit: &[ClockTime],
    bounds: &ResolvedBounds,
    preset_step: u16,
) -> Vec<ClockTime> {
    if !explicit.is_empty() {
        return explicit.to_vec();
    }
    let (Some(min), Some(max)) = (bounds.min, bounds.max) else {
        return Vec::new();
    };

    let step = preset_step.max(1) as u32;
    let max_total = max.minutes_from_midnight();
    let mut current = min.minutes_from_midnight();
    let mut slots = Vec::new();
    while current <= max_total {
        slots.push(ClockTime::from_total_minutes(current));
        current += step;
    }
    slots
}

/// Drop presets the four validity checks reject, preserving order
pub fn valid_presets(presets: &[ClockTime], constraints: &Constraints<'_>) -> Vec<ClockTime> {
    presets
        .iter()
        .copied()
        .filter(|t| constraints.is_valid_time(*t))
        .collect()
}

/// Partition presets into 2-row columns for horizontal layout
pub fn preset_columns(presets: &[ClockTime]) -> Vec<Vec<ClockTime>> {
    presets
        .chunks(PRESET_COLUMN_ROWS)
        .map(|chunk| chunk.to_vec())
        .collect()
}
