mod engine;

#[cfg(test)]
mod model;

pub use engine::{PickerEngine, WheelColumn};
