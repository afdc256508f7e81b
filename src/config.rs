use anyhow::{bail, Result};
use std::collections::HashMap;
use std::env;

use crate::bounds::BoundSpec;
use crate::time::ClockTime;

#[derive(Debug, Clone)]
pub struct Config {
    /// Initial selection as HH:MM; absent means "now" at open time
    pub initial_time: Option<ClockTime>,

    /// Lower/upper bound, fixed clock string or relative descriptor
    pub min_time: Option<BoundSpec>,
    pub max_time: Option<BoundSpec>,

    /// Minute wheel granularity (need not divide 60)
    pub minute_interval: u8,

    /// Default display mode on open
    pub use_12_hour: bool,

    /// Hours (0-23) that can never be selected
    pub disabled_hours: Vec<u8>,

    /// Explicit preset list; empty means generate a ladder from the bounds
    pub presets: Vec<ClockTime>,

    /// Ladder step in minutes when generating presets
    pub preset_step: u16,

    /// Whether the preset strip is shown at all
    pub show_presets: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_time: None,
            min_time: None,
            max_time: None,
            minute_interval: 1,
            use_12_hour: true,
            disabled_hours: Vec::new(),
            presets: Vec::new(),
            preset_step: 30,
            show_presets: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env if present, ignore if missing
        Self::from_getter(|key| env::var(key).ok())
    }

    /// Parse config from a custom getter function (for testing)
    pub fn from_getter<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            initial_time: get("INITIAL_TIME")
                .filter(|s| !s.trim().is_empty())
                .map(|s| ClockTime::parse_lenient(&s)),

            min_time: get("MIN_TIME")
                .filter(|s| !s.trim().is_empty())
                .map(|s| BoundSpec::parse(&s)),
            max_time: get("MAX_TIME")
                .filter(|s| !s.trim().is_empty())
                .map(|s| BoundSpec::parse(&s)),

            minute_interval: get("MINUTE_INTERVAL")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(1),

            use_12_hour: get("USE_12_HOUR")
                .and_then(|s| parse_bool(&s))
                .unwrap_or(true),

            disabled_hours: get("DISABLED_HOURS")
                .map(|s| parse_hour_list(&s))
                .unwrap_or_default(),

            presets: get("PRESETS")
                .map(|s| {
                    s.split(',')
                        .map(str::trim)
                        .filter(|p| !p.is_empty())
                        .map(ClockTime::parse_lenient)
                        .collect()
                })
                .unwrap_or_default(),

            preset_step: get("PRESET_STEP")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(30),

            show_presets: get("SHOW_PRESETS")
                .and_then(|s| parse_bool(&s))
                .unwrap_or(true),
        })
    }

    /// Create config from a HashMap (convenience for testing)
    #[cfg(test)]
    pub fn from_map(map: &HashMap<&str, &str>) -> Result<Self> {
        Self::from_getter(|key| map.get(key).map(|v| v.to_string()))
    }

    /// Validate configuration values at startup.
    /// Returns Ok(()) if all validations pass, or Err with details of what failed.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        if self.minute_interval == 0 {
            errors.push("MINUTE_INTERVAL must be at least 1.".to_string());
        } else if self.minute_interval > 60 {
            errors.push(format!(
                "MINUTE_INTERVAL={} exceeds a full hour (max 60).",
                self.minute_interval
            ));
        }

        if self.preset_step == 0 {
            errors.push("PRESET_STEP must be greater than 0.".to_string());
        } else if self.preset_step > 720 {
            errors.push(format!(
                "PRESET_STEP={} seems too large (max recommended: 720).",
                self.preset_step
            ));
        }

        for &hour in &self.disabled_hours {
            if hour > 23 {
                errors.push(format!(
                    "DISABLED_HOURS entry {} is not a valid hour (0-23).",
                    hour
                ));
            }
        }

        if self.disabled_hours.len() >= 24 {
            let all_disabled = (0..24u8).all(|h| self.disabled_hours.contains(&h));
            if all_disabled {
                errors.push("DISABLED_HOURS blocks every hour of the day.".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )
        }
    }

    /// True when either bound must be re-resolved on a cadence
    pub fn has_dynamic_bounds(&self) -> bool {
        self.min_time.as_ref().is_some_and(BoundSpec::is_relative)
            || self.max_time.as_ref().is_some_and(BoundSpec::is_relative)
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Comma-separated hour list; entries that fail to parse are dropped
/// (lenient, like the time strings), out-of-range entries are kept so
/// validate() can report them
fn parse_hour_list(s: &str) -> Vec<u8> {
    s.split(',')
        .filter_map(|part| part.trim().parse::<u8>().ok())
        .collect()
}
