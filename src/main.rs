mod bounds;
mod cli;
mod clock;
mod config;
mod constraints;
mod mapping;
mod picker;
mod presets;
mod scheduler;
mod time;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use clock::SystemClock;
use config::Config;
use mapping::WheelKind;
use picker::{PickerEngine, WheelColumn};
use scheduler::{schedule_disarm, spawn_bounds_refresh, SharedPicker};
use time::ClockTime;

const ROW_HEIGHT: f32 = 56.0;

/// Demo wheel adapter: logs the jumps a real scrollable list would perform
struct LogWheel {
    label: &'static str,
}

impl WheelColumn for LogWheel {
    fn jump_to(&mut self, row: usize, animated: bool) {
        info!(
            "[{} wheel] jump to row {} (animated: {})",
            self.label, row, animated
        );
    }

    fn row_height(&self) -> f32 {
        ROW_HEIGHT
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse_args();

    if args.help {
        cli::print_help();
        return Ok(());
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("timewheel=info".parse()?),
        )
        .init();

    info!("TimeWheel picker engine v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded");
    info!("  Minute interval: {}", config.minute_interval);
    info!(
        "  Display mode: {}",
        if config.use_12_hour { "12h" } else { "24h" }
    );
    info!("  Window: {:?} .. {:?}", config.min_time, config.max_time);
    if !config.disabled_hours.is_empty() {
        info!("  Disabled hours: {:?}", config.disabled_hours);
    }

    // Handle --validate mode
    if args.validate {
        info!("Validating configuration...");
        match config.validate() {
            Ok(()) => {
                info!("Configuration is valid");
                return Ok(());
            }
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        }
    }

    let show_presets = config.show_presets;
    let picker: SharedPicker = Arc::new(tokio::sync::Mutex::new(PickerEngine::new(
        config,
        Arc::new(SystemClock),
        Box::new(LogWheel { label: "hour" }),
        Box::new(LogWheel { label: "minute" }),
    )));

    // Open the picker: initial sync jump plus, for relative bounds, the
    // refresh task. The token cancels it the moment the picker closes.
    let refresh_cancel = CancellationToken::new();
    {
        let mut engine = picker.lock().await;
        let generation = engine.open();
        schedule_disarm(picker.clone(), generation);
        if engine.has_dynamic_bounds() {
            spawn_bounds_refresh(picker.clone(), refresh_cancel.clone());
            info!(
                "Relative bounds detected; refreshing every {:?}",
                scheduler::REFRESH_INTERVAL
            );
        }
    }

    if args.once {
        info!("Running scripted demonstration (--once mode)");
        run_demo_script(&picker, show_presets).await;
        refresh_cancel.cancel();
        picker.lock().await.close();
        return Ok(());
    }

    println!("Commands:");
    println!("  hour <value>              tap an hour row");
    println!("  minute <value>            tap a minute row");
    println!("  scroll <hour|minute> <px> deliver a settle event at a pixel offset");
    println!("  preset <HH:MM>            tap a preset");
    println!("  ampm | mode | status | confirm | close");
    print_status(&picker, show_presets).await;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    while let Some(line) = lines.next_line().await? {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            ["hour", value] => match value.parse::<u8>() {
                Ok(value) => {
                    let mut engine = picker.lock().await;
                    let rows = engine.hour_rows_data();
                    match rows.iter().position(|&v| v == value) {
                        Some(row) => engine.tap_hour_row(row, value),
                        None => warn!("{} is not on the hour wheel", value),
                    }
                }
                Err(_) => warn!("usage: hour <value>"),
            },
            ["minute", value] => match value.parse::<u8>() {
                Ok(value) => {
                    let mut engine = picker.lock().await;
                    let rows = engine.minute_rows_data();
                    match rows.iter().position(|&v| v == value) {
                        Some(row) => engine.tap_minute_row(row, value),
                        None => warn!("{} is not on the minute wheel", value),
                    }
                }
                Err(_) => warn!("usage: minute <value>"),
            },
            ["scroll", axis, px] => {
                let kind = match *axis {
                    "hour" => Some(WheelKind::Hour),
                    "minute" => Some(WheelKind::Minute),
                    _ => None,
                };
                match (kind, px.parse::<f32>()) {
                    (Some(kind), Ok(offset)) => {
                        picker.lock().await.scroll_settled(offset, kind);
                    }
                    _ => warn!("usage: scroll <hour|minute> <px>"),
                }
            }
            ["preset", raw] => {
                let time = ClockTime::parse_lenient(raw);
                if let Some(generation) = picker.lock().await.tap_preset(time) {
                    schedule_disarm(picker.clone(), generation);
                }
            }
            ["ampm"] => picker.lock().await.toggle_am_pm(),
            ["mode"] => {
                if let Some(generation) = picker.lock().await.toggle_mode() {
                    schedule_disarm(picker.clone(), generation);
                }
            }
            ["status"] => {}
            ["confirm"] => match picker.lock().await.confirm() {
                Some(time) => info!("Confirmed: {}", time),
                None => warn!("Selection invalid; confirm is a no-op"),
            },
            ["close"] | ["quit"] | ["exit"] => break,
            [] => continue,
            _ => {
                warn!("Unrecognized command: {}", line);
                continue;
            }
        }
        print_status(&picker, show_presets).await;
    }

    // Closing must stop the refresh task synchronously
    refresh_cancel.cancel();
    picker.lock().await.close();

    Ok(())
}

async fn print_status(picker: &SharedPicker, show_presets: bool) {
    let engine = picker.lock().await;
    let is_12h = engine.is_12_hour_mode();
    println!(
        "Selected: {} [{}]",
        engine.selected().format_display(is_12h),
        if engine.is_selection_valid() {
            "valid"
        } else {
            "invalid"
        }
    );
    if let Some(feedback) = engine.range_feedback() {
        println!("{}", feedback);
    }
    if show_presets {
        let presets = engine.valid_presets();
        if !presets.is_empty() {
            let labels: Vec<String> = presets
                .iter()
                .map(|t| t.format_display(is_12h))
                .collect();
            println!("Presets: {}", labels.join("  "));
        }
    }
}

/// Scripted walkthrough for --once: exercises presets, AM/PM, mode
/// switching, and the confirm gate, then exits
async fn run_demo_script(picker: &SharedPicker, show_presets: bool) {
    print_status(picker, show_presets).await;

    let preset = picker.lock().await.valid_presets().first().copied();
    if let Some(preset) = preset {
        info!("Tapping preset {}", preset);
        let generation = picker.lock().await.tap_preset(preset);
        if let Some(generation) = generation {
            // Short grace in the scripted run so the settle window closes
            // before the next step
            scheduler::disarm_after(picker.clone(), generation, Duration::from_millis(50)).await;
        }
    }

    {
        let mut engine = picker.lock().await;
        engine.toggle_am_pm();
        info!("After AM/PM toggle: {}", engine.selected());
        engine.toggle_am_pm();
    }

    if let Some(generation) = picker.lock().await.toggle_mode() {
        schedule_disarm(picker.clone(), generation);
    }

    print_status(picker, show_presets).await;

    match picker.lock().await.confirm() {
        Some(time) => info!("Confirmed: {}", time),
        None => warn!("Selection invalid; confirm is a no-op"),
    }
}
