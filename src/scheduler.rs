/// Timer plumbing around the engine: the periodic bounds-refresh task
/// (active only while the picker is open with a relative bound) and the
/// per-jump suppression disarm task

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::picker::PickerEngine;

/// Cadence for re-resolving relative bounds while the picker is open
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Dead-time window before a programmatic jump's settle suppression is
/// cleared. Sized to outlast the wheel capability's jump animation; the
/// flag must not be cleared synchronously because some capabilities emit
/// intermediate settle events mid-jump.
pub const SETTLE_GRACE: Duration = Duration::from_millis(550);

/// The engine shared between the event source and the timer tasks
pub type SharedPicker = Arc<tokio::sync::Mutex<PickerEngine>>;

/// Re-resolve bounds every `period` until cancelled. Cancellation is the
/// close path: the token is cancelled synchronously when the picker
/// closes, so a tick can never observe torn-down state.
pub async fn run_bounds_refresh(picker: SharedPicker, cancel: CancellationToken, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; consume it so the cadence
    // starts one full period after open
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("bounds refresh task cancelled");
                return;
            }
            _ = ticker.tick() => {
                let mut engine = picker.lock().await;
                if !engine.is_open() {
                    continue;
                }
                engine.refresh_bounds();
            }
        }
    }
}

/// Spawn the refresh task at the production cadence
pub fn spawn_bounds_refresh(picker: SharedPicker, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(run_bounds_refresh(picker, cancel, REFRESH_INTERVAL))
}

/// Clear settle suppression for `generation` after the grace window. A
/// newer jump bumps the engine's generation, which turns this task into a
/// stale no-op: superseding needs no explicit cancellation.
pub async fn disarm_after(picker: SharedPicker, generation: u64, grace: Duration) {
    tokio::time::sleep(grace).await;
    picker.lock().await.disarm_suppression(generation);
}

/// Spawn the disarm task for a jump that was just issued
pub fn schedule_disarm(picker: SharedPicker, generation: u64) -> JoinHandle<()> {
    tokio::spawn(disarm_after(picker, generation, SETTLE_GRACE))
}
