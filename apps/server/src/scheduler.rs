//! Background scheduler for the periodic collection sweep.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;
use tracing::info;

use crate::main_lib::AppState;

/// Starts the background sweep scheduler.
///
/// The first sweep runs immediately; later ticks fire every
/// `sweep_interval`. Each sweep runs in its own task so a slow pass never
/// delays the next tick; overlapping sweeps are tolerated because state is
/// per-location, and the shared breaker state is safe under concurrency.
pub fn start_sweep_scheduler(state: Arc<AppState>, sweep_interval: Duration) {
    tokio::spawn(async move {
        info!(
            "Weather sweep scheduler started ({}s interval)",
            sweep_interval.as_secs()
        );

        let mut tick = interval(sweep_interval);
        loop {
            tick.tick().await;
            let service = state.weather_service.clone();
            tokio::spawn(async move {
                service.run_sweep().await;
            });
        }
    });
}
