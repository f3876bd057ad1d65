//! Periodic price perturbation.
//!
//! Two halves:
//! - [`advance`] is the pure per-tick mutation: one bounded random step per
//!   metric, returning a fresh collection.
//! - [`TickDriver`] owns a timer thread that only *signals* ticks over an
//!   `mpsc` channel. Whoever owns the board applies [`advance`] on its own
//!   thread, so ticks and user operations never interleave.

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Local};
use rand::Rng;
use tracing::{debug, trace, warn};

use crate::domain::{StockRecord, PRICE_FLOOR};

/// Largest per-tick bound any float step may take.
pub const MAX_STEP: f64 = 1e9;

/// Bounds of one tick's random walk. Each step is drawn uniformly from
/// `[-step, +step]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickParams {
    pub price_step: f64,
    pub change_step: f64,
    pub percent_step: f64,
    pub volume_step: u64,
    pub chart_jitter: f64,
}

impl Default for TickParams {
    fn default() -> Self {
        Self {
            price_step: 1.0,
            change_step: 0.25,
            percent_step: 0.1,
            volume_step: 500_000,
            chart_jitter: 2.5,
        }
    }
}

fn step<R: Rng>(rng: &mut R, bound: f64) -> f64 {
    if bound > 0.0 {
        let bound = bound.min(MAX_STEP);
        rng.gen_range(-bound..=bound)
    } else {
        0.0
    }
}

/// Apply one tick to every record.
///
/// Count, order, symbols and chart length are preserved. Price, chart samples
/// and volume are floored; change and percent change walk freely.
/// `one_day_change`, `avg_volume`, `market_cap` and `pe_ratio` are untouched.
pub fn advance<R: Rng>(records: &[StockRecord], params: &TickParams, rng: &mut R) -> Vec<StockRecord> {
    let volume_bound = i64::try_from(params.volume_step).unwrap_or(i64::MAX);
    records
        .iter()
        .map(|record| {
            let mut next = record.clone();
            next.price = (record.price + step(rng, params.price_step)).max(PRICE_FLOOR);
            next.change = record.change + step(rng, params.change_step);
            next.percent_change = record.percent_change + step(rng, params.percent_step);

            let volume_delta = if volume_bound > 0 {
                rng.gen_range(-volume_bound..=volume_bound)
            } else {
                0
            };
            let volume = i64::try_from(record.volume).unwrap_or(i64::MAX);
            next.volume = u64::try_from(volume.saturating_add(volume_delta).max(0)).unwrap_or(0);

            if !next.chart_data.is_empty() {
                let sample = (next.price + step(rng, params.chart_jitter)).max(PRICE_FLOOR);
                next.chart_data.remove(0);
                next.chart_data.push(sample);
            }
            next
        })
        .collect()
}

/// One timer firing.
#[derive(Debug, Clone, PartialEq)]
pub struct TickEvent {
    /// 1-based, counted per driver.
    pub seq: u64,
    pub at: DateTime<Local>,
}

/// Owned handle to the tick timer thread.
///
/// Dropping the handle stops the thread. Once [`TickDriver::stop`] returns
/// the thread has exited and its event sender is dropped, so the receiving
/// side sees a disconnect after draining what was already sent.
#[derive(Debug)]
pub struct TickDriver {
    interval: Duration,
    shutdown: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TickDriver {
    pub fn spawn(interval: Duration, events: Sender<TickEvent>) -> io::Result<Self> {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("tickerboard-ticker".into())
            .spawn(move || {
                let mut seq = 0u64;
                loop {
                    match shutdown_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            seq += 1;
                            let event = TickEvent {
                                seq,
                                at: Local::now(),
                            };
                            if events.send(event).is_err() {
                                debug!("tick receiver dropped, timer exiting");
                                break;
                            }
                            trace!(seq, "tick sent");
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;
        debug!(interval_ms = interval.as_millis() as u64, "tick driver started");
        Ok(Self {
            interval,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Signal the thread and wait for it to exit. Idempotent.
    pub fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            // The thread may already be gone if the receiver was dropped.
            let _ = shutdown.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("tick thread panicked");
            } else {
                debug!("tick driver stopped");
            }
        }
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.stop();
    }
}
