//! Headless driver
//!
//! Stands in for the host UI: an animation-frame ticker plus the independent
//! classification, fuel and telemetry timers, all on one task so the mission
//! is only ever touched from one place.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::SimConfig;
use crate::dashboard::Dashboard;
use crate::metrics::Metrics;
use crate::mission::{Mission, FUEL_TICK_MS, MIN_TIMER_PERIOD};
use crate::notification::{LogSink, Notification, NotificationSink};
use crate::render::RecordingSurface;
use crate::sim::state::{SimulationState, Spacecraft};
use crate::sim::systems::proximity::ProximityReport;
use crate::sim::{LoopSettings, SimulationLoop};
use crate::util::vec2::Vec2;

/// Log a status line this often
const STATUS_INTERVAL: Duration = Duration::from_secs(10);

/// Logs notifications and counts them in the metrics registry
struct MeteredSink<'a> {
    inner: LogSink,
    metrics: &'a Metrics,
}

impl NotificationSink for MeteredSink<'_> {
    fn notify(&mut self, notification: Notification) {
        self.metrics.record_notifications(1);
        self.inner.notify(notification);
    }
}

/// One JSON line written per classification pass
#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    elapsed_ms: u128,
    report: &'a ProximityReport,
    spacecraft: &'a Spacecraft,
    dashboard: &'a Dashboard,
}

/// Final state of a headless run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub elapsed: Duration,
    pub frames: u64,
    pub classifications: u64,
    pub notifications: u64,
    pub last_report: Option<ProximityReport>,
    pub dashboard: Dashboard,
}

/// Build a mission from configuration, spacecraft at viewport center
pub fn build_mission(config: &SimConfig) -> Mission {
    let center = Vec2::new(config.viewport_width / 2.0, config.viewport_height / 2.0);
    let state = SimulationState::new(center, config.debris_count, config.seed);
    let settings = LoopSettings {
        speed: config.sim_speed,
        radar_range: config.radar_range,
        ai_mode: config.ai_mode,
        ..LoopSettings::default()
    };
    Mission::new(SimulationLoop::new(state, settings), config.seed)
}

fn ticker(period: Duration) -> Interval {
    let period = period.max(MIN_TIMER_PERIOD);
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

/// Drive `mission` until `run_for` elapses or `shutdown` resolves
pub async fn run<F>(
    mut mission: Mission,
    config: &SimConfig,
    metrics: Arc<Metrics>,
    shutdown: F,
) -> RunSummary
where
    F: Future<Output = ()>,
{
    let mut surface = RecordingSurface::new(config.viewport_width, config.viewport_height);
    let mut sink = MeteredSink {
        inner: LogSink::default(),
        metrics: &metrics,
    };

    let epoch = Instant::now();
    let mut frame_ticker = ticker(config.frame_interval());
    let mut classify_ticker = ticker(mission.classify_interval());
    let mut fuel_ticker = ticker(Duration::from_millis(FUEL_TICK_MS));
    let mut telemetry_period = mission.telemetry_interval();
    let mut telemetry_ticker = ticker(telemetry_period);
    let mut status_ticker = ticker(STATUS_INTERVAL);

    let deadline = async {
        match config.run_for {
            Some(duration) => tokio::time::sleep(duration).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(deadline);
    tokio::pin!(shutdown);

    let mut last_report = None;

    info!(
        "Simulation started: {} debris, radar range {}, AI {}, {}x speed",
        mission.sim().state().debris_count(),
        mission.settings().radar_range,
        mission.settings().ai_mode,
        mission.settings().speed
    );

    loop {
        tokio::select! {
            _ = frame_ticker.tick() => {
                let started = std::time::Instant::now();
                let outcome = mission.frame(epoch.elapsed(), Some(&mut surface), &mut sink);
                metrics.record_frame_time(started.elapsed());

                if outcome.and_then(|o| o.collision).is_some() {
                    metrics.record_collision_frame();
                }
            }
            _ = classify_ticker.tick() => {
                let now = epoch.elapsed();
                if let Some(report) = mission.classify(now, &mut sink) {
                    metrics.record_classification(&report);
                    if config.json_snapshots {
                        let snapshot = Snapshot {
                            elapsed_ms: now.as_millis(),
                            report: &report,
                            spacecraft: &mission.sim().state().spacecraft,
                            dashboard: mission.dashboard(),
                        };
                        match serde_json::to_string(&snapshot) {
                            Ok(line) => println!("{}", line),
                            Err(e) => warn!("Failed to serialize snapshot: {}", e),
                        }
                    }
                    last_report = Some(report);
                }
            }
            _ = fuel_ticker.tick() => {
                mission.fuel_tick();
            }
            _ = telemetry_ticker.tick() => {
                mission.refresh_telemetry(&mut sink);

                // Speed changes reschedule the refresh
                let period = mission.telemetry_interval();
                if period != telemetry_period {
                    debug!("Telemetry refresh period now {:?}", period);
                    telemetry_period = period;
                    telemetry_ticker = ticker(period);
                }
            }
            _ = status_ticker.tick() => {
                let dashboard = mission.dashboard();
                let spacecraft = &mission.sim().state().spacecraft;
                info!(
                    "t={}s frames={} | craft ({:.0}, {:.0}) speed {:.3} | in range {} near {} risk {} | fuel {:.2}",
                    epoch.elapsed().as_secs(),
                    mission.sim().frames(),
                    spacecraft.position.x,
                    spacecraft.position.y,
                    spacecraft.speed(),
                    dashboard.debris.count,
                    dashboard.debris.nearby,
                    dashboard.debris.risk,
                    dashboard.telemetry.spacecraft.fuel
                );
            }
            _ = &mut deadline => {
                info!("Run duration reached");
                break;
            }
            _ = &mut shutdown => {
                info!("Shutdown requested");
                break;
            }
        }
    }

    let summary = RunSummary {
        elapsed: epoch.elapsed(),
        frames: mission.sim().frames(),
        classifications: metrics.classifications.load(std::sync::atomic::Ordering::Relaxed),
        notifications: sink.inner.delivered,
        last_report,
        dashboard: mission.dashboard().clone(),
    };

    debug!("Last frame recorded {} draw commands", surface.commands().len());
    summary
}
