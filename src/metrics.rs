//! Runtime metrics
//!
//! Frame timing percentiles and simulation counters, exportable in
//! Prometheus text format.

use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::sim::systems::proximity::{ProximityReport, RiskLevel};

/// Rolling window size for frame time percentiles
const FRAME_HISTORY: usize = 1000;

#[derive(Debug)]
pub struct Metrics {
    // Counters
    pub frames: AtomicU64,
    pub classifications: AtomicU64,
    pub notifications: AtomicU64,
    pub collision_frames: AtomicU64,

    // Gauges from the last classification pass
    pub debris_in_range: AtomicU64,
    pub near_count: AtomicU64,
    /// 0=Low, 1=Medium, 2=High
    pub risk_level: AtomicU64,

    // Frame timing (microseconds)
    pub frame_time_us: AtomicU64,
    pub frame_time_p95_us: AtomicU64,
    pub frame_time_p99_us: AtomicU64,
    pub frame_time_max_us: AtomicU64,

    start_time: Instant,
    frame_history: RwLock<VecDeque<u64>>,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            frames: AtomicU64::new(0),
            classifications: AtomicU64::new(0),
            notifications: AtomicU64::new(0),
            collision_frames: AtomicU64::new(0),
            debris_in_range: AtomicU64::new(0),
            near_count: AtomicU64::new(0),
            risk_level: AtomicU64::new(0),
            frame_time_us: AtomicU64::new(0),
            frame_time_p95_us: AtomicU64::new(0),
            frame_time_p99_us: AtomicU64::new(0),
            frame_time_max_us: AtomicU64::new(0),
            start_time: Instant::now(),
            frame_history: RwLock::new(VecDeque::with_capacity(FRAME_HISTORY)),
        }
    }

    /// Record how long a frame (advance + render) took and update percentiles
    pub fn record_frame_time(&self, duration: Duration) {
        let us = duration.as_micros() as u64;
        self.frame_time_us.store(us, Ordering::Relaxed);
        self.frames.fetch_add(1, Ordering::Relaxed);

        let mut history = self.frame_history.write();
        history.push_back(us);
        while history.len() > FRAME_HISTORY {
            history.pop_front();
        }

        if history.len() >= 10 {
            let mut sorted: Vec<u64> = history.iter().copied().collect();
            sorted.sort_unstable();

            let p95_idx = (sorted.len() as f32 * 0.95) as usize;
            let p99_idx = (sorted.len() as f32 * 0.99) as usize;

            self.frame_time_p95_us.store(sorted[p95_idx.min(sorted.len() - 1)], Ordering::Relaxed);
            self.frame_time_p99_us.store(sorted[p99_idx.min(sorted.len() - 1)], Ordering::Relaxed);
            self.frame_time_max_us.store(sorted.last().copied().unwrap_or(0), Ordering::Relaxed);
        }
    }

    pub fn record_collision_frame(&self) {
        self.collision_frames.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_notifications(&self, count: usize) {
        self.notifications.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_classification(&self, report: &ProximityReport) {
        self.classifications.fetch_add(1, Ordering::Relaxed);
        self.debris_in_range.store(report.in_range as u64, Ordering::Relaxed);
        self.near_count.store(report.near_count() as u64, Ordering::Relaxed);
        let risk = match report.risk {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High => 2,
        };
        self.risk_level.store(risk, Ordering::Relaxed);
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Generate Prometheus-format metrics output
    pub fn to_prometheus(&self) -> String {
        let mut output = String::with_capacity(2048);

        macro_rules! metric {
            ($name:expr, $help:expr, $type:expr, $value:expr) => {
                output.push_str(&format!(
                    "# HELP {} {}\n# TYPE {} {}\n{} {}\n",
                    $name, $help, $name, $type, $name, $value
                ));
            };
        }

        metric!("debris_defense_frames_total", "Animation frames processed", "counter",
            self.frames.load(Ordering::Relaxed));
        metric!("debris_defense_classifications_total", "Proximity classification passes", "counter",
            self.classifications.load(Ordering::Relaxed));
        metric!("debris_defense_notifications_total", "Notifications delivered", "counter",
            self.notifications.load(Ordering::Relaxed));
        metric!("debris_defense_collision_frames_total", "Frames with debris inside collision range", "counter",
            self.collision_frames.load(Ordering::Relaxed));

        metric!("debris_defense_debris_in_range", "Debris inside radar range", "gauge",
            self.debris_in_range.load(Ordering::Relaxed));
        metric!("debris_defense_debris_near", "Debris inside critical or warning range", "gauge",
            self.near_count.load(Ordering::Relaxed));
        metric!("debris_defense_risk_level", "Collision risk (0=Low, 1=Medium, 2=High)", "gauge",
            self.risk_level.load(Ordering::Relaxed));

        metric!("debris_defense_frame_time_us", "Last frame time in microseconds", "gauge",
            self.frame_time_us.load(Ordering::Relaxed));
        metric!("debris_defense_frame_time_p95_us", "95th percentile frame time", "gauge",
            self.frame_time_p95_us.load(Ordering::Relaxed));
        metric!("debris_defense_frame_time_p99_us", "99th percentile frame time", "gauge",
            self.frame_time_p99_us.load(Ordering::Relaxed));
        metric!("debris_defense_frame_time_max_us", "Maximum frame time in window", "gauge",
            self.frame_time_max_us.load(Ordering::Relaxed));

        metric!("debris_defense_uptime_seconds", "Simulator uptime", "counter",
            self.uptime_seconds());

        output
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
