//! Mission control
//!
//! Wires the simulation loop to the dashboard and exposes the user-facing
//! controls: run/pause, speed, radar range, AI mode, navigation and reset.
//! Each host timer maps to one method here.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::dashboard::Dashboard;
use crate::notification::{Notification, NotificationSink};
use crate::render::RenderSurface;
use crate::sim::constants::time::CLASSIFY_INTERVAL_MS;
use crate::sim::controls::{AiMode, ControlInput, Direction};
use crate::sim::systems::proximity::ProximityReport;
use crate::sim::{LoopSettings, SimulationLoop, StepOutcome};

/// Base period of the mock telemetry refresh at 1x speed
pub const TELEMETRY_REFRESH_MS: u64 = 3_000;
/// Fuel drain period
pub const FUEL_TICK_MS: u64 = 1_000;
/// Shortest period handed to a host timer
pub const MIN_TIMER_PERIOD: Duration = Duration::from_millis(1);

pub struct Mission {
    sim: SimulationLoop,
    dashboard: Dashboard,
    /// Drives the mock telemetry; separate from the simulation's own RNG
    rng: StdRng,
}

impl Mission {
    pub fn new(sim: SimulationLoop, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };
        let mut dashboard = Dashboard::new();
        dashboard.set_ai_mode(sim.settings().ai_mode);

        Self { sim, dashboard, rng }
    }

    pub fn sim(&self) -> &SimulationLoop {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut SimulationLoop {
        &mut self.sim
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    pub fn settings(&self) -> &LoopSettings {
        self.sim.settings()
    }

    pub fn is_running(&self) -> bool {
        self.sim.is_running()
    }

    /// Period of the classification timer
    pub fn classify_interval(&self) -> Duration {
        Duration::from_millis(CLASSIFY_INTERVAL_MS)
    }

    /// Period of the mock telemetry timer; shrinks as speed grows, never below 1 ms
    pub fn telemetry_interval(&self) -> Duration {
        let base = Duration::from_millis(TELEMETRY_REFRESH_MS);
        Duration::try_from_secs_f32(base.as_secs_f32() / self.settings().speed)
            .unwrap_or(base)
            .max(MIN_TIMER_PERIOD)
    }

    // === Timer callbacks ===

    pub fn frame(
        &mut self,
        now: Duration,
        surface: Option<&mut dyn RenderSurface>,
        notifications: &mut dyn NotificationSink,
    ) -> Option<StepOutcome> {
        self.sim.frame(now, surface, notifications)
    }

    pub fn classify(
        &mut self,
        now: Duration,
        notifications: &mut dyn NotificationSink,
    ) -> Option<ProximityReport> {
        self.sim.classify(now, &mut self.dashboard, notifications)
    }

    pub fn fuel_tick(&mut self) {
        if self.is_running() {
            self.dashboard.fuel_tick(self.settings().speed);
        }
    }

    pub fn refresh_telemetry(&mut self, notifications: &mut dyn NotificationSink) {
        if !self.is_running() {
            return;
        }
        let controls = self.settings().controls;
        if let Some(notification) = self.dashboard.randomize(&mut self.rng, &controls) {
            notifications.notify(notification);
        }
    }

    // === User controls ===

    pub fn toggle_running(&mut self, notifications: &mut dyn NotificationSink) {
        let running = !self.is_running();
        self.sim.set_running(running);
        let title = if running {
            "Simulation Resumed"
        } else {
            "Simulation Paused"
        };
        info!("{}", title);
        notifications.notify(Notification::info(title));
    }

    pub fn set_speed(&mut self, speed: f32, notifications: &mut dyn NotificationSink) {
        self.sim.set_speed(speed);
        let applied = self.settings().speed;
        notifications.notify(Notification::info(format!("Simulation Speed: {}x", applied)));
    }

    pub fn set_radar_range(&mut self, range: f32) {
        self.sim.set_radar_range(range);
    }

    pub fn set_ai_mode(&mut self, mode: AiMode, notifications: &mut dyn NotificationSink) {
        self.sim.set_ai_mode(mode);
        self.dashboard.set_ai_mode(mode);
        info!("AI mode set to {}", mode);
        notifications.notify(Notification::info(format!("AI Mode: {}", mode.display_name())));
    }

    pub fn press(&mut self, direction: Direction) {
        self.sim.controls_mut().set(direction, true);
        self.dashboard.navigation_pressed();
    }

    pub fn release(&mut self, direction: Direction) {
        self.sim.controls_mut().set(direction, false);
    }

    /// Back to initial conditions. The debris field is kept.
    pub fn reset(&mut self, notifications: &mut dyn NotificationSink) {
        self.sim.reset();
        self.sim.set_speed(1.0);
        self.sim.set_running(true);
        self.sim.set_ai_mode(AiMode::Off);
        self.sim.set_controls(ControlInput::default());
        self.dashboard.reset();

        info!("Simulation reset");
        notifications.notify(Notification::info("Simulation Reset"));
    }
}
