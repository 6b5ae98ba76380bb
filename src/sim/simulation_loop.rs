//! The simulation loop
//!
//! Owns the spacecraft, debris field, view transform and alert gates. The host
//! drives it with two independent callbacks:
//! - [`SimulationLoop::frame`] once per animation frame (advance + render)
//! - [`SimulationLoop::classify`] on a fixed interval (telemetry + proximity alerts)
//!
//! All timestamps are offsets from the host's epoch, so the loop never reads
//! a clock itself.

use std::time::Duration;

use tracing::{debug, trace};

use crate::notification::{Notification, NotificationKind, NotificationSink};
use crate::render::{render_frame, Frame, RenderSurface};
use crate::sim::alerts::{AlertBoard, AlertKind};
use crate::sim::constants::radar::{DEFAULT_RANGE, MAX_RANGE, MIN_RANGE};
use crate::sim::constants::time::{MAX_SPEED, MIN_SPEED, MS_TO_DELTA};
use crate::sim::controls::{AiMode, ControlInput};
use crate::sim::state::SimulationState;
use crate::sim::systems::proximity::{self, ProximityReport, RadarBands, RiskLevel};
use crate::sim::systems::{ai, debris, physics};
use crate::sim::view::ViewState;

/// Receives derived telemetry on every classification pass
pub trait TelemetrySink {
    fn debris_in_range(&mut self, count: usize);
    fn collision_risk(&mut self, risk: RiskLevel, near_count: usize);
}

/// Host-supplied settings, re-read on every tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopSettings {
    pub running: bool,
    /// Positive time multiplier
    pub speed: f32,
    /// Radar range setting in [5, 30]; scene radius is ten times this
    pub radar_range: f32,
    pub ai_mode: AiMode,
    pub controls: ControlInput,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            running: true,
            speed: 1.0,
            radar_range: DEFAULT_RANGE,
            ai_mode: AiMode::Off,
            controls: ControlInput::default(),
        }
    }
}

/// What one advance step did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepOutcome {
    pub delta: f32,
    /// Particle the AI steered relative to
    pub ai_target: Option<usize>,
    pub perturbed: bool,
    /// First particle within collision range and its distance
    pub collision: Option<(usize, f32)>,
}

pub struct SimulationLoop {
    state: SimulationState,
    view: ViewState,
    settings: LoopSettings,
    alerts: AlertBoard,
    /// Timestamp of the previous running frame; None after start or pause
    last_frame: Option<Duration>,
    collision_flash: bool,
    frames: u64,
}

impl SimulationLoop {
    pub fn new(state: SimulationState, settings: LoopSettings) -> Self {
        let mut sim = Self {
            state,
            view: ViewState::new(),
            settings: LoopSettings::default(),
            alerts: AlertBoard::new(),
            last_frame: None,
            collision_flash: false,
            frames: 0,
        };
        sim.set_speed(settings.speed);
        sim.set_radar_range(settings.radar_range);
        sim.settings.running = settings.running;
        sim.settings.ai_mode = settings.ai_mode;
        sim.settings.controls = settings.controls;
        sim
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn settings(&self) -> &LoopSettings {
        &self.settings
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_running(&self) -> bool {
        self.settings.running
    }

    /// Pausing freezes state; the next frame after resuming has zero delta
    pub fn set_running(&mut self, running: bool) {
        if !running {
            self.last_frame = None;
            self.collision_flash = false;
        }
        self.settings.running = running;
    }

    /// Clamped to [MIN_SPEED, MAX_SPEED]; ignores non-positive or non-finite values
    pub fn set_speed(&mut self, speed: f32) {
        if speed.is_finite() && speed > 0.0 {
            self.settings.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        } else {
            tracing::warn!("Ignoring invalid simulation speed {}", speed);
        }
    }

    pub fn set_radar_range(&mut self, range: f32) {
        if range.is_finite() {
            self.settings.radar_range = range.clamp(MIN_RANGE, MAX_RANGE);
        }
    }

    pub fn set_ai_mode(&mut self, mode: AiMode) {
        self.settings.ai_mode = mode;
    }

    pub fn set_controls(&mut self, controls: ControlInput) {
        self.settings.controls = controls;
    }

    pub fn controls_mut(&mut self) -> &mut ControlInput {
        &mut self.settings.controls
    }

    pub fn bands(&self) -> RadarBands {
        RadarBands::from_range(self.settings.radar_range)
    }

    /// Convert elapsed milliseconds into frame units at the current speed
    pub fn delta_for(&self, elapsed: Duration) -> f32 {
        elapsed.as_secs_f32() * 1000.0 * self.settings.speed * MS_TO_DELTA
    }

    /// One animation frame: advance if running, then render if a surface exists
    pub fn frame(
        &mut self,
        now: Duration,
        surface: Option<&mut dyn RenderSurface>,
        notifications: &mut dyn NotificationSink,
    ) -> Option<StepOutcome> {
        let outcome = if self.settings.running {
            let elapsed = self
                .last_frame
                .map_or(Duration::ZERO, |last| now.saturating_sub(last));
            self.last_frame = Some(now);
            let delta = self.delta_for(elapsed);
            Some(self.advance(delta, now, notifications))
        } else {
            None
        };

        if let Some(surface) = surface {
            let frame = Frame {
                state: &self.state,
                view: &self.view,
                bands: self.bands(),
                elapsed: now,
                collision_flash: self.collision_flash,
            };
            render_frame(surface, &frame);
        }

        self.frames += 1;
        outcome
    }

    /// Advance kinematics by `delta` frame units and check for collisions
    pub fn advance(
        &mut self,
        delta: f32,
        now: Duration,
        notifications: &mut dyn NotificationSink,
    ) -> StepOutcome {
        let settings = self.settings;
        let bands = self.bands();
        let state = &mut self.state;
        let mut outcome = StepOutcome {
            delta,
            ..Default::default()
        };

        physics::apply_thrust(&mut state.spacecraft, &settings.controls, delta);

        outcome.ai_target = ai::steer(
            settings.ai_mode,
            &mut state.spacecraft,
            &state.debris,
            bands.radius,
            delta,
        );

        if !settings.ai_mode.is_active() && !settings.controls.any() {
            outcome.perturbed = physics::perturb(&mut state.spacecraft, &mut state.rng);
        }

        physics::apply_drag(&mut state.spacecraft);
        physics::integrate(&mut state.spacecraft, delta);
        debris::integrate(&mut state.debris, delta);

        outcome.collision = proximity::find_collision(&state.spacecraft, &state.debris, &bands);
        self.collision_flash = outcome.collision.is_some();

        if let Some((index, distance)) = outcome.collision {
            trace!("Collision range: debris {} at {:.1}", index, distance);
            if self.alerts.try_fire(AlertKind::Collision, now).is_ok() {
                debug!("Collision with debris {} at distance {:.1}", index, distance);
                notifications.notify(Notification::new(
                    NotificationKind::Collision,
                    "COLLISION DETECTED",
                    "Impact with space debris!",
                ));
            }
        }

        outcome
    }

    /// Classification pass: emits telemetry and rate-limited proximity alerts.
    /// Does nothing while paused.
    pub fn classify(
        &mut self,
        now: Duration,
        telemetry: &mut dyn TelemetrySink,
        notifications: &mut dyn NotificationSink,
    ) -> Option<ProximityReport> {
        if !self.settings.running {
            return None;
        }

        let bands = self.bands();
        let report = proximity::scan(&self.state.spacecraft, &self.state.debris, &bands);

        if report.critical > 0 && self.alerts.try_fire(AlertKind::CriticalProximity, now).is_ok() {
            notifications.notify(Notification::new(
                NotificationKind::CriticalProximity,
                "CRITICAL PROXIMITY ALERT",
                format!(
                    "Space debris detected at dangerous distance (within {}km)!",
                    (bands.critical / 10.0).round() as i64
                ),
            ));
        }

        if report.warning > 0 && self.alerts.try_fire(AlertKind::WarningProximity, now).is_ok() {
            notifications.notify(Notification::new(
                NotificationKind::WarningProximity,
                "PROXIMITY WARNING",
                format!(
                    "Space debris approaching within {}km - maintain vigilance",
                    (bands.warning / 10.0).round() as i64
                ),
            ));
        }

        telemetry.debris_in_range(report.in_range);
        telemetry.collision_risk(report.risk, report.near_count());

        debug!(
            "Proximity: {} in range, {} critical, {} warning, risk {}",
            report.in_range, report.critical, report.warning, report.risk
        );

        Some(report)
    }

    /// Spacecraft back to scene center at rest, alert gates cleared.
    /// The debris field and view are kept.
    pub fn reset(&mut self) {
        self.state.reset_spacecraft();
        self.alerts.reset();
        self.last_frame = None;
        self.collision_flash = false;
    }
}
