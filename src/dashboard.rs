//! Mission dashboard
//!
//! The telemetry consumer: spacecraft/environment/safety/system panels, the
//! debris dashboard with its detection history, and run statistics. Most
//! values here are mock data refreshed on timers; only the debris count, the
//! near count and the risk level come from the simulation.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::notification::{Notification, NotificationKind};
use crate::sim::controls::{AiMode, ControlInput};
use crate::sim::systems::proximity::RiskLevel;
use crate::sim::TelemetrySink;

/// Detection history length shown in the debris chart
pub const HISTORY_LEN: usize = 20;
/// Fuel drained per fuel tick at 1x speed
pub const FUEL_DRAIN_PER_TICK: f32 = 0.01;
/// Fuel cost of pressing a navigation control
pub const FUEL_PER_NAV_PRESS: f32 = 0.1;
/// Distance credited per fuel tick per unit of velocity at 1x speed
pub const DISTANCE_PER_TICK: f32 = 0.05;
/// Chance that high solar activity raises a notification on a telemetry refresh
pub const SOLAR_WARNING_PROBABILITY: f64 = 0.3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolarActivity {
    #[default]
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadiationLevel {
    #[default]
    Normal,
    Elevated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Composition {
    Metallic,
    Composite,
    Unknown,
    #[default]
    Mixed,
}

impl Composition {
    pub const ALL: [Composition; 4] = [
        Composition::Metallic,
        Composition::Composite,
        Composition::Unknown,
        Composition::Mixed,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacecraftTelemetry {
    pub velocity: f32,
    pub altitude: f32,
    pub fuel: f32,
    pub shields: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentTelemetry {
    pub debris_count: usize,
    pub nearby_objects: usize,
    pub solar_activity: SolarActivity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyTelemetry {
    pub collision_risk: RiskLevel,
    pub radiation_level: RadiationLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemTelemetry {
    pub ai_status: String,
    pub system_integrity: f32,
}

/// Telemetry panels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    pub spacecraft: SpacecraftTelemetry,
    pub environment: EnvironmentTelemetry,
    pub safety: SafetyTelemetry,
    pub system: SystemTelemetry,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self {
            spacecraft: SpacecraftTelemetry {
                velocity: 0.0,
                altitude: 400.0,
                fuel: 100.0,
                shields: 100.0,
            },
            environment: EnvironmentTelemetry {
                debris_count: 25,
                nearby_objects: 0,
                solar_activity: SolarActivity::Low,
            },
            safety: SafetyTelemetry {
                collision_risk: RiskLevel::Low,
                radiation_level: RadiationLevel::Normal,
            },
            system: SystemTelemetry {
                ai_status: AiMode::Off.status_label().to_string(),
                system_integrity: 98.0,
            },
        }
    }
}

/// Debris dashboard widget data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebrisData {
    pub count: usize,
    pub nearby: usize,
    pub risk: RiskLevel,
    pub velocity: f32,
    pub weight: f32,
    pub size: f32,
    pub composition: Composition,
    /// Most recent in-range counts, oldest first
    pub detection_history: VecDeque<usize>,
}

impl Default for DebrisData {
    fn default() -> Self {
        let telemetry = Telemetry::default();
        Self {
            count: telemetry.environment.debris_count,
            nearby: telemetry.environment.nearby_objects,
            risk: telemetry.safety.collision_risk,
            velocity: 2.5,
            weight: 120.0,
            size: 1.8,
            composition: Composition::Mixed,
            detection_history: VecDeque::from(vec![0]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStatistics {
    pub debris_avoided: u64,
    pub distance_traveled: f32,
    pub fuel_efficiency: f32,
}

impl Default for SimulationStatistics {
    fn default() -> Self {
        Self {
            debris_avoided: 0,
            distance_traveled: 0.0,
            fuel_efficiency: 100.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub telemetry: Telemetry,
    pub debris: DebrisData,
    pub statistics: SimulationStatistics,
    /// Collision-risk banner, raised while risk is High
    pub show_warning: bool,
    ai_mode: AiMode,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ai_mode(&self) -> AiMode {
        self.ai_mode
    }

    pub fn set_ai_mode(&mut self, mode: AiMode) {
        self.ai_mode = mode;
        self.telemetry.system.ai_status = mode.status_label().to_string();
    }

    pub fn dismiss_warning(&mut self) {
        self.show_warning = false;
    }

    /// Fuel cost of a navigation press
    pub fn navigation_pressed(&mut self) {
        let fuel = &mut self.telemetry.spacecraft.fuel;
        *fuel = (*fuel - FUEL_PER_NAV_PRESS).max(0.0);
    }

    /// Once-per-second drain and odometer update
    pub fn fuel_tick(&mut self, speed: f32) {
        let spacecraft = &mut self.telemetry.spacecraft;
        spacecraft.fuel = (spacecraft.fuel - FUEL_DRAIN_PER_TICK * speed).max(0.0);
        self.statistics.distance_traveled += DISTANCE_PER_TICK * speed * spacecraft.velocity;
    }

    /// Refresh the mock environment and debris readings.
    /// Returns a solar-activity notification when one should be shown.
    pub fn randomize<R: Rng>(
        &mut self,
        rng: &mut R,
        controls: &ControlInput,
    ) -> Option<Notification> {
        let solar_activity = match rng.gen_range(0..3) {
            0 => SolarActivity::Low,
            1 => SolarActivity::Moderate,
            _ => SolarActivity::High,
        };

        let telemetry = &mut self.telemetry;
        telemetry.spacecraft.velocity = rng.gen_range(0..5) as f32;
        telemetry.environment.solar_activity = solar_activity;
        telemetry.safety.radiation_level = if solar_activity == SolarActivity::High {
            RadiationLevel::Elevated
        } else {
            RadiationLevel::Normal
        };

        let integrity_hit = if telemetry.safety.collision_risk == RiskLevel::High {
            5.0
        } else {
            0.0
        };
        telemetry.system.system_integrity = (98.0_f32 - integrity_hit).max(80.0);

        self.debris.velocity = rng.gen_range(2.0..5.0);
        self.debris.weight = rng.gen_range(80.0..230.0);
        self.debris.size = rng.gen_range(0.5..3.5);
        self.debris.composition = *Composition::ALL
            .choose(rng)
            .unwrap_or(&Composition::Mixed);

        self.statistics.fuel_efficiency = (100.0 - controls.active_count() as f32 * 5.0).max(60.0);

        if solar_activity == SolarActivity::High && rng.gen_bool(SOLAR_WARNING_PROBABILITY) {
            return Some(Notification::new(
                NotificationKind::SolarActivity,
                "Solar Activity Warning",
                "Increased solar radiation detected. Shield monitoring advised.",
            ));
        }
        None
    }

    /// Restore every panel to its initial values
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl TelemetrySink for Dashboard {
    fn debris_in_range(&mut self, count: usize) {
        self.telemetry.environment.debris_count = count;
        self.debris.count = count;

        let history = &mut self.debris.detection_history;
        history.push_back(count);
        while history.len() > HISTORY_LEN {
            history.pop_front();
        }
    }

    fn collision_risk(&mut self, risk: RiskLevel, near_count: usize) {
        self.telemetry.environment.nearby_objects = near_count;
        self.telemetry.safety.collision_risk = risk;
        self.debris.nearby = near_count;
        self.debris.risk = risk;
        self.show_warning = risk == RiskLevel::High;

        if self.ai_mode.is_active() && risk >= RiskLevel::Medium {
            self.statistics.debris_avoided += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_defaults() {
        let dashboard = Dashboard::new();
        assert_eq!(dashboard.telemetry.spacecraft.fuel, 100.0);
        assert_eq!(dashboard.telemetry.environment.debris_count, 25);
        assert_eq!(dashboard.telemetry.system.ai_status, "Inactive");
        assert_eq!(dashboard.debris.detection_history, VecDeque::from(vec![0]));
        assert_eq!(dashboard.statistics.fuel_efficiency, 100.0);
        assert!(!dashboard.show_warning);
    }

    #[test]
    fn test_history_is_capped() {
        let mut dashboard = Dashboard::new();
        for count in 1..=30 {
            dashboard.debris_in_range(count);
        }
        let history = &dashboard.debris.detection_history;
        assert_eq!(history.len(), HISTORY_LEN);
        assert_eq!(history.front(), Some(&11));
        assert_eq!(history.back(), Some(&30));
        assert_eq!(dashboard.telemetry.environment.debris_count, 30);
    }

    #[test]
    fn test_risk_updates_banner() {
        let mut dashboard = Dashboard::new();
        dashboard.collision_risk(RiskLevel::High, 3);
        assert!(dashboard.show_warning);
        assert_eq!(dashboard.telemetry.environment.nearby_objects, 3);
        assert_eq!(dashboard.debris.risk, RiskLevel::High);

        dashboard.collision_risk(RiskLevel::Medium, 1);
        assert!(!dashboard.show_warning);
    }

    #[test]
    fn test_dismiss_warning() {
        let mut dashboard = Dashboard::new();
        dashboard.collision_risk(RiskLevel::High, 2);
        dashboard.dismiss_warning();
        assert!(!dashboard.show_warning);
        assert_eq!(dashboard.debris.risk, RiskLevel::High);

        // Next high-risk pass raises it again
        dashboard.collision_risk(RiskLevel::High, 2);
        assert!(dashboard.show_warning);
    }

    #[test]
    fn test_debris_avoided_only_with_ai() {
        let mut dashboard = Dashboard::new();
        dashboard.collision_risk(RiskLevel::High, 1);
        assert_eq!(dashboard.statistics.debris_avoided, 0);

        dashboard.set_ai_mode(AiMode::Avoid);
        dashboard.collision_risk(RiskLevel::Medium, 1);
        dashboard.collision_risk(RiskLevel::Low, 0);
        dashboard.collision_risk(RiskLevel::High, 2);
        assert_eq!(dashboard.statistics.debris_avoided, 2);
        assert_eq!(dashboard.telemetry.system.ai_status, "Avoidance Active");
    }

    #[test]
    fn test_fuel_never_negative() {
        let mut dashboard = Dashboard::new();
        for _ in 0..2_000 {
            dashboard.navigation_pressed();
        }
        assert_eq!(dashboard.telemetry.spacecraft.fuel, 0.0);
        dashboard.fuel_tick(4.0);
        assert_eq!(dashboard.telemetry.spacecraft.fuel, 0.0);
    }

    #[test]
    fn test_fuel_tick_distance() {
        let mut dashboard = Dashboard::new();
        dashboard.telemetry.spacecraft.velocity = 4.0;
        dashboard.fuel_tick(2.0);
        assert!((dashboard.telemetry.spacecraft.fuel - 99.98).abs() < 1e-4);
        assert!((dashboard.statistics.distance_traveled - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_randomize_ranges() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut dashboard = Dashboard::new();
        let controls = ControlInput {
            up: true,
            left: true,
            ..Default::default()
        };

        for _ in 0..200 {
            let notification = dashboard.randomize(&mut rng, &controls);
            let t = &dashboard.telemetry;
            assert!((0.0..5.0).contains(&t.spacecraft.velocity));
            assert_eq!(t.spacecraft.velocity.fract(), 0.0);
            assert!((2.0..5.0).contains(&dashboard.debris.velocity));
            assert!((80.0..230.0).contains(&dashboard.debris.weight));
            assert!((0.5..3.5).contains(&dashboard.debris.size));
            assert_eq!(dashboard.statistics.fuel_efficiency, 90.0);
            assert_eq!(
                t.safety.radiation_level == RadiationLevel::Elevated,
                t.environment.solar_activity == SolarActivity::High
            );
            if let Some(n) = notification {
                assert_eq!(n.kind, NotificationKind::SolarActivity);
                assert_eq!(t.environment.solar_activity, SolarActivity::High);
            }
        }
    }

    #[test]
    fn test_integrity_drops_at_high_risk() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut dashboard = Dashboard::new();
        dashboard.collision_risk(RiskLevel::High, 1);
        dashboard.randomize(&mut rng, &ControlInput::default());
        assert_eq!(dashboard.telemetry.system.system_integrity, 93.0);

        dashboard.collision_risk(RiskLevel::Low, 0);
        dashboard.randomize(&mut rng, &ControlInput::default());
        assert_eq!(dashboard.telemetry.system.system_integrity, 98.0);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut dashboard = Dashboard::new();
        dashboard.set_ai_mode(AiMode::Follow);
        dashboard.debris_in_range(7);
        dashboard.collision_risk(RiskLevel::High, 4);
        dashboard.fuel_tick(3.0);

        dashboard.reset();
        assert_eq!(dashboard, Dashboard::new());
        dashboard.reset();
        assert_eq!(dashboard, Dashboard::new());
    }

    #[test]
    fn test_snapshot_serializes() {
        let json = serde_json::to_value(Dashboard::new()).unwrap();
        assert_eq!(json["telemetry"]["spacecraft"]["altitude"], 400.0);
        assert_eq!(json["debris"]["composition"], "Mixed");
        assert_eq!(json["telemetry"]["safety"]["collision_risk"], "Low");
    }
}
