//! Proximity classification and collision-risk assessment
//!
//! Distances from the spacecraft are bucketed into bands derived from the
//! radar radius. Nothing here is stored: every pass recomputes from positions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::sim::constants::radar::{
    COLLISION_CAP, COLLISION_FRACTION, CRITICAL_CAP, CRITICAL_FRACTION, RANGE_TO_UNITS,
    WARNING_CAP, WARNING_FRACTION,
};
use crate::sim::state::{DebrisParticle, Spacecraft};

/// Band radii in scene units for a given radar range setting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarBands {
    /// Detection boundary
    pub radius: f32,
    /// min(50, 0.3 R)
    pub critical: f32,
    /// min(100, 0.6 R)
    pub warning: f32,
    /// min(15, 0.1 R)
    pub collision: f32,
}

impl RadarBands {
    pub fn from_range(radar_range: f32) -> Self {
        Self::from_radius(radar_range * RANGE_TO_UNITS)
    }

    pub fn from_radius(radius: f32) -> Self {
        Self {
            radius,
            critical: CRITICAL_CAP.min(radius * CRITICAL_FRACTION),
            warning: WARNING_CAP.min(radius * WARNING_FRACTION),
            collision: COLLISION_CAP.min(radius * COLLISION_FRACTION),
        }
    }

    /// Bands are inclusive at their outer edge
    pub fn classify(&self, distance: f32) -> ProximityTier {
        if distance <= self.critical {
            ProximityTier::Critical
        } else if distance <= self.warning {
            ProximityTier::Warning
        } else if distance <= self.radius {
            ProximityTier::InRange
        } else {
            ProximityTier::OutOfRange
        }
    }

    pub fn in_range(&self, distance: f32) -> bool {
        distance <= self.radius
    }

    /// Strictly inside the collision threshold
    pub fn is_collision(&self, distance: f32) -> bool {
        distance < self.collision
    }
}

/// Proximity band a single particle falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProximityTier {
    Critical,
    Warning,
    /// Detected by radar, outside the warning band
    InRange,
    OutOfRange,
}

impl ProximityTier {
    pub fn is_detected(&self) -> bool {
        !matches!(self, ProximityTier::OutOfRange)
    }

    /// Critical or warning
    pub fn is_near(&self) -> bool {
        matches!(self, ProximityTier::Critical | ProximityTier::Warning)
    }
}

/// Aggregate collision risk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        f.write_str(name)
    }
}

/// Result of one classification pass over the debris field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProximityReport {
    /// Particles within the radar radius (all detected tiers)
    pub in_range: usize,
    pub critical: usize,
    pub warning: usize,
    /// Detected but outside the warning band
    pub mid_range: usize,
    pub risk: RiskLevel,
}

impl ProximityReport {
    /// Critical plus warning
    pub fn near_count(&self) -> usize {
        self.critical + self.warning
    }
}

/// High if anything is critical, Medium if anything is in the warning band or
/// more than one particle is mid-range, otherwise Low
pub fn assess_risk(critical: usize, warning: usize, mid_range: usize) -> RiskLevel {
    if critical > 0 {
        RiskLevel::High
    } else if warning > 0 || mid_range > 1 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Classify every particle relative to the spacecraft
pub fn scan(spacecraft: &Spacecraft, debris: &[DebrisParticle], bands: &RadarBands) -> ProximityReport {
    let mut report = ProximityReport::default();

    for particle in debris {
        let distance = spacecraft.position.distance_to(particle.position);
        match bands.classify(distance) {
            ProximityTier::Critical => report.critical += 1,
            ProximityTier::Warning => report.warning += 1,
            ProximityTier::InRange => report.mid_range += 1,
            ProximityTier::OutOfRange => continue,
        }
        report.in_range += 1;
    }

    report.risk = assess_risk(report.critical, report.warning, report.mid_range);
    report
}

/// First particle inside the collision threshold, with its distance
pub fn find_collision(
    spacecraft: &Spacecraft,
    debris: &[DebrisParticle],
    bands: &RadarBands,
) -> Option<(usize, f32)> {
    debris
        .iter()
        .map(|particle| spacecraft.position.distance_to(particle.position))
        .enumerate()
        .find(|(_, distance)| bands.is_collision(*distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::vec2::Vec2;

    fn particle_at(x: f32, y: f32) -> DebrisParticle {
        DebrisParticle::new(Vec2::new(x, y), Vec2::ZERO, 2.0)
    }

    #[test]
    fn test_bands_for_range_15() {
        let bands = RadarBands::from_range(15.0);
        assert_eq!(bands.radius, 150.0);
        assert!((bands.critical - 45.0).abs() < 1e-4);
        assert!((bands.warning - 90.0).abs() < 1e-4);
        assert_eq!(bands.collision, 15.0);
    }

    #[test]
    fn test_caps_apply_at_long_range() {
        let bands = RadarBands::from_range(30.0);
        assert_eq!(bands.critical, 50.0);
        assert_eq!(bands.warning, 100.0);
        assert_eq!(bands.collision, 15.0);
    }

    #[test]
    fn test_bands_ordered_for_all_ranges() {
        let mut range = 5.0;
        while range <= 30.0 {
            let bands = RadarBands::from_range(range);
            assert!(bands.collision <= bands.critical);
            assert!(bands.critical <= bands.warning);
            assert!(bands.warning <= bands.radius);
            range += 0.5;
        }
    }

    #[test]
    fn test_classify_scenario() {
        let bands = RadarBands::from_range(15.0);
        assert_eq!(bands.classify(40.0), ProximityTier::Critical);
        assert_eq!(bands.classify(70.0), ProximityTier::Warning);
        assert_eq!(bands.classify(120.0), ProximityTier::InRange);
        assert_eq!(bands.classify(200.0), ProximityTier::OutOfRange);
    }

    #[test]
    fn test_classify_edges_are_inclusive() {
        let bands = RadarBands::from_radius(100.0);
        assert_eq!(bands.classify(bands.critical), ProximityTier::Critical);
        assert_eq!(bands.classify(bands.warning), ProximityTier::Warning);
        assert_eq!(bands.classify(100.0), ProximityTier::InRange);
        assert_eq!(bands.classify(0.0), ProximityTier::Critical);
    }

    #[test]
    fn test_risk_rules() {
        assert_eq!(assess_risk(0, 0, 0), RiskLevel::Low);
        assert_eq!(assess_risk(0, 0, 1), RiskLevel::Low);
        assert_eq!(assess_risk(0, 0, 2), RiskLevel::Medium);
        assert_eq!(assess_risk(0, 1, 0), RiskLevel::Medium);
        assert_eq!(assess_risk(1, 0, 0), RiskLevel::High);
        assert_eq!(assess_risk(1, 3, 5), RiskLevel::High);
    }

    #[test]
    fn test_scan_counts() {
        let craft = Spacecraft::at(Vec2::ZERO);
        let debris = vec![
            particle_at(40.0, 0.0),
            particle_at(0.0, 70.0),
            particle_at(-120.0, 0.0),
            particle_at(0.0, -130.0),
            particle_at(200.0, 0.0),
        ];
        let report = scan(&craft, &debris, &RadarBands::from_range(15.0));

        assert_eq!(report.critical, 1);
        assert_eq!(report.warning, 1);
        assert_eq!(report.mid_range, 2);
        assert_eq!(report.in_range, 4);
        assert_eq!(report.near_count(), 2);
        assert_eq!(report.risk, RiskLevel::High);
    }

    #[test]
    fn test_scan_coincident_particle_is_critical() {
        let craft = Spacecraft::at(Vec2::new(5.0, 5.0));
        let debris = vec![particle_at(5.0, 5.0)];
        let report = scan(&craft, &debris, &RadarBands::from_range(5.0));
        assert_eq!(report.critical, 1);
        assert_eq!(report.risk, RiskLevel::High);
    }

    #[test]
    fn test_scan_empty_field() {
        let report = scan(&Spacecraft::default(), &[], &RadarBands::from_range(15.0));
        assert_eq!(report, ProximityReport::default());
    }

    #[test]
    fn test_find_collision() {
        let craft = Spacecraft::at(Vec2::ZERO);
        let bands = RadarBands::from_range(15.0);
        let debris = vec![particle_at(30.0, 0.0), particle_at(10.0, 0.0), particle_at(5.0, 0.0)];

        let (index, distance) = find_collision(&craft, &debris, &bands).unwrap();
        assert_eq!(index, 1);
        assert!((distance - 10.0).abs() < 1e-5);

        assert!(find_collision(&craft, &debris[..1], &bands).is_none());
    }

    #[test]
    fn test_risk_ordering() {
        assert!(RiskLevel::High > RiskLevel::Medium);
        assert!(RiskLevel::Medium > RiskLevel::Low);
        assert_eq!(RiskLevel::Medium.to_string(), "Medium");
    }
}
