//! Simulation state
//!
//! The spacecraft and debris field, owned by the loop and passed by `&mut`
//! into each system on every tick.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::sim::systems::debris;
use crate::util::vec2::Vec2;

/// The player-controlled craft
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Spacecraft {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Spacecraft {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// A drifting debris particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebrisParticle {
    pub position: Vec2,
    /// Constant drift velocity (frame units)
    pub velocity: Vec2,
    /// Drawn radius in scene units
    pub size: f32,
}

impl DebrisParticle {
    pub fn new(position: Vec2, velocity: Vec2, size: f32) -> Self {
        Self {
            position,
            velocity,
            size,
        }
    }
}

/// Kinematic state of one simulation run
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub spacecraft: Spacecraft,
    /// Fixed for the lifetime of the run
    pub debris: Vec<DebrisParticle>,
    /// Where the spacecraft starts and returns to on reset
    pub scene_center: Vec2,
    pub rng: StdRng,
}

impl SimulationState {
    /// Create a run with `debris_count` particles ringed around `scene_center`.
    /// A seed makes the debris field and perturbations reproducible.
    pub fn new(scene_center: Vec2, debris_count: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let debris = debris::generate_ring(&mut rng, scene_center, debris_count);

        tracing::debug!(
            "Generated {} debris particles around ({:.0}, {:.0})",
            debris.len(),
            scene_center.x,
            scene_center.y
        );

        Self {
            spacecraft: Spacecraft::at(scene_center),
            debris,
            scene_center,
            rng,
        }
    }

    /// Build a state from explicit parts (no random generation)
    pub fn with_debris(spacecraft: Spacecraft, debris: Vec<DebrisParticle>, seed: u64) -> Self {
        Self {
            scene_center: spacecraft.position,
            spacecraft,
            debris,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Return the spacecraft to scene center at rest. The debris field is kept.
    pub fn reset_spacecraft(&mut self) {
        self.spacecraft = Spacecraft::at(self.scene_center);
    }

    pub fn debris_count(&self) -> usize {
        self.debris.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::constants::debris::DEFAULT_COUNT;

    #[test]
    fn test_new_places_spacecraft_at_center() {
        let center = Vec2::new(640.0, 360.0);
        let state = SimulationState::new(center, DEFAULT_COUNT, Some(7));
        assert_eq!(state.spacecraft.position, center);
        assert_eq!(state.spacecraft.velocity, Vec2::ZERO);
        assert_eq!(state.debris_count(), DEFAULT_COUNT);
    }

    #[test]
    fn test_seed_reproduces_field() {
        let center = Vec2::new(100.0, 100.0);
        let a = SimulationState::new(center, 10, Some(42));
        let b = SimulationState::new(center, 10, Some(42));
        assert_eq!(a.debris, b.debris);
    }

    #[test]
    fn test_reset_spacecraft() {
        let center = Vec2::new(50.0, 50.0);
        let mut state = SimulationState::new(center, 5, Some(1));
        state.spacecraft.position = Vec2::new(-300.0, 999.0);
        state.spacecraft.velocity = Vec2::new(3.0, -2.0);
        let debris_before = state.debris.clone();

        state.reset_spacecraft();
        assert_eq!(state.spacecraft, Spacecraft::at(center));
        assert_eq!(state.debris, debris_before);

        // Idempotent
        state.reset_spacecraft();
        assert_eq!(state.spacecraft, Spacecraft::at(center));
    }

    #[test]
    fn test_with_debris_uses_spacecraft_as_center() {
        let craft = Spacecraft::at(Vec2::new(3.0, 4.0));
        let state = SimulationState::with_debris(craft, Vec::new(), 0);
        assert_eq!(state.scene_center, Vec2::new(3.0, 4.0));
        assert_eq!(state.debris_count(), 0);
    }
}
