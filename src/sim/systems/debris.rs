//! Debris field generation and drift
//!
//! Particles are generated once on a ring around the spacecraft's starting
//! position and then drift linearly forever. There is no spawning or removal.

use rand::Rng;

use crate::sim::constants::debris::{MAX_AXIS_SPEED, RING_MAX, RING_MIN, SIZE_MAX, SIZE_MIN};
use crate::sim::state::DebrisParticle;
use crate::util::vec2::Vec2;

/// Generate `count` particles on a random ring around `center`
pub fn generate_ring<R: Rng>(rng: &mut R, center: Vec2, count: usize) -> Vec<DebrisParticle> {
    (0..count).map(|_| spawn_particle(rng, center)).collect()
}

fn spawn_particle<R: Rng>(rng: &mut R, center: Vec2) -> DebrisParticle {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let distance = rng.gen_range(RING_MIN..RING_MAX);
    let position = center + Vec2::from_angle(angle) * distance;

    let velocity = Vec2::new(
        rng.gen_range(-MAX_AXIS_SPEED..MAX_AXIS_SPEED),
        rng.gen_range(-MAX_AXIS_SPEED..MAX_AXIS_SPEED),
    );
    let size = rng.gen_range(SIZE_MIN..SIZE_MAX);

    DebrisParticle::new(position, velocity, size)
}

/// Advance every particle along its constant velocity
pub fn integrate(debris: &mut [DebrisParticle], delta: f32) {
    for particle in debris.iter_mut() {
        particle.position += particle.velocity * delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_ring_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let center = Vec2::new(640.0, 360.0);
        let debris = generate_ring(&mut rng, center, 200);

        assert_eq!(debris.len(), 200);
        for particle in &debris {
            let d = particle.position.distance_to(center);
            assert!(d >= RING_MIN - 1e-3 && d <= RING_MAX + 1e-3, "distance {}", d);
            assert!(particle.velocity.x.abs() <= MAX_AXIS_SPEED);
            assert!(particle.velocity.y.abs() <= MAX_AXIS_SPEED);
            assert!(particle.size >= SIZE_MIN && particle.size < SIZE_MAX);
        }
    }

    #[test]
    fn test_empty_field() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generate_ring(&mut rng, Vec2::ZERO, 0).is_empty());
    }

    #[test]
    fn test_integrate_is_linear() {
        let mut debris = vec![DebrisParticle::new(
            Vec2::new(10.0, 10.0),
            Vec2::new(0.2, -0.1),
            2.0,
        )];

        integrate(&mut debris, 10.0);
        assert!(debris[0].position.approx_eq(Vec2::new(12.0, 9.0), 1e-4));

        // No drag: velocity is unchanged
        assert_eq!(debris[0].velocity, Vec2::new(0.2, -0.1));
    }
}
