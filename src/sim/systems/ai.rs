//! Rule-based steering
//!
//! Both active modes lock onto the nearest particle inside the radar radius
//! and apply a velocity correction along the line between the two.

use crate::sim::constants::ai::{
    AVOID_DISTANCE_OFFSET, AVOID_DISTANCE_SCALE, AVOID_STRENGTH, FOLLOW_CLOSE_DISTANCE,
    FOLLOW_DAMPING, FOLLOW_STRENGTH,
};
use crate::sim::controls::AiMode;
use crate::sim::state::{DebrisParticle, Spacecraft};
use crate::util::vec2::Vec2;

/// Index and distance of the nearest particle within `radius`.
/// Ties keep the first particle encountered.
pub fn nearest_in_range(
    spacecraft: &Spacecraft,
    debris: &[DebrisParticle],
    radius: f32,
) -> Option<(usize, f32)> {
    let mut nearest: Option<(usize, f32)> = None;

    for (index, particle) in debris.iter().enumerate() {
        let dist = spacecraft.position.distance_to(particle.position);
        if dist > radius {
            continue;
        }
        if nearest.map_or(true, |(_, d)| dist < d) {
            nearest = Some((index, dist));
        }
    }

    nearest
}

/// Avoidance falloff: closer particles push harder
#[inline]
pub fn avoid_strength(distance: f32, delta: f32) -> f32 {
    AVOID_STRENGTH * delta / (distance / AVOID_DISTANCE_SCALE + AVOID_DISTANCE_OFFSET)
}

/// Apply the steering rule for `mode`. Returns the targeted particle index, if any.
pub fn steer(
    mode: AiMode,
    spacecraft: &mut Spacecraft,
    debris: &[DebrisParticle],
    radius: f32,
    delta: f32,
) -> Option<usize> {
    if !mode.is_active() {
        return None;
    }

    let (index, distance) = nearest_in_range(spacecraft, debris, radius)?;
    let target = debris[index].position;

    match mode {
        AiMode::Avoid => {
            let away = (spacecraft.position - target).angle();
            spacecraft.velocity += Vec2::from_angle(away) * avoid_strength(distance, delta);
        }
        AiMode::Follow => {
            let toward = (target - spacecraft.position).angle();
            spacecraft.velocity += Vec2::from_angle(toward) * (FOLLOW_STRENGTH * delta);

            if distance < FOLLOW_CLOSE_DISTANCE {
                spacecraft.velocity *= FOLLOW_DAMPING;
            }
        }
        AiMode::Off => {}
    }

    Some(index)
}
