use rand::Rng;

use crate::sim::constants::physics::{
    DRAG_FACTOR, PERTURBATION_HALF_WIDTH, PERTURBATION_PROBABILITY, THRUST_POWER,
};
use crate::sim::controls::ControlInput;
use crate::sim::state::Spacecraft;
use crate::util::vec2::Vec2;

/// Apply manual thrust from held directional flags.
/// NOTE: "up" adds to +y velocity and "down" subtracts; this sign
/// convention is intentional and must not be flipped.
pub fn apply_thrust(spacecraft: &mut Spacecraft, input: &ControlInput, delta: f32) {
    let power = THRUST_POWER * delta;

    if input.up {
        spacecraft.velocity.y += power;
    }
    if input.down {
        spacecraft.velocity.y -= power;
    }
    if input.left {
        spacecraft.velocity.x -= power;
    }
    if input.right {
        spacecraft.velocity.x += power;
    }
}

/// Exponential drag: velocity *= DRAG_FACTOR once per tick
pub fn apply_drag(spacecraft: &mut Spacecraft) {
    spacecraft.velocity *= DRAG_FACTOR;
}

/// Occasionally nudge an idle craft so it looks alive.
/// Returns true if a perturbation was applied.
pub fn perturb<R: Rng>(spacecraft: &mut Spacecraft, rng: &mut R) -> bool {
    if !rng.gen_bool(PERTURBATION_PROBABILITY) {
        return false;
    }

    spacecraft.velocity += Vec2::new(
        rng.gen_range(-PERTURBATION_HALF_WIDTH..PERTURBATION_HALF_WIDTH),
        rng.gen_range(-PERTURBATION_HALF_WIDTH..PERTURBATION_HALF_WIDTH),
    );
    true
}

/// Explicit Euler step, no sub-stepping
pub fn integrate(spacecraft: &mut Spacecraft, delta: f32) {
    spacecraft.position += spacecraft.velocity * delta;
}
