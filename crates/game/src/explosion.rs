//! Explosion force field: time-bounded blast records push the character.
//!
//! The pass runs on a fixed cadence rather than every frame; the consumed
//! window scales the velocity impulse so the accumulated push is the same
//! at any frame rate.

use engine_core::{Cadence, Vec3};
use physics::{PhysicsWorld, RigidBodyHandle};

use crate::state::{Explosion, GameState, MAX_EXPLOSION_AGE};

/// Force passes run at this fixed rate.
const PASS_HZ: f32 = 20.0;
/// Per-axis threshold below which the summed force is ignored.
pub const FORCE_EPSILON: f32 = 0.1;
/// Constant upward component added to the radial push direction, so every
/// blast has some lift and not a purely radial shove.
pub const UPWARD_BIAS: f32 = 0.5;

/// Scalar force magnitude at `distance` from the blast center: quadratic
/// falloff from `strength` at the center to zero at the radius edge.
pub fn force_magnitude(explosion: &Explosion, distance: f32) -> f32 {
    let factor = (1.0 - distance / explosion.radius).max(0.0);
    explosion.strength * factor * factor
}

/// Force vector a blast exerts on a body at `point`, or `None` at or beyond
/// the blast radius.
pub fn explosion_force(explosion: &Explosion, point: Vec3) -> Option<Vec3> {
    let offset = point - explosion.position;
    let distance_squared = offset.length_squared();
    if distance_squared >= explosion.radius * explosion.radius {
        return None;
    }

    let distance = distance_squared.sqrt();
    let magnitude = force_magnitude(explosion, distance);
    let mut direction = if distance > 1e-4 {
        offset / distance
    } else {
        // Dead-center blast: push straight up.
        Vec3::Y
    };
    direction.y += UPWARD_BIAS;
    Some(direction * magnitude)
}

/// Sums live blast forces onto the character each pass. Never authors
/// explosions; it only prunes the expired ones.
pub struct ExplosionField {
    cadence: Cadence,
}

impl ExplosionField {
    pub fn new() -> Self {
        Self {
            cadence: Cadence::from_hz(PASS_HZ),
        }
    }

    /// Run one force pass if due: prune dead blasts, sum the forces on the
    /// character, and fold the total into its velocity as an impulse.
    pub fn update(
        &mut self,
        state: &mut GameState,
        physics: &mut PhysicsWorld,
        character: RigidBodyHandle,
        now: f64,
        dt: f32,
    ) {
        let Some(window) = self.cadence.tick(dt) else {
            return;
        };

        state
            .explosions
            .retain(|explosion| explosion.age(now) < MAX_EXPLOSION_AGE);
        if state.explosions.is_empty() {
            return;
        }

        let Some(position) = physics.translation(character) else {
            return;
        };

        let mut total = Vec3::ZERO;
        for explosion in &state.explosions {
            if let Some(force) = explosion_force(explosion, position) {
                total += force;
            }
        }

        if total.x.abs() > FORCE_EPSILON
            || total.y.abs() > FORCE_EPSILON
            || total.z.abs() > FORCE_EPSILON
        {
            if let Some(velocity) = physics.linvel(character) {
                physics.set_linvel(character, velocity + total * window);
            }
        }
    }
}

impl Default for ExplosionField {
    fn default() -> Self {
        Self::new()
    }
}
