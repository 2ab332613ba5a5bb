//! Bomb projectiles: fire gating, ballistic lifecycle, and detonation.

use engine_core::{yaw_direction, Cadence, Quat, Vec3};
use physics::{BallBodyParams, PhysicsWorld};

use crate::state::{Explosion, GameState, Projectile, MAX_ACTIVE_PROJECTILES};

/// Minimum seconds between accepted fire actions.
pub const FIRE_INTERVAL: f64 = 0.3;
/// Cooldown written into the shared state on fire.
pub const SHOOT_COOLDOWN: f32 = 0.3;
/// Muzzle speed along the launch direction.
pub const LAUNCH_SPEED: f32 = 12.0;
/// Straight-up boost added on top of the arc.
pub const VERTICAL_BOOST: f32 = 3.0;
/// Upward arc of the launch direction, radians above the horizon.
pub const LAUNCH_ARC: f32 = 0.25;
/// Bazooka muzzle offset in container space.
pub const MUZZLE_OFFSET: Vec3 = Vec3::new(0.3, 0.5, 0.4);
/// Bombs detonate after this long in flight regardless of state.
pub const FUSE_SECONDS: f32 = 5.0;
/// Below this horizontal speed a bomb can count as stuck.
pub const STUCK_SPEED: f32 = 0.5;
/// Stuck detection only applies below this altitude.
pub const STUCK_ALTITUDE: f32 = 1.0;
/// Detonation checks run at this fixed rate, not every frame.
const CHECK_HZ: f32 = 6.0;

/// Rapier body tuning for a bomb.
pub const BOMB_BODY: BallBodyParams = BallBodyParams {
    radius: 0.15,
    mass: 0.5,
    linear_damping: 0.2,
    angular_damping: 0.9,
    friction: 0.2,
    restitution: 0.5,
};

/// Detonation event handed to visual/audio collaborators. The core never
/// waits on them.
#[derive(Debug, Clone, Copy)]
pub struct Detonation {
    pub position: Vec3,
    pub radius: f32,
    pub intensity: f32,
}

/// Owns firing, flight tracking, and detonation of bomb projectiles, and
/// with them the ammo/cooldown fields of the shared state.
pub struct ProjectileSystem {
    next_id: u64,
    last_fire_at: f64,
    check_cadence: Cadence,
}

impl ProjectileSystem {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            last_fire_at: f64::NEG_INFINITY,
            check_cadence: Cadence::from_hz(CHECK_HZ),
        }
    }

    /// Attempt to fire from `origin` along `facing_yaw`. Every gate must
    /// hold; a failed gate is silently ignored and mutates nothing.
    pub fn try_fire(
        &mut self,
        state: &mut GameState,
        physics: &mut PhysicsWorld,
        origin: Vec3,
        facing_yaw: f32,
        now: f64,
    ) -> bool {
        if state.ammo == 0
            || !state.can_shoot
            || now - self.last_fire_at <= FIRE_INTERVAL
            || state.active_projectiles.len() >= MAX_ACTIVE_PROJECTILES
        {
            return false;
        }

        state.ammo -= 1;
        state.can_shoot = false;
        state.shoot_cooldown = SHOOT_COOLDOWN;
        self.last_fire_at = now;

        let spawn_position = origin + Quat::from_rotation_y(facing_yaw) * MUZZLE_OFFSET;
        let direction = yaw_direction(facing_yaw) * LAUNCH_ARC.cos() + Vec3::Y * LAUNCH_ARC.sin();

        let body = physics.add_ball_body(spawn_position, BOMB_BODY);
        physics.set_linvel(body, direction * LAUNCH_SPEED + Vec3::Y * VERTICAL_BOOST);

        let id = self.next_id;
        self.next_id += 1;
        state.active_projectiles.push(Projectile {
            id,
            spawn_position,
            initial_direction: direction,
            age: 0.0,
            explosion_intensity: state.explosion_intensity,
            body,
        });
        log::debug!("bomb {} away, {} rounds left", id, state.ammo);
        true
    }

    /// Advance projectile ages every frame; on the check cadence, detonate
    /// any bomb past its fuse or stuck on the ground. Returns the
    /// detonation events produced this frame.
    pub fn update(
        &mut self,
        state: &mut GameState,
        physics: &mut PhysicsWorld,
        now: f64,
        dt: f32,
    ) -> Vec<Detonation> {
        for projectile in &mut state.active_projectiles {
            projectile.age += dt;
        }

        if self.check_cadence.tick(dt).is_none() {
            return Vec::new();
        }

        let mut events = Vec::new();
        let mut index = 0;
        while index < state.active_projectiles.len() {
            let projectile = &state.active_projectiles[index];

            // A body the runtime no longer knows about cannot be checked
            // this frame; leave the record for the next pass.
            let Some(position) = physics.translation(projectile.body) else {
                index += 1;
                continue;
            };
            let velocity = physics.linvel(projectile.body).unwrap_or(Vec3::ZERO);
            let horizontal_speed = (velocity.x * velocity.x + velocity.z * velocity.z).sqrt();

            let fused = projectile.age > FUSE_SECONDS;
            let stuck = horizontal_speed < STUCK_SPEED && position.y < STUCK_ALTITUDE;
            if !(fused || stuck) {
                index += 1;
                continue;
            }

            let projectile = state.active_projectiles.remove(index);
            // The spent body stays parked in the runtime, disabled; the
            // magazine bounds how many can ever pile up.
            physics.set_enabled(projectile.body, false);

            let explosion = Explosion::from_detonation(position, projectile.explosion_intensity, now);
            events.push(Detonation {
                position,
                radius: explosion.radius,
                intensity: projectile.explosion_intensity,
            });
            log::info!(
                "bomb {} detonated at ({:.1}, {:.1}, {:.1}), radius {:.1}",
                projectile.id,
                position.x,
                position.y,
                position.z,
                explosion.radius
            );
            state.explosions.push(explosion);
        }
        events
    }

    /// Decay the shared cooldown; reopen the fire gate once the remainder
    /// is within one frame of zero, and not before.
    pub fn update_cooldown(&self, state: &mut GameState, dt: f32) {
        if state.shoot_cooldown > 0.0 {
            state.shoot_cooldown -= dt;
            if state.shoot_cooldown <= dt {
                state.shoot_cooldown = 0.0;
                state.can_shoot = true;
            }
        }
    }
}

impl Default for ProjectileSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;
    /// Long enough for the 6 Hz check cadence to fire.
    const CHECK_DT: f32 = 0.2;

    fn setup() -> (PhysicsWorld, GameState, ProjectileSystem) {
        (PhysicsWorld::new(), GameState::new(), ProjectileSystem::new())
    }

    fn fire(
        system: &mut ProjectileSystem,
        state: &mut GameState,
        physics: &mut PhysicsWorld,
        now: f64,
    ) -> bool {
        system.try_fire(state, physics, Vec3::new(0.0, 1.0, 0.0), 0.0, now)
    }

    #[test]
    fn successful_fire_mutates_state() {
        let (mut physics, mut state, mut system) = setup();
        state.ammo = 3;
        assert!(fire(&mut system, &mut state, &mut physics, 1.0));
        assert_eq!(state.ammo, 2);
        assert_eq!(state.active_projectiles.len(), 1);
        assert!(!state.can_shoot);
        assert_eq!(state.shoot_cooldown, SHOOT_COOLDOWN);

        let projectile = &state.active_projectiles[0];
        let velocity = physics.linvel(projectile.body).unwrap();
        assert!(velocity.z > 10.0, "launch speed along facing");
        assert!(velocity.y > VERTICAL_BOOST, "arc plus boost lifts the bomb");
    }

    #[test]
    fn empty_magazine_blocks_fire() {
        let (mut physics, mut state, mut system) = setup();
        state.ammo = 0;
        assert!(!fire(&mut system, &mut state, &mut physics, 1.0));
        assert_eq!(state.ammo, 0);
        assert!(state.active_projectiles.is_empty());
    }

    #[test]
    fn closed_gate_blocks_fire() {
        let (mut physics, mut state, mut system) = setup();
        state.can_shoot = false;
        assert!(!fire(&mut system, &mut state, &mut physics, 1.0));
        assert_eq!(state.ammo, crate::state::MAX_AMMO);
        assert!(state.active_projectiles.is_empty());
    }

    #[test]
    fn rapid_refire_is_ignored() {
        let (mut physics, mut state, mut system) = setup();
        assert!(fire(&mut system, &mut state, &mut physics, 1.0));
        // Reopen the state gate; the fire-interval gate must still hold.
        state.can_shoot = true;
        assert!(!fire(&mut system, &mut state, &mut physics, 1.2));
        assert_eq!(state.ammo, crate::state::MAX_AMMO - 1);
        assert!(fire(&mut system, &mut state, &mut physics, 1.31));
    }

    #[test]
    fn in_flight_cap_blocks_sixth_bomb() {
        let (mut physics, mut state, mut system) = setup();
        for shot in 0..5 {
            state.can_shoot = true;
            assert!(fire(&mut system, &mut state, &mut physics, shot as f64));
        }
        state.can_shoot = true;
        assert!(!fire(&mut system, &mut state, &mut physics, 10.0));
        assert_eq!(state.active_projectiles.len(), MAX_ACTIVE_PROJECTILES);
        assert_eq!(state.ammo, crate::state::MAX_AMMO - 5);
    }

    #[test]
    fn cooldown_decays_monotonically_and_reopens_gate_once() {
        let (_, mut state, system) = (PhysicsWorld::new(), GameState::new(), ProjectileSystem::new());
        state.can_shoot = false;
        state.shoot_cooldown = SHOOT_COOLDOWN;

        let mut previous = state.shoot_cooldown;
        let mut reopened_at_frame = None;
        for frame in 0..30 {
            system.update_cooldown(&mut state, DT);
            assert!(state.shoot_cooldown <= previous, "cooldown must not grow");
            previous = state.shoot_cooldown;
            if state.can_shoot && reopened_at_frame.is_none() {
                reopened_at_frame = Some(frame);
                assert_eq!(state.shoot_cooldown, 0.0);
            }
        }
        // 0.3s at 60 fps: the gate reopens only once the remainder fits in
        // a single frame, around frame 16, never earlier.
        let frame = reopened_at_frame.expect("gate never reopened");
        assert!((15..=17).contains(&frame), "reopened at frame {}", frame);
    }

    #[test]
    fn fuse_timeout_detonates_regardless_of_motion() {
        let (mut physics, mut state, mut system) = setup();
        assert!(fire(&mut system, &mut state, &mut physics, 0.0));
        state.active_projectiles[0].age = 5.1;

        let events = system.update(&mut state, &mut physics, 5.1, CHECK_DT);
        assert_eq!(events.len(), 1);
        assert!(state.active_projectiles.is_empty());
        assert_eq!(state.explosions.len(), 1);
    }

    #[test]
    fn stuck_bomb_detonates_before_fuse() {
        let (mut physics, mut state, mut system) = setup();
        assert!(fire(&mut system, &mut state, &mut physics, 0.0));
        let body = state.active_projectiles[0].body;
        physics.set_translation(body, Vec3::new(2.0, 0.5, 2.0));
        physics.set_linvel(body, Vec3::new(0.2, 0.0, 0.0));
        state.active_projectiles[0].age = 1.0;

        let events = system.update(&mut state, &mut physics, 1.0, CHECK_DT);
        assert_eq!(events.len(), 1);
        assert!(state.active_projectiles.is_empty());
        // The body takes no further part in the simulation.
        assert_eq!(physics.is_enabled(body), Some(false));
    }

    #[test]
    fn slow_but_high_bomb_keeps_flying() {
        let (mut physics, mut state, mut system) = setup();
        assert!(fire(&mut system, &mut state, &mut physics, 0.0));
        let body = state.active_projectiles[0].body;
        physics.set_translation(body, Vec3::new(2.0, 6.0, 2.0));
        physics.set_linvel(body, Vec3::new(0.1, -1.0, 0.0));
        state.active_projectiles[0].age = 1.0;

        let events = system.update(&mut state, &mut physics, 1.0, CHECK_DT);
        assert!(events.is_empty());
        assert_eq!(state.active_projectiles.len(), 1);
    }

    #[test]
    fn fast_and_low_bomb_keeps_flying() {
        let (mut physics, mut state, mut system) = setup();
        assert!(fire(&mut system, &mut state, &mut physics, 0.0));
        let body = state.active_projectiles[0].body;
        physics.set_translation(body, Vec3::new(2.0, 0.5, 2.0));
        physics.set_linvel(body, Vec3::new(3.0, 0.0, 0.0));
        state.active_projectiles[0].age = 1.0;

        let events = system.update(&mut state, &mut physics, 1.0, CHECK_DT);
        assert!(events.is_empty());
        assert_eq!(state.active_projectiles.len(), 1);
    }

    #[test]
    fn checks_wait_for_the_cadence() {
        let (mut physics, mut state, mut system) = setup();
        assert!(fire(&mut system, &mut state, &mut physics, 0.0));
        state.active_projectiles[0].age = 6.0;

        // One ordinary frame is under the 6 Hz interval: no check yet.
        let events = system.update(&mut state, &mut physics, 6.0, DT);
        assert!(events.is_empty());
        assert_eq!(state.active_projectiles.len(), 1);
    }

    #[test]
    fn detonation_captures_launch_intensity() {
        let (mut physics, mut state, mut system) = setup();
        state.explosion_intensity = 2.0;
        assert!(fire(&mut system, &mut state, &mut physics, 0.0));
        // Later tweaks must not affect bombs already in flight.
        state.explosion_intensity = 0.5;
        state.active_projectiles[0].age = 5.1;

        let events = system.update(&mut state, &mut physics, 5.1, CHECK_DT);
        assert_eq!(events[0].intensity, 2.0);
        assert_eq!(events[0].radius, 20.0);
        assert_eq!(state.explosions[0].radius, 20.0);
        assert_eq!(state.explosions[0].strength, 30.0);
    }

    #[test]
    fn projectile_ids_are_unique_and_monotonic() {
        let (mut physics, mut state, mut system) = setup();
        for shot in 0..3 {
            state.can_shoot = true;
            assert!(fire(&mut system, &mut state, &mut physics, shot as f64));
        }
        let ids: Vec<u64> = state.active_projectiles.iter().map(|p| p.id).collect();
        assert!(ids.windows(2).all(|pair| pair[1] > pair[0]));
    }
}
