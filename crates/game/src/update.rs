//! The game context and per-frame simulation advance.
//!
//! One `frame` call runs every pass exactly once, in a fixed order:
//! explosion forces land on the character velocity before movement input
//! integrates, so a single frame reflects both effects additively on the
//! same velocity vector. Detonations produced this frame start pushing on
//! the next force pass.

use audio::AudioSystem;
use engine_core::{Vec3, World};
use input::CharacterIntent;
use physics::PhysicsWorld;

use crate::camera::FollowCamera;
use crate::collectibles;
use crate::config::GameConfig;
use crate::course::{self, Course};
use crate::effects::ExplosionBurst;
use crate::explosion::ExplosionField;
use crate::hud::HudSnapshot;
use crate::locomotion::CharacterController;
use crate::projectile::{Detonation, ProjectileSystem};
use crate::state::GameState;

/// Character capsule half height and radius.
const CHARACTER_CAPSULE: (f32, f32) = (0.3, 0.3);

/// Everything a running session owns. Dropping it tears down bodies,
/// projectiles, and pending animation state together; nothing outlives it.
pub struct Game {
    pub config: GameConfig,
    pub physics: PhysicsWorld,
    pub world: World,
    pub state: GameState,
    pub course: Course,
    pub character: CharacterController,
    pub camera: FollowCamera,
    pub projectiles: ProjectileSystem,
    pub explosion_field: ExplosionField,
    pub effects: ExplosionBurst,
    pub audio: Option<AudioSystem>,
    /// Simulation-clock seconds, advanced by `frame`.
    clock: f64,
}

impl Game {
    /// Build the course and character. Audio failure leaves the game
    /// silent rather than dead.
    pub fn new(config: GameConfig) -> Self {
        let config = config.clamped();
        let mut physics = PhysicsWorld::new();
        let mut world = World::new();
        let course = course::build(&mut world, &mut physics);

        let body = physics.add_character_body(
            course.spawn_point,
            CHARACTER_CAPSULE.0,
            CHARACTER_CAPSULE.1,
        );
        let character = CharacterController::new(body);
        let camera = FollowCamera::new(course.spawn_point, 0.0);

        let mut state = GameState::new();
        state.character_position = course.spawn_point;
        state.explosion_intensity = config.explosion_intensity;

        let audio = match AudioSystem::new() {
            Ok(mut audio) => {
                audio.set_master_volume(config.master_volume as f64);
                Some(audio)
            }
            Err(err) => {
                log::warn!("audio disabled: {}", err);
                None
            }
        };

        Self {
            config,
            physics,
            world,
            state,
            course,
            character,
            camera,
            projectiles: ProjectileSystem::new(),
            explosion_field: ExplosionField::new(),
            effects: ExplosionBurst::new(),
            audio,
            clock: 0.0,
        }
    }

    /// Simulation-clock seconds since the session started.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Live-set the blast multiplier, clamped to its documented range.
    pub fn set_explosion_intensity(&mut self, intensity: f32) {
        self.state.explosion_intensity = intensity.clamp(0.1, 3.0);
    }

    /// Read-only HUD view of the current state.
    pub fn hud(&self) -> HudSnapshot {
        self.state.hud(self.course.total_keys)
    }

    /// Advance the simulation by one frame. Returns this frame's
    /// detonations so host collaborators can render shockwaves.
    pub fn frame(&mut self, intent: &CharacterIntent, dt: f32) -> Vec<Detonation> {
        self.clock += dt as f64;
        let now = self.clock;

        // Forces first, then locomotion, never more than once each.
        self.explosion_field.update(
            &mut self.state,
            &mut self.physics,
            self.character.body,
            now,
            dt,
        );
        self.character
            .update(&mut self.physics, intent, &self.config, &mut self.state, dt);

        if intent.fire {
            let origin = self.state.character_position;
            let yaw = self.character.world_yaw();
            if self
                .projectiles
                .try_fire(&mut self.state, &mut self.physics, origin, yaw, now)
            {
                self.character.trigger_shoot_anim();
                if let Some(audio) = self.audio.as_mut() {
                    audio.try_play("bazooka_fire");
                }
            }
        }

        let detonations = self
            .projectiles
            .update(&mut self.state, &mut self.physics, now, dt);
        self.projectiles.update_cooldown(&mut self.state, dt);

        for detonation in &detonations {
            self.effects.spawn(detonation);
            if let Some(audio) = self.audio.as_mut() {
                audio.try_play_at("explosion", detonation.position);
            }
        }
        self.effects.update(dt);

        collectibles::collect_keys(&mut self.world, &mut self.state, self.audio.as_mut());

        self.physics.step();
        course::sync_obstacles(&mut self.world, &self.physics);

        self.camera
            .update(self.state.character_position, self.state.container_rotation);
        if let Some(audio) = self.audio.as_mut() {
            audio.update_listener(self.camera.position, self.camera.forward(), Vec3::Y);
            audio.cleanup();
        }

        detonations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn game() -> Game {
        let mut game = Game::new(GameConfig::default());
        // Tests never want a live audio device.
        game.audio = None;
        game
    }

    #[test]
    fn fire_intent_spends_ammo_and_spawns_a_bomb() {
        let mut game = game();
        let fire = CharacterIntent {
            fire: true,
            ..Default::default()
        };
        game.frame(&fire, DT);
        assert_eq!(game.state.ammo, 9);
        assert_eq!(game.state.active_projectiles.len(), 1);
        assert!(!game.state.can_shoot);
        assert_eq!(
            game.character.animation,
            crate::locomotion::CharacterAnimation::Shoot
        );
    }

    #[test]
    fn stranded_bomb_detonates_and_leaves_an_explosion() {
        let mut game = game();
        let fire = CharacterIntent {
            fire: true,
            ..Default::default()
        };
        game.frame(&fire, DT);

        // Strand the bomb at street level with no horizontal motion.
        let body = game.state.active_projectiles[0].body;
        game.physics.set_translation(body, Vec3::new(20.0, 0.5, 0.0));
        game.physics.set_linvel(body, Vec3::ZERO);

        let idle = CharacterIntent::default();
        let mut detonations = Vec::new();
        for _ in 0..30 {
            detonations.extend(game.frame(&idle, DT));
            if !detonations.is_empty() {
                break;
            }
        }
        assert_eq!(detonations.len(), 1);
        assert!(game.state.active_projectiles.is_empty());
        assert_eq!(game.state.explosions.len(), 1);
        assert!(!game.effects.particles.is_empty(), "burst spawned");
    }

    #[test]
    fn explosions_age_out_of_the_store() {
        let mut game = game();
        game.state
            .explosions
            .push(crate::state::Explosion::from_detonation(
                Vec3::new(500.0, 0.0, 0.0),
                1.0,
                0.0,
            ));
        let idle = CharacterIntent::default();
        // 2.5 simulated seconds outlive the 2 s explosion lifetime.
        for _ in 0..150 {
            game.frame(&idle, DT);
        }
        assert!(game.state.explosions.is_empty());
    }

    #[test]
    fn nearby_explosion_shoves_the_character() {
        let mut game = game();
        let idle = CharacterIntent::default();
        game.frame(&idle, DT);

        let position = game.state.character_position;
        game.state
            .explosions
            .push(crate::state::Explosion::from_detonation(
                position - Vec3::new(2.0, 0.0, 0.0),
                1.0,
                game.clock(),
            ));
        for _ in 0..6 {
            game.frame(&idle, DT);
        }
        let velocity = game.physics.linvel(game.character.body).unwrap();
        assert!(velocity.x > 0.1, "blast should shove along +X, got {}", velocity.x);
    }

    #[test]
    fn hud_reflects_the_session() {
        let mut game = game();
        let fire = CharacterIntent {
            fire: true,
            ..Default::default()
        };
        game.frame(&fire, DT);
        let hud = game.hud();
        assert_eq!(hud.ammo_display(), "9/10");
        assert_eq!(hud.status_display(), "Reloading...");
        assert_eq!(hud.keys_display(), "0/3");
    }

    #[test]
    fn intensity_setter_clamps() {
        let mut game = game();
        game.set_explosion_intensity(99.0);
        assert_eq!(game.state.explosion_intensity, 3.0);
        game.set_explosion_intensity(0.0);
        assert_eq!(game.state.explosion_intensity, 0.1);
    }
}
