//! Shared gameplay state: the single store every system reads and writes.
//!
//! Field ownership is one writer per field. The locomotion controller owns
//! `character_position` and `container_rotation`; the projectile subsystem
//! owns `ammo`, `can_shoot`, `shoot_cooldown`, and `active_projectiles` and
//! authors `explosions`; the explosion force field only prunes `explosions`;
//! key collection owns `collected_keys`.

use engine_core::Vec3;
use physics::RigidBodyHandle;
use std::collections::HashSet;

use crate::hud::HudSnapshot;

/// Magazine capacity. Reload policy belongs to the host, not the core.
pub const MAX_AMMO: u32 = 10;
/// At most this many bombs may be in flight at once.
pub const MAX_ACTIVE_PROJECTILES: usize = 5;
/// Blast radius at intensity 1.0.
pub const BASE_EXPLOSION_RADIUS: f32 = 10.0;
/// Blast strength at intensity 1.0.
pub const BASE_EXPLOSION_STRENGTH: f32 = 15.0;
/// Explosions stop exerting force and are pruned past this age (seconds).
pub const MAX_EXPLOSION_AGE: f64 = 2.0;

/// A bomb in flight. Flight itself belongs to the physics runtime; the
/// record tracks identity, age, and the intensity captured at launch.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u64,
    pub spawn_position: Vec3,
    pub initial_direction: Vec3,
    pub age: f32,
    pub explosion_intensity: f32,
    pub body: RigidBodyHandle,
}

/// The lingering force-field source left behind by a detonation.
#[derive(Debug, Clone)]
pub struct Explosion {
    pub position: Vec3,
    pub radius: f32,
    pub strength: f32,
    /// Simulation-clock seconds at detonation.
    pub created_at: f64,
}

impl Explosion {
    /// Build the record for a detonation, scaling radius and strength by
    /// the projectile's intensity.
    pub fn from_detonation(position: Vec3, intensity: f32, now: f64) -> Self {
        Self {
            position,
            radius: BASE_EXPLOSION_RADIUS * intensity,
            strength: BASE_EXPLOSION_STRENGTH * intensity,
            created_at: now,
        }
    }

    /// Age in seconds at `now`.
    pub fn age(&self, now: f64) -> f64 {
        now - self.created_at
    }
}

/// Process-wide mutable gameplay state, one instance per session.
pub struct GameState {
    /// Character world position, published every frame by locomotion.
    pub character_position: Vec3,
    /// Yaw of the character's facing container.
    pub container_rotation: f32,
    /// Keys picked up so far. Union-only; mutate through [`Self::collect_key`].
    collected_keys: HashSet<u32>,
    pub ammo: u32,
    pub can_shoot: bool,
    /// Seconds left before the next shot is allowed.
    pub shoot_cooldown: f32,
    /// Bombs in flight, insertion order.
    pub active_projectiles: Vec<Projectile>,
    /// Live blast records, insertion order, pruned by the force field.
    pub explosions: Vec<Explosion>,
    /// Live-tunable blast multiplier, kept within [0.1, 3.0].
    pub explosion_intensity: f32,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            character_position: Vec3::ZERO,
            container_rotation: 0.0,
            collected_keys: HashSet::new(),
            ammo: MAX_AMMO,
            can_shoot: true,
            shoot_cooldown: 0.0,
            active_projectiles: Vec::new(),
            explosions: Vec::new(),
            explosion_intensity: 1.0,
        }
    }

    /// Record a key as collected. Idempotent; returns true only the first
    /// time a given id is seen.
    pub fn collect_key(&mut self, key_id: u32) -> bool {
        self.collected_keys.insert(key_id)
    }

    /// Whether a key id has been collected.
    pub fn has_key(&self, key_id: u32) -> bool {
        self.collected_keys.contains(&key_id)
    }

    /// Number of distinct keys collected.
    pub fn keys_collected(&self) -> usize {
        self.collected_keys.len()
    }

    /// Read-only view for HUD collaborators.
    pub fn hud(&self, total_keys: u32) -> HudSnapshot {
        HudSnapshot {
            ammo: self.ammo,
            max_ammo: MAX_AMMO,
            can_shoot: self.can_shoot,
            shoot_cooldown: self.shoot_cooldown,
            keys_collected: self.keys_collected(),
            total_keys,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
