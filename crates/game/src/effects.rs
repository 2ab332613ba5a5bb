//! Explosion burst particles: visual feedback only, no gameplay effect.

use glam::Vec3;
use rand::Rng;

use crate::projectile::Detonation;

/// Particle count per blast at intensity 1.0.
const PARTICLES_PER_BURST: f32 = 20.0;
/// Seconds a burst particle lives.
const PARTICLE_LIFE: f32 = 2.0;
/// Gravity pulling burst particles back down.
const PARTICLE_GRAVITY: f32 = 9.81;

pub struct BurstParticle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub life: f32,
    pub color: [f32; 3],
}

/// All live burst particles across blasts.
pub struct ExplosionBurst {
    pub particles: Vec<BurstParticle>,
}

impl ExplosionBurst {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
        }
    }

    /// Spawn a burst for a detonation; the count scales with intensity.
    pub fn spawn(&mut self, detonation: &Detonation) {
        let mut rng = rand::thread_rng();
        let count = (PARTICLES_PER_BURST * detonation.intensity).round().max(1.0) as usize;
        for _ in 0..count {
            let velocity = Vec3::new(
                (rng.gen::<f32>() - 0.5) * 15.0,
                rng.gen::<f32>() * 12.0 + 5.0,
                (rng.gen::<f32>() - 0.5) * 15.0,
            );
            let roll: f32 = rng.gen();
            let color = if roll > 0.7 {
                [1.0, 0.27, 0.27] // ember red
            } else if roll > 0.4 {
                [1.0, 0.67, 0.0] // flame orange
            } else {
                [1.0, 1.0, 1.0] // flash white
            };
            self.particles.push(BurstParticle {
                position: detonation.position,
                velocity,
                life: PARTICLE_LIFE,
                color,
            });
        }
    }

    /// Integrate and expire particles.
    pub fn update(&mut self, dt: f32) {
        for particle in &mut self.particles {
            particle.position += particle.velocity * dt;
            particle.velocity.y -= PARTICLE_GRAVITY * dt;
            particle.life -= dt;
        }
        self.particles.retain(|particle| particle.life > 0.0);
    }
}

impl Default for ExplosionBurst {
    fn default() -> Self {
        Self::new()
    }
}
