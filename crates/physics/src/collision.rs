//! Collision groups and filtering.

use rapier3d::prelude::*;

/// Collision groups for the different body kinds in the course.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Static course geometry (buildings, platforms, ground, walls)
    Environment = 1 << 0,
    /// Player character capsule
    Character = 1 << 1,
    /// Bomb projectiles
    Projectile = 1 << 2,
    /// Dynamic course obstacles
    Obstacle = 1 << 3,
}

impl CollisionGroup {
    /// Membership/filter pair for static environment. Collides with everything.
    pub fn environment() -> (Group, Group) {
        let membership = Group::from_bits_retain(Self::Environment as u32);
        let filter = Group::ALL;
        (membership, filter)
    }

    /// Membership/filter pair for the character capsule.
    pub fn character() -> (Group, Group) {
        let membership = Group::from_bits_retain(Self::Character as u32);
        let filter = Group::from_bits_retain(Self::Environment as u32 | Self::Obstacle as u32);
        (membership, filter)
    }

    /// Membership/filter pair for bomb projectiles. Bombs fly through the
    /// character that launched them; knockback comes from the explosion
    /// force field, not contact.
    pub fn projectile() -> (Group, Group) {
        let membership = Group::from_bits_retain(Self::Projectile as u32);
        let filter = Group::from_bits_retain(Self::Environment as u32 | Self::Obstacle as u32);
        (membership, filter)
    }

    /// Membership/filter pair for dynamic obstacles.
    pub fn obstacle() -> (Group, Group) {
        let membership = Group::from_bits_retain(Self::Obstacle as u32);
        let filter = Group::ALL;
        (membership, filter)
    }
}

/// Component linking an ECS entity to its physics handles.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub rigid_body: RigidBodyHandle,
    pub collider: Option<ColliderHandle>,
}

impl PhysicsBody {
    pub fn new(rigid_body: RigidBodyHandle) -> Self {
        Self {
            rigid_body,
            collider: None,
        }
    }

    pub fn with_collider(rigid_body: RigidBodyHandle, collider: ColliderHandle) -> Self {
        Self {
            rigid_body,
            collider: Some(collider),
        }
    }
}
