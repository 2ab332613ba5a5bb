//! Common ECS components shared across gameplay systems.

/// A key the character can pick up. Lives on a course entity together with
/// its `Transform`; despawned once collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collectible {
    pub key_id: u32,
}

impl Collectible {
    pub fn new(key_id: u32) -> Self {
        Self { key_id }
    }
}

/// Tag component for dynamic course obstacles whose transforms are driven by
/// the physics runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct Obstacle;
