//! Rooftop obstacle course: fixed layout tables and world construction.
//!
//! The run heads east along +X: ten buildings of varying height joined by
//! parkour platforms, a handful of loose physics crates, and three keys
//! hovering over selected rooftops.

use engine_core::{Collectible, Obstacle, Transform, World};
use glam::Vec3;
use physics::{PhysicsBody, PhysicsWorld};

/// An axis-aligned block: center position and full extents.
struct Block {
    position: Vec3,
    size: Vec3,
}

const fn block(x: f32, y: f32, z: f32, w: f32, h: f32, d: f32) -> Block {
    Block {
        position: Vec3::new(x, y, z),
        size: Vec3::new(w, h, d),
    }
}

/// Main rooftop buildings. Centered on y=0, so half of each sits below the
/// ground slab and the roof is at half the height.
const BUILDINGS: [Block; 10] = [
    block(0.0, 0.0, 0.0, 4.0, 8.0, 4.0),
    block(8.0, 0.0, 0.0, 3.0, 6.0, 3.0),
    block(15.0, 0.0, 0.0, 5.0, 10.0, 4.0),
    block(24.0, 0.0, 0.0, 4.0, 7.0, 3.0),
    block(32.0, 0.0, 0.0, 6.0, 12.0, 5.0),
    block(42.0, 0.0, 0.0, 3.0, 5.0, 3.0),
    block(49.0, 0.0, 0.0, 4.0, 9.0, 4.0),
    block(57.0, 0.0, 0.0, 5.0, 11.0, 4.0),
    block(65.0, 0.0, 0.0, 4.0, 6.0, 4.0),
    block(73.0, 0.0, 0.0, 6.0, 14.0, 5.0),
];

/// Intermediate parkour platforms between buildings.
const PLATFORMS: [Block; 9] = [
    block(6.0, 2.0, 0.0, 1.5, 0.2, 2.0),
    block(12.0, 1.5, 0.0, 1.5, 0.2, 2.0),
    block(19.0, 3.0, 0.0, 2.0, 0.2, 2.5),
    block(28.0, 2.5, 0.0, 1.5, 0.2, 2.0),
    block(37.0, 4.0, 0.0, 2.0, 0.2, 2.5),
    block(46.0, 1.5, 0.0, 1.5, 0.2, 2.0),
    block(53.0, 3.5, 0.0, 2.0, 0.2, 2.5),
    block(61.0, 2.0, 0.0, 1.5, 0.2, 2.0),
    block(69.0, 4.5, 0.0, 2.0, 0.2, 2.5),
];

/// Suspended platforms for the harder line.
const HANGING_PLATFORMS: [Block; 4] = [
    block(11.0, 4.0, 0.0, 1.0, 0.1, 1.0),
    block(26.0, 5.0, 0.0, 1.0, 0.1, 1.0),
    block(44.0, 6.0, 0.0, 1.0, 0.1, 1.0),
    block(63.0, 5.5, 0.0, 1.0, 0.1, 1.0),
];

/// Loose crates, dynamic bodies the bombs can knock around.
const MOVING_OBSTACLES: [Block; 5] = [
    block(10.0, 1.0, 0.0, 0.5, 0.5, 0.5),
    block(21.0, 2.0, 0.0, 0.5, 0.5, 0.5),
    block(35.0, 3.0, 0.0, 0.5, 0.5, 0.5),
    block(50.0, 2.5, 0.0, 0.5, 0.5, 0.5),
    block(67.0, 3.0, 0.0, 0.5, 0.5, 0.5),
];

/// Street-level slab underneath the whole run.
const GROUND: Block = block(40.0, -0.5, 0.0, 90.0, 1.0, 10.0);

/// Side walls so a fall stays on the course.
const WALLS: [Block; 2] = [
    block(-2.0, 4.0, 0.0, 1.0, 8.0, 10.0),
    block(82.0, 4.0, 0.0, 1.0, 8.0, 10.0),
];

/// Finish block at the east end.
const FINISH: Block = block(80.0, 0.5, 0.0, 2.0, 1.0, 4.0);

/// Keys hover over the second, fifth, and eighth buildings.
const KEY_POSITIONS: [(u32, Vec3); 3] = [
    (1, Vec3::new(8.0, 4.5, 0.0)),
    (2, Vec3::new(32.0, 7.5, 0.0)),
    (3, Vec3::new(57.0, 6.5, 0.0)),
];

pub const TOTAL_KEYS: u32 = 3;

/// Handle to the built course.
pub struct Course {
    pub spawn_point: Vec3,
    pub total_keys: u32,
}

/// Build the course into the physics world and ECS world.
pub fn build(world: &mut World, physics: &mut PhysicsWorld) -> Course {
    for block in BUILDINGS
        .iter()
        .chain(PLATFORMS.iter())
        .chain(HANGING_PLATFORMS.iter())
        .chain(WALLS.iter())
        .chain([&GROUND, &FINISH])
    {
        physics.add_static_cuboid(block.position, block.size * 0.5);
    }

    for block in &MOVING_OBSTACLES {
        let body = physics.add_dynamic_cuboid(block.position, block.size * 0.5);
        world.spawn((
            Transform::from_position(block.position),
            Obstacle,
            PhysicsBody::new(body),
        ));
    }

    for (key_id, position) in KEY_POSITIONS {
        world.spawn((Transform::from_position(position), Collectible::new(key_id)));
    }

    log::info!(
        "course built: {} buildings, {} platforms, {} crates, {} keys",
        BUILDINGS.len(),
        PLATFORMS.len() + HANGING_PLATFORMS.len(),
        MOVING_OBSTACLES.len(),
        KEY_POSITIONS.len()
    );

    Course {
        // Just above the first roofline; the capsule settles onto it.
        spawn_point: Vec3::new(0.0, 4.7, 0.0),
        total_keys: TOTAL_KEYS,
    }
}

/// Copy physics-driven obstacle transforms back onto their entities.
pub fn sync_obstacles(world: &mut World, physics: &PhysicsWorld) {
    for (_, (transform, body)) in world.query_mut::<(&mut Transform, &PhysicsBody)>() {
        if let Some(updated) = physics.body_transform(body.rigid_body) {
            *transform = updated;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_spawns_expected_bodies_and_entities() {
        let mut world = World::new();
        let mut physics = PhysicsWorld::new();
        let course = build(&mut world, &mut physics);

        // 10 buildings + 9 platforms + 4 hanging + 2 walls + ground + finish
        // static colliders, plus 5 crate colliders.
        assert_eq!(physics.collider_set.len(), 27 + 5);
        assert_eq!(physics.rigid_body_set.len(), 5);

        let keys = world.query::<&Collectible>().iter().count();
        assert_eq!(keys, 3);
        let obstacles = world.query::<&PhysicsBody>().iter().count();
        assert_eq!(obstacles, 5);
        assert_eq!(course.total_keys, TOTAL_KEYS);
    }

    #[test]
    fn spawn_point_is_above_the_first_roof() {
        let mut world = World::new();
        let mut physics = PhysicsWorld::new();
        let course = build(&mut world, &mut physics);
        // First building is 8 tall centered on y=0: roof at y=4.
        assert!(course.spawn_point.y > 4.0);
        assert!(course.spawn_point.x.abs() < 2.0);
    }

    #[test]
    fn sync_obstacles_tracks_physics_bodies() {
        let mut world = World::new();
        let mut physics = PhysicsWorld::new();
        build(&mut world, &mut physics);

        // Let the crates settle/fall a little, then sync.
        for _ in 0..10 {
            physics.step();
        }
        sync_obstacles(&mut world, &physics);

        for (_, (transform, body)) in world.query::<(&Transform, &PhysicsBody)>().iter() {
            let expected = physics.body_transform(body.rigid_body).unwrap();
            assert!((transform.position - expected.position).length() < 1e-5);
        }
    }
}
