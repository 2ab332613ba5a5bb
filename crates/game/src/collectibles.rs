//! Key collection: proximity pickup into the shared key set.

use audio::AudioSystem;
use engine_core::{Collectible, Transform, World};
use hecs::Entity;

use crate::state::GameState;

/// Pickup distance in world units.
pub const PICKUP_RADIUS: f32 = 3.0;

/// Collect any keys within reach of the character. Returns how many were
/// newly collected this frame.
pub fn collect_keys(
    world: &mut World,
    state: &mut GameState,
    mut audio: Option<&mut AudioSystem>,
) -> u32 {
    let reachable: Vec<(Entity, u32)> = world
        .query::<(&Transform, &Collectible)>()
        .iter()
        .filter(|(_, (transform, _))| {
            transform.position.distance(state.character_position) < PICKUP_RADIUS
        })
        .map(|(entity, (_, collectible))| (entity, collectible.key_id))
        .collect();

    let mut collected = 0;
    for (entity, key_id) in reachable {
        if state.collect_key(key_id) {
            collected += 1;
            log::info!("key {} collected ({} total)", key_id, state.keys_collected());
            if let Some(audio) = audio.as_deref_mut() {
                audio.try_play("key_pickup");
            }
        }
        world.despawn(entity).ok();
    }
    collected
}
