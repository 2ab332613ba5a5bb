//! bombpark demo binary: a headless scripted run over the rooftop course.
//!
//! Synthesizes keyboard and mouse events through the real input aggregator
//! and steps the simulation at a fixed 60 Hz, logging HUD state and
//! detonations. Useful for exercising the whole core without a renderer.

use anyhow::Result;
use engine_core::Time;
use game::config::GameConfig;
use game::Game;
use input::{ActionMap, ElementState, InputState, KeyCode, MouseButton};

const DT: f32 = 1.0 / 60.0;
const DEMO_SECONDS: usize = 12;

fn main() -> Result<()> {
    env_logger::init();

    let config = GameConfig::load();
    let mut game = Game::new(config);
    load_sfx(&mut game);

    let map = ActionMap::default();
    let mut input = InputState::new();
    input.set_window_size(1280.0, 720.0);
    input.process_cursor_position((640.0, 360.0));

    log::info!("bombpark demo: {} second scripted run", DEMO_SECONDS);

    let mut time = Time::new();
    for frame in 0..DEMO_SECONDS * 60 {
        time.update();
        input.begin_frame();
        script(&mut input, frame);

        let intent = input.intent(&map);
        let detonations = game.frame(&intent, DT);
        for detonation in &detonations {
            log::info!(
                "boom at ({:.1}, {:.1}, {:.1}), radius {:.1}",
                detonation.position.x,
                detonation.position.y,
                detonation.position.z,
                detonation.radius
            );
        }

        if frame % 60 == 0 {
            let hud = game.hud();
            let position = game.state.character_position;
            log::info!(
                "t={:>2}s pos=({:.1}, {:.1}, {:.1}) ammo={} keys={}",
                frame / 60,
                position.x,
                position.y,
                position.z,
                hud.ammo_display(),
                hud.keys_display()
            );
        }
    }

    let hud = game.hud();
    log::info!(
        "demo done in {:.2}s wall time: ammo {}, keys {}, {} bombs still flying",
        time.elapsed_seconds(),
        hud.ammo_display(),
        hud.keys_display(),
        game.state.active_projectiles.len()
    );
    Ok(())
}

/// Register whatever sound files are present next to the binary. Missing
/// files just mean a quieter demo.
fn load_sfx(game: &mut Game) {
    let Some(audio) = game.audio.as_mut() else {
        return;
    };
    for (name, file) in [
        ("bazooka_fire", "assets/sfx/bazooka_fire.ogg"),
        ("explosion", "assets/sfx/explosion.ogg"),
        ("key_pickup", "assets/sfx/key_pickup.ogg"),
    ] {
        let path = std::path::Path::new(file);
        if path.exists() {
            if let Err(err) = audio.load_sound(name, path) {
                log::debug!("could not load {}: {}", file, err);
            }
        }
    }
}

/// Scripted pilot: sprint east along the course, hop, lob a few bombs,
/// look around.
fn script(input: &mut InputState, frame: usize) {
    match frame {
        // Sprint east (the left action heads +X with the default yaw).
        0 => {
            input.process_keyboard(KeyCode::KeyA, ElementState::Pressed);
            input.process_keyboard(KeyCode::ShiftLeft, ElementState::Pressed);
        }
        // Hop the first gap.
        90 => input.process_keyboard(KeyCode::Space, ElementState::Pressed),
        100 => input.process_keyboard(KeyCode::Space, ElementState::Released),
        // First bomb.
        180 => input.process_mouse_button(MouseButton::Left, ElementState::Pressed),
        183 => input.process_mouse_button(MouseButton::Left, ElementState::Released),
        // Drag the camera around while still running.
        240 => input.process_mouse_button(MouseButton::Right, ElementState::Pressed),
        300 => input.process_mouse_button(MouseButton::Right, ElementState::Released),
        // Two more bombs; the second lands inside the refire window and is
        // swallowed by the gate.
        360 => input.process_mouse_button(MouseButton::Left, ElementState::Pressed),
        363 => input.process_mouse_button(MouseButton::Left, ElementState::Released),
        368 => input.process_mouse_button(MouseButton::Left, ElementState::Pressed),
        371 => input.process_mouse_button(MouseButton::Left, ElementState::Released),
        // Ease off and coast out the rest of the run.
        540 => {
            input.process_keyboard(KeyCode::KeyA, ElementState::Released);
            input.process_keyboard(KeyCode::ShiftLeft, ElementState::Released);
        }
        _ => {}
    }

    // Feed look-drag motion while the right button is down.
    if (240..300).contains(&frame) {
        input.process_mouse_motion((4.0, 0.0));
    }
}
