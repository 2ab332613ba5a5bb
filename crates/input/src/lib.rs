//! Input handling for keyboard, mouse, and touch-style pointer dragging.
//!
//! Raw key and pointer events are folded into an [`InputState`]; once per
//! frame the state is aggregated into a [`CharacterIntent`] that the
//! locomotion controller consumes. With no input devices attached the
//! intent is all zero.

use glam::Vec2;
use std::collections::HashSet;

/// Pointer axes below this magnitude are treated as zero.
pub const DEAD_ZONE: f32 = 0.1;

/// Pointer-derived movement beyond this magnitude on an axis promotes the
/// intent to a run.
const AUTO_RUN_THRESHOLD: f32 = 0.5;

/// Button held to steer by dragging; its press edge is also the fire action.
pub const DRAG_BUTTON: MouseButton = MouseButton::Left;

/// Button held to orbit the camera.
pub const LOOK_BUTTON: MouseButton = MouseButton::Right;

/// Named input actions the game binds keys to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
    Run,
    Jump,
}

/// Maps named actions to the keys that trigger them.
#[derive(Debug, Clone)]
pub struct ActionMap {
    bindings: Vec<(Action, Vec<KeyCode>)>,
}

impl Default for ActionMap {
    /// Arrow keys + WASD for movement, Shift to run, Space to jump.
    fn default() -> Self {
        Self {
            bindings: vec![
                (Action::Forward, vec![KeyCode::ArrowUp, KeyCode::KeyW]),
                (Action::Backward, vec![KeyCode::ArrowDown, KeyCode::KeyS]),
                (Action::Left, vec![KeyCode::ArrowLeft, KeyCode::KeyA]),
                (Action::Right, vec![KeyCode::ArrowRight, KeyCode::KeyD]),
                (Action::Run, vec![KeyCode::ShiftLeft, KeyCode::ShiftRight]),
                (Action::Jump, vec![KeyCode::Space]),
            ],
        }
    }
}

impl ActionMap {
    /// Keys bound to an action. Unbound actions yield an empty slice.
    pub fn keys(&self, action: Action) -> &[KeyCode] {
        self.bindings
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, keys)| keys.as_slice())
            .unwrap_or(&[])
    }
}

/// Per-frame movement/camera intent produced by the aggregator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CharacterIntent {
    /// Lateral movement axis. Keyboard gives ±1, pointer dragging a
    /// continuous value.
    pub move_x: f32,
    /// Forward movement axis, same conventions as `move_x`.
    pub move_z: f32,
    pub run: bool,
    pub jump: bool,
    /// One-shot fire request (press edge of the drag button).
    pub fire: bool,
    /// Horizontal look-drag delta this frame, in raw pixels. The camera
    /// controller scales and accumulates it.
    pub camera_yaw_delta: f32,
}

impl CharacterIntent {
    pub fn is_moving(&self) -> bool {
        self.move_x != 0.0 || self.move_z != 0.0
    }
}

/// Manages input state for the current frame.
#[derive(Debug)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
    /// Keys released this frame.
    keys_released: HashSet<KeyCode>,

    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,
    /// Mouse buttons pressed this frame.
    mouse_pressed: HashSet<MouseButton>,
    /// Mouse buttons released this frame.
    mouse_released: HashSet<MouseButton>,

    /// Pointer position in window coordinates.
    pointer_position: Vec2,
    /// Window size used to normalize the pointer position.
    window_size: Vec2,
    /// Pointer motion accumulated this frame while the look button is held.
    look_delta: Vec2,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_held: HashSet::new(),
            keys_pressed: HashSet::new(),
            keys_released: HashSet::new(),
            mouse_held: HashSet::new(),
            mouse_pressed: HashSet::new(),
            mouse_released: HashSet::new(),
            pointer_position: Vec2::ZERO,
            window_size: Vec2::new(1.0, 1.0),
            look_delta: Vec2::ZERO,
        }
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.mouse_released.clear();
        self.look_delta = Vec2::ZERO;
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
                self.keys_released.insert(key);
            }
        }
    }

    /// Process a mouse button event. Touch start/end map onto the drag
    /// button so touch devices steer the same way.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.mouse_held.contains(&button) {
                    self.mouse_pressed.insert(button);
                }
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
                self.mouse_released.insert(button);
            }
        }
    }

    /// Process raw pointer motion. Only accumulates while the look button
    /// is held; the drag-movement path reads the absolute position instead.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        if self.mouse_held.contains(&LOOK_BUTTON) {
            self.look_delta.x += delta.0 as f32;
            self.look_delta.y += delta.1 as f32;
        }
    }

    /// Process a cursor position update, in window coordinates.
    pub fn process_cursor_position(&mut self, position: (f64, f64)) {
        self.pointer_position = Vec2::new(position.0 as f32, position.1 as f32);
    }

    /// Record the window size used to normalize pointer coordinates.
    pub fn set_window_size(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.window_size = Vec2::new(width, height);
        }
    }

    // Query methods

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key was released this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Check if a mouse button is held.
    pub fn is_mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Check if a mouse button was pressed this frame.
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    /// Check if any key bound to an action is held.
    pub fn action_held(&self, map: &ActionMap, action: Action) -> bool {
        map.keys(action).iter().any(|key| self.is_key_held(*key))
    }

    /// Pointer position normalized to [-1, 1] per axis, +Y toward the top
    /// of the window.
    pub fn pointer_normalized(&self) -> Vec2 {
        Vec2::new(
            2.0 * self.pointer_position.x / self.window_size.x - 1.0,
            -(2.0 * self.pointer_position.y / self.window_size.y - 1.0),
        )
    }

    /// Aggregate the current state into this frame's [`CharacterIntent`].
    pub fn intent(&self, map: &ActionMap) -> CharacterIntent {
        let mut move_x = 0.0;
        let mut move_z = 0.0;

        if self.action_held(map, Action::Forward) {
            move_z = 1.0;
        }
        if self.action_held(map, Action::Backward) {
            move_z = -1.0;
        }

        let mut run = self.action_held(map, Action::Run);

        // Drag steering: lateral axis is dead-zoned independently, the
        // forward axis gets a bias so a centered drag still walks forward.
        let pointer = self.pointer_normalized();
        if self.is_mouse_held(DRAG_BUTTON)
            && (pointer.x.abs() > DEAD_ZONE || pointer.y.abs() > DEAD_ZONE)
        {
            if pointer.x.abs() > DEAD_ZONE {
                move_x = -pointer.x;
            }
            move_z = pointer.y + 0.4;
            if move_x.abs() > AUTO_RUN_THRESHOLD || move_z.abs() > AUTO_RUN_THRESHOLD {
                run = true;
            }
        }

        // Keyboard strafing overrides the pointer-derived lateral axis.
        if self.action_held(map, Action::Left) {
            move_x = 1.0;
        }
        if self.action_held(map, Action::Right) {
            move_x = -1.0;
        }

        CharacterIntent {
            move_x,
            move_z,
            run,
            jump: self.action_held(map, Action::Jump),
            fire: self.is_mouse_pressed(DRAG_BUTTON),
            camera_yaw_delta: self.look_delta.x,
        }
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed(input: &mut InputState, key: KeyCode) {
        input.process_keyboard(key, ElementState::Pressed);
    }

    #[test]
    fn no_devices_yield_zero_intent() {
        let input = InputState::new();
        assert_eq!(input.intent(&ActionMap::default()), CharacterIntent::default());
    }

    #[test]
    fn keyboard_movement_axes() {
        let map = ActionMap::default();
        let mut input = InputState::new();
        pressed(&mut input, KeyCode::KeyW);
        pressed(&mut input, KeyCode::KeyA);
        let intent = input.intent(&map);
        assert_eq!(intent.move_z, 1.0);
        assert_eq!(intent.move_x, 1.0);
        assert!(!intent.run);

        pressed(&mut input, KeyCode::ShiftLeft);
        assert!(input.intent(&map).run);
    }

    #[test]
    fn pointer_inside_dead_zone_is_ignored() {
        let map = ActionMap::default();
        let mut input = InputState::new();
        input.set_window_size(200.0, 200.0);
        input.process_mouse_button(DRAG_BUTTON, ElementState::Pressed);
        // Center of the window: both normalized axes are 0.
        input.process_cursor_position((100.0, 100.0));
        let intent = input.intent(&map);
        assert_eq!(intent.move_x, 0.0);
        assert_eq!(intent.move_z, 0.0);
    }

    #[test]
    fn pointer_drag_steers_and_promotes_to_run() {
        let map = ActionMap::default();
        let mut input = InputState::new();
        input.set_window_size(200.0, 200.0);
        input.process_mouse_button(DRAG_BUTTON, ElementState::Pressed);
        // Far right edge: normalized x = 1.0 -> move_x = -1.0, auto-run.
        input.process_cursor_position((200.0, 100.0));
        let intent = input.intent(&map);
        assert_eq!(intent.move_x, -1.0);
        assert!((intent.move_z - 0.4).abs() < 1e-6);
        assert!(intent.run);
    }

    #[test]
    fn pointer_without_drag_button_does_nothing() {
        let map = ActionMap::default();
        let mut input = InputState::new();
        input.set_window_size(200.0, 200.0);
        input.process_cursor_position((200.0, 100.0));
        assert!(!input.intent(&map).is_moving());
    }

    #[test]
    fn look_delta_only_accumulates_while_look_button_held() {
        let map = ActionMap::default();
        let mut input = InputState::new();
        input.process_mouse_motion((10.0, 0.0));
        assert_eq!(input.intent(&map).camera_yaw_delta, 0.0);

        input.process_mouse_button(LOOK_BUTTON, ElementState::Pressed);
        input.process_mouse_motion((10.0, 0.0));
        input.process_mouse_motion((5.0, 0.0));
        assert_eq!(input.intent(&map).camera_yaw_delta, 15.0);

        input.begin_frame();
        assert_eq!(input.intent(&map).camera_yaw_delta, 0.0);
    }

    #[test]
    fn fire_is_a_press_edge() {
        let map = ActionMap::default();
        let mut input = InputState::new();
        input.process_mouse_button(DRAG_BUTTON, ElementState::Pressed);
        assert!(input.intent(&map).fire);
        input.begin_frame();
        // Still held, but no longer a fresh press.
        assert!(!input.intent(&map).fire);
    }
}
