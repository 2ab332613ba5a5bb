//! Gameplay configuration. Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};

/// Tunable gameplay settings. Loaded from `config.ron` in the current
/// directory; out-of-range values are clamped to their documented bounds,
/// never rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Walking speed in units/s. Range [0.1, 4.0].
    #[serde(default = "default_walk_speed")]
    pub walk_speed: f32,
    /// Running speed in units/s. Range [0.2, 12.0].
    #[serde(default = "default_run_speed")]
    pub run_speed: f32,
    /// Vertical velocity applied on jump. Range [1.0, 20.0].
    #[serde(default = "default_jump_force")]
    pub jump_force: f32,
    /// Camera yaw per pixel of look-drag. Range [0.001, 0.02].
    #[serde(default = "default_camera_rotation_speed")]
    pub camera_rotation_speed: f32,
    /// Blast radius/strength multiplier. Range [0.1, 3.0].
    #[serde(default = "default_explosion_intensity")]
    pub explosion_intensity: f32,
    /// Master audio volume. Range [0.0, 1.0].
    #[serde(default = "default_master_volume")]
    pub master_volume: f32,
}

fn default_walk_speed() -> f32 {
    0.8
}
fn default_run_speed() -> f32 {
    1.6
}
fn default_jump_force() -> f32 {
    8.0
}
fn default_camera_rotation_speed() -> f32 {
    0.005
}
fn default_explosion_intensity() -> f32 {
    1.0
}
fn default_master_volume() -> f32 {
    1.0
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            walk_speed: default_walk_speed(),
            run_speed: default_run_speed(),
            jump_force: default_jump_force(),
            camera_rotation_speed: default_camera_rotation_speed(),
            explosion_intensity: default_explosion_intensity(),
            master_volume: default_master_volume(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`, clamped. Missing or invalid files
    /// fall back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if let Ok(data) = std::fs::read_to_string(&path) {
            match ron::from_str::<GameConfig>(&data) {
                Ok(config) => return config.clamped(),
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(&path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }

    /// Clamp every tunable to its documented range.
    pub fn clamped(mut self) -> Self {
        self.walk_speed = self.walk_speed.clamp(0.1, 4.0);
        self.run_speed = self.run_speed.clamp(0.2, 12.0);
        self.jump_force = self.jump_force.clamp(1.0, 20.0);
        self.camera_rotation_speed = self.camera_rotation_speed.clamp(0.001, 0.02);
        self.explosion_intensity = self.explosion_intensity.clamp(0.1, 3.0);
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self
    }
}

fn config_path() -> std::path::PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| std::path::PathBuf::from("."))
        .join("config.ron")
}
