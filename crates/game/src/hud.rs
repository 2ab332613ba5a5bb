//! Read-only HUD view of gameplay state.
//!
//! Overlay collaborators render from this snapshot; none of them ever hold
//! a mutable handle to the store.

/// Per-frame HUD values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudSnapshot {
    pub ammo: u32,
    pub max_ammo: u32,
    pub can_shoot: bool,
    pub shoot_cooldown: f32,
    pub keys_collected: usize,
    pub total_keys: u32,
}

impl HudSnapshot {
    /// Ammo counter text, e.g. "3/10".
    pub fn ammo_display(&self) -> String {
        format!("{}/{}", self.ammo, self.max_ammo)
    }

    /// Weapon status line.
    pub fn status_display(&self) -> &'static str {
        if self.can_shoot {
            "Ready"
        } else {
            "Reloading..."
        }
    }

    /// Remaining cooldown as a fraction of the full window, for bar widgets.
    pub fn cooldown_fraction(&self) -> f32 {
        (self.shoot_cooldown / crate::projectile::SHOOT_COOLDOWN).clamp(0.0, 1.0)
    }

    /// Key counter text, e.g. "2/3".
    pub fn keys_display(&self) -> String {
        format!("{}/{}", self.keys_collected, self.total_keys)
    }
}
