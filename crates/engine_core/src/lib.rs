//! Core simulation types for bombpark.
//!
//! This crate provides the foundational types used across all gameplay systems:
//! - Transform and spatial components
//! - Time management and fixed-rate cadences
//! - Angle math for yaw smoothing

pub mod components;
pub mod math;
pub mod time;
pub mod transform;

pub use components::*;
pub use math::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use hecs::{Entity, World};
