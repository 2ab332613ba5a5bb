//! Physics runtime collaborator built on Rapier3D.
//!
//! The gameplay core talks to the runtime through the narrow command surface
//! on [`PhysicsWorld`]: spawn bodies with declared collider parameters, read
//! and write velocities and positions, take bodies out of simulation, step.
//! Stale or missing handles are per-frame no-ops, never errors.

pub mod collision;
pub mod physics_world;

pub use collision::*;
pub use physics_world::*;

pub use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};
