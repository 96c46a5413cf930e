//! Local-frame axis conventions shared by the look and locomotion integrators.

use glam::Vec3;

/// World and local up axis.
pub const UP: Vec3 = Vec3::Y;
/// Local right axis.
pub const RIGHT: Vec3 = Vec3::X;
/// Local forward axis (glam right-handed: the camera looks down -Z).
pub const FORWARD: Vec3 = Vec3::NEG_Z;
