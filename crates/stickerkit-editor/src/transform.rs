//! Artwork transform state.
//!
//! The live {scale, rotation, position} of the artwork inside the cut
//! area. Mutated only by the transform engine; snapshotted verbatim by the
//! history manager.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum artwork scale
pub const MIN_SCALE: f64 = 0.5;
/// Maximum artwork scale
pub const MAX_SCALE: f64 = 3.0;

/// 2D vector in editor pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// Zero vector.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Creates a new vector.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise addition.
    pub fn add(&self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }

    /// Component-wise subtraction.
    pub fn sub(&self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle from the positive x-axis in degrees.
    pub fn angle_deg(&self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }
}

/// Wraps an angle in degrees into (-180, 180].
pub fn wrap_degrees(degrees: f64) -> f64 {
    let mut d = degrees % 360.0;
    if d <= -180.0 {
        d += 360.0;
    } else if d > 180.0 {
        d -= 360.0;
    }
    d
}

/// The live artwork transform inside the cut area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    /// Uniform scale, clamped to [0.5, 3].
    pub scale: f64,
    /// Rotation in degrees, wrapped into (-180, 180].
    pub rotation: f64,
    /// Offset from the cut-area center in editor pixels.
    pub position: Vec2,
}

impl TransformState {
    /// The identity transform: scale 1, no rotation, centered.
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            rotation: 0.0,
            position: Vec2::ZERO,
        }
    }

    /// Whether this is the identity transform.
    pub fn is_identity(&self) -> bool {
        self.scale == 1.0 && self.rotation == 0.0 && self.position == Vec2::ZERO
    }

    /// Sets the scale, clamped to the valid range.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Multiplies the scale by a ratio, clamped.
    pub fn scale_by(&mut self, ratio: f64) {
        self.set_scale(self.scale * ratio);
    }

    /// Sets the rotation, wrapped into (-180, 180].
    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = wrap_degrees(degrees);
    }

    /// Adds a rotation delta in degrees, wrapped.
    pub fn rotate_by(&mut self, delta: f64) {
        self.set_rotation(self.rotation + delta);
    }

    /// Moves the artwork by a pixel delta.
    pub fn translate_by(&mut self, delta: Vec2) {
        self.position = self.position.add(delta);
    }

    /// Whether two transforms differ beyond the given epsilons.
    /// Used to derive the unsaved-changes flag from one canonical
    /// comparison.
    pub fn diverges_from(
        &self,
        other: &TransformState,
        scale_eps: f64,
        rotation_eps: f64,
        position_eps: f64,
    ) -> bool {
        (self.scale - other.scale).abs() > scale_eps
            || wrap_degrees(self.rotation - other.rotation).abs() > rotation_eps
            || (self.position.x - other.position.x).abs() > position_eps
            || (self.position.y - other.position.y).abs() > position_eps
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for TransformState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scale {:.3} | rotation {:.1}° | position ({:.1}, {:.1})",
            self.scale, self.rotation, self.position.x, self.position.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_clamped() {
        let mut t = TransformState::identity();
        t.scale_by(10.0);
        assert_eq!(t.scale, MAX_SCALE);
        t.scale_by(0.01);
        assert_eq!(t.scale, MIN_SCALE);
    }

    #[test]
    fn test_rotation_wrapping() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(180.0), 180.0);
        assert_eq!(wrap_degrees(-180.0), 180.0);
        assert_eq!(wrap_degrees(190.0), -170.0);
        assert_eq!(wrap_degrees(-190.0), 170.0);
        assert_eq!(wrap_degrees(720.0), 0.0);

        let mut t = TransformState::identity();
        t.rotate_by(170.0);
        t.rotate_by(20.0);
        assert_eq!(t.rotation, -170.0);
    }

    #[test]
    fn test_divergence_epsilons() {
        let saved = TransformState::identity();
        let mut live = saved;
        assert!(!live.diverges_from(&saved, 0.005, 0.5, 0.5));

        live.position = Vec2::new(0.4, 0.0);
        assert!(!live.diverges_from(&saved, 0.005, 0.5, 0.5));
        live.position = Vec2::new(0.6, 0.0);
        assert!(live.diverges_from(&saved, 0.005, 0.5, 0.5));

        let mut live = saved;
        live.scale = 1.004;
        assert!(!live.diverges_from(&saved, 0.005, 0.5, 0.5));
        live.scale = 1.006;
        assert!(live.diverges_from(&saved, 0.005, 0.5, 0.5));

        let mut live = saved;
        live.rotation = 0.4;
        assert!(!live.diverges_from(&saved, 0.005, 0.5, 0.5));
        live.rotation = 0.6;
        assert!(live.diverges_from(&saved, 0.005, 0.5, 0.5));
    }

    #[test]
    fn test_rotation_divergence_across_wrap() {
        // 179.9 and -179.9 are 0.2 degrees apart, not 359.8
        let saved = TransformState {
            rotation: 179.9,
            ..TransformState::identity()
        };
        let live = TransformState {
            rotation: -179.9,
            ..TransformState::identity()
        };
        assert!(!live.diverges_from(&saved, 0.005, 0.5, 0.5));
    }

    #[test]
    fn test_vec2_angle() {
        assert_eq!(Vec2::new(1.0, 0.0).angle_deg(), 0.0);
        assert_eq!(Vec2::new(0.0, 1.0).angle_deg(), 90.0);
        assert!((Vec2::new(-1.0, 0.0).angle_deg() - 180.0).abs() < 1e-12);
    }
}
