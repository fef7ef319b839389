//! Mathematical utilities and type definitions.
//!
//! This module provides the fundamental types used throughout the crate and
//! the small vector helpers needed by the pose builder.

use nalgebra::{Isometry3, Matrix3, Point2, Point3, Vector2, Vector3};
use rand::Rng;

/// Scalar type used throughout the library (currently `f64`).
pub type Real = f64;

/// 2D vector with [`Real`] components.
pub type Vec2 = Vector2<Real>;
/// 3D vector with [`Real`] components.
pub type Vec3 = Vector3<Real>;
/// 2D point with [`Real`] coordinates.
pub type Pt2 = Point2<Real>;
/// 3D point with [`Real`] coordinates.
pub type Pt3 = Point3<Real>;
/// 3×3 matrix with [`Real`] entries.
pub type Mat3 = Matrix3<Real>;
/// 3D rigid transform (SE(3)) using [`Real`].
pub type Iso3 = Isometry3<Real>;

/// Rotate `v` by `angle_rad` around the unit `axis` (Rodrigues' formula).
///
/// `v_rot = v cos θ + (k × v) sin θ + k (k · v)(1 − cos θ)`
pub fn rodrigues_rotate(axis: &Vec3, angle_rad: Real, v: &Vec3) -> Vec3 {
    let (s, c) = angle_rad.sin_cos();
    v * c + axis.cross(v) * s + axis * (axis.dot(v) * (1.0 - c))
}

/// Round to `digits` fractional decimal digits, folding `-0.0` into `0.0`.
pub fn round_to(value: Real, digits: i32) -> Real {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale + 0.0
}

/// Draw a uniform sample from `[lo, hi]`.
///
/// Consumes exactly one `f64` from `rng` regardless of the bounds, so the
/// random stream stays aligned even for empty-width ranges.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: Real, hi: Real) -> Real {
    lo + (hi - lo) * rng.random::<Real>()
}
