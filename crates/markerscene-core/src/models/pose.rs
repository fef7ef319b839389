//! Look-at camera orientation.
//!
//! Cameras look down their local `-Z` axis with local `+Y` pointing up in the
//! image. The rotation returned by [`look_at_rotation`] has the camera axes as
//! columns, i.e. it maps camera-frame directions into the world frame.

use nalgebra::{Rotation3, Translation3, UnitQuaternion};

use crate::{math::rodrigues_rotate, Iso3, Mat3, Pt3, Real, Vec3};

/// World axis the optional tilt rotates the look direction around.
pub const TILT_AXIS: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Preferred world-up vector.
pub const WORLD_UP: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Fallback up vector used when the view direction is nearly vertical.
pub const FALLBACK_UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// `|dot(z, up)|` above which `up` is considered parallel to the view axis.
pub const PARALLEL_UP_THRESHOLD: Real = 0.999;

/// Minimum length of `target - position` accepted as a look direction.
pub const MIN_LOOK_DISTANCE: Real = 1e-9;

/// Unit forward direction from `position` towards `target`, tilted by
/// `tilt_deg` around [`TILT_AXIS`].
///
/// Returns `None` when the two points are numerically indistinguishable.
pub fn look_direction(position: &Pt3, target: &Pt3, tilt_deg: Real) -> Option<Vec3> {
    let d = target - position;
    let norm = d.norm();
    if !norm.is_finite() || norm < MIN_LOOK_DISTANCE {
        return None;
    }
    let mut d = d / norm;
    if tilt_deg != 0.0 {
        d = rodrigues_rotate(&TILT_AXIS, tilt_deg.to_radians(), &d).normalize();
    }
    Some(d)
}

/// Build the camera-to-world rotation for a camera looking along `forward`.
///
/// `forward` must be unit length.
pub fn look_at_rotation(forward: &Vec3) -> Rotation3<Real> {
    let z_axis = -forward;
    let up = if z_axis.dot(&WORLD_UP).abs() > PARALLEL_UP_THRESHOLD {
        FALLBACK_UP
    } else {
        WORLD_UP
    };
    let x_axis = up.cross(&z_axis).normalize();
    let y_axis = z_axis.cross(&x_axis).normalize();
    Rotation3::from_matrix_unchecked(Mat3::from_columns(&[x_axis, y_axis, z_axis]))
}

/// Full camera pose `world_se3_cam` (translation to `position` composed with
/// the look-at rotation).
///
/// Returns `None` for a degenerate look direction.
pub fn look_at_pose(position: &Pt3, target: &Pt3, tilt_deg: Real) -> Option<Iso3> {
    let forward = look_direction(position, target, tilt_deg)?;
    let rotation = UnitQuaternion::from_rotation_matrix(&look_at_rotation(&forward));
    Some(Iso3::from_parts(
        Translation3::from(position.coords),
        rotation,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(r: &Mat3) {
        let err = (r.transpose() * r - Mat3::identity()).norm();
        assert!(err < 1e-12, "not orthonormal, err={err}");
        assert!((r.determinant() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn camera_minus_z_points_at_target() {
        let pos = Pt3::new(8.0, 0.0, 3.0);
        let target = Pt3::new(0.0, 0.0, 0.4);
        let pose = look_at_pose(&pos, &target, 0.0).unwrap();

        let forward_w = pose.rotation * Vec3::new(0.0, 0.0, -1.0);
        let expected = (target - pos).normalize();
        assert!((forward_w - expected).norm() < 1e-12);
        assert_orthonormal(pose.rotation.to_rotation_matrix().matrix());

        // Target sits on the optical axis in the camera frame.
        let t_c = pose.inverse_transform_point(&target);
        assert!(t_c.x.abs() < 1e-12 && t_c.y.abs() < 1e-12);
        assert!(t_c.z < 0.0);
    }

    #[test]
    fn camera_up_has_positive_world_z() {
        let pose = look_at_pose(&Pt3::new(0.0, -8.2, 3.0), &Pt3::new(0.0, 0.0, 0.4), 0.0).unwrap();
        let up_w = pose.rotation * Vec3::y();
        assert!(up_w.z > 0.0);
        // X axis stays horizontal under the z-up convention.
        let x_w = pose.rotation * Vec3::x();
        assert!(x_w.z.abs() < 1e-12);
    }

    #[test]
    fn vertical_view_uses_fallback_up() {
        let pos = Pt3::new(0.0, 0.0, 10.0);
        let target = Pt3::new(0.0, 0.0, 0.0);
        let forward = look_direction(&pos, &target, 0.0).unwrap();
        let r = look_at_rotation(&forward);
        let m = r.matrix();
        assert!(m.iter().all(|v| v.is_finite()));
        assert_orthonormal(m);
        let x_axis = m.column(0).into_owned();
        let expected = FALLBACK_UP.cross(&Vec3::z()).normalize();
        assert!((x_axis - expected).norm() < 1e-12);
    }

    #[test]
    fn tilt_rotates_direction_about_world_y() {
        let pos = Pt3::new(2.0, 1.5, 8.5);
        let target = Pt3::new(0.0, 0.0, 0.4);
        let straight = look_direction(&pos, &target, 0.0).unwrap();
        let tilted = look_direction(&pos, &target, 5.0).unwrap();

        let angle = straight.angle(&tilted);
        assert!(angle > 0.0);
        assert!(angle <= 5.0_f64.to_radians() + 1e-12);
        assert!((tilted.y - straight.y).abs() < 1e-12);
        assert!((tilted.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn coincident_position_and_target_is_rejected() {
        let p = Pt3::new(1.0, 2.0, 3.0);
        assert!(look_direction(&p, &p, 0.0).is_none());
        assert!(look_at_pose(&p, &Pt3::new(1.0, 2.0, 3.0 + 1e-12), 5.0).is_none());
    }
}
