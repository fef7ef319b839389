use serde::{Deserialize, Serialize};

use super::{Camera, ImageSize};
use crate::{Pt3, Real};

/// Normalized view coordinates of a point as seen by a camera.
///
/// `u, v ∈ [0, 1]` span the visible frame with the origin at the bottom-left;
/// `depth > 0` means the point lies in front of the camera.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewCoords {
    pub u: Real,
    pub v: Real,
    pub depth: Real,
}

impl ViewCoords {
    /// Frustum containment; occlusion is not considered.
    pub fn in_frustum(&self) -> bool {
        (0.0..=1.0).contains(&self.u) && (0.0..=1.0).contains(&self.v) && self.depth > 0.0
    }
}

/// View-projection primitive supplied by a rendering backend.
pub trait ViewProjector {
    /// Map a world point into normalized view coordinates of `camera`.
    fn view_coords(&self, camera: &Camera, p_w: &Pt3) -> ViewCoords;
}

/// Pure-math perspective projector with horizontal sensor fit.
///
/// The sensor width spans the image width; the vertical extent follows the
/// image aspect ratio, which keeps pixels square.
#[derive(Clone, Copy, Debug, Default)]
pub struct PinholeViewProjector {
    pub image: ImageSize,
}

impl PinholeViewProjector {
    pub fn new(image: ImageSize) -> Self {
        Self { image }
    }
}

impl ViewProjector for PinholeViewProjector {
    fn view_coords(&self, camera: &Camera, p_w: &Pt3) -> ViewCoords {
        let p_c = camera.to_camera_frame(p_w);
        let depth = -p_c.z;
        if depth == 0.0 {
            return ViewCoords {
                u: 0.5,
                v: 0.5,
                depth: 0.0,
            };
        }
        let scale_x = camera.optics().focal_length_mm / camera.optics().sensor_width_mm;
        let scale_y = scale_x * self.image.width_f() / self.image.height_f();
        ViewCoords {
            u: 0.5 + scale_x * p_c.x / depth,
            v: 0.5 + scale_y * p_c.y / depth,
            depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Optics;

    fn camera_c1() -> Camera {
        Camera::look_at(
            "c1",
            Pt3::new(8.0, 0.0, 3.0),
            &Pt3::new(0.0, 0.0, 0.4),
            0.0,
            Optics::default(),
        )
        .unwrap()
    }

    #[test]
    fn target_projects_to_frame_centre() {
        let projector = PinholeViewProjector::default();
        let vc = projector.view_coords(&camera_c1(), &Pt3::new(0.0, 0.0, 0.4));
        assert!((vc.u - 0.5).abs() < 1e-12);
        assert!((vc.v - 0.5).abs() < 1e-12);
        assert!(vc.depth > 0.0);
        assert!(vc.in_frustum());
    }

    #[test]
    fn point_behind_camera_has_negative_depth() {
        let projector = PinholeViewProjector::default();
        let vc = projector.view_coords(&camera_c1(), &Pt3::new(12.0, 0.0, 4.0));
        assert!(vc.depth < 0.0);
        assert!(!vc.in_frustum());
    }

    #[test]
    fn higher_world_points_have_larger_v() {
        let projector = PinholeViewProjector::default();
        let cam = camera_c1();
        let low = projector.view_coords(&cam, &Pt3::new(0.0, 0.0, 0.0));
        let high = projector.view_coords(&cam, &Pt3::new(0.0, 0.0, 1.0));
        assert!(high.v > low.v);
    }

    #[test]
    fn agrees_with_pinhole_intrinsics() {
        let image = ImageSize::default();
        let projector = PinholeViewProjector::new(image);
        let cam = camera_c1();
        let k = cam.intrinsics(&image);

        let p_w = Pt3::new(0.3, -0.7, 1.1);
        let p_c = cam.to_camera_frame(&p_w);
        let vc = projector.view_coords(&cam, &p_w);

        // Flip to a +Z-forward, +Y-down optical frame.
        let x = p_c.x / -p_c.z;
        let y = -p_c.y / -p_c.z;
        let px = k.fx * x + k.cx;
        let py = k.fy * y + k.cy;

        assert!((vc.u * image.width_f() - px).abs() < 1e-9);
        assert!(((1.0 - vc.v) * image.height_f() - py).abs() < 1e-9);
    }
}
