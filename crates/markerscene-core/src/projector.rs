//! World-to-image projection with frustum visibility.

use serde::{Deserialize, Serialize};

use crate::{math::round_to, Camera, ImageSize, Marker, Pt2, Pt3, ViewProjector};

/// Fractional digits kept for exported pixel coordinates.
pub const PIXEL_DIGITS: i32 = 2;

/// Ground-truth observation of one marker by one camera.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub camera: String,
    pub marker: String,
    /// Rounded pixel coordinates (top-left origin), `None` when not visible.
    pub pixel: Option<Pt2>,
}

impl Projection {
    pub fn visible(&self) -> bool {
        self.pixel.is_some()
    }
}

/// Project a world point to pixel coordinates, `None` if it falls outside
/// the view frustum.
///
/// Normalized view space has a bottom-left origin, so `v` is flipped. The
/// returned coordinates are rounded to [`PIXEL_DIGITS`].
pub fn project_point<V: ViewProjector + ?Sized>(
    projector: &V,
    camera: &Camera,
    image: &ImageSize,
    p_w: &Pt3,
) -> Option<Pt2> {
    let vc = projector.view_coords(camera, p_w);
    if !vc.in_frustum() {
        return None;
    }
    let px = vc.u * image.width_f();
    let py = (1.0 - vc.v) * image.height_f();
    Some(Pt2::new(
        round_to(px, PIXEL_DIGITS),
        round_to(py, PIXEL_DIGITS),
    ))
}

pub fn project_marker<V: ViewProjector + ?Sized>(
    projector: &V,
    camera: &Camera,
    image: &ImageSize,
    marker: &Marker,
) -> Projection {
    Projection {
        camera: camera.name().to_string(),
        marker: marker.name.clone(),
        pixel: project_point(projector, camera, image, &marker.position),
    }
}
