use serde::{Deserialize, Serialize};

use crate::{Mat3, Real};

/// Optical configuration of a camera body and lens.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Optics {
    /// Lens focal length in millimetres.
    pub focal_length_mm: Real,
    /// Horizontal sensor width in millimetres.
    pub sensor_width_mm: Real,
}

impl Default for Optics {
    fn default() -> Self {
        Self {
            focal_length_mm: 35.0,
            sensor_width_mm: 36.0,
        }
    }
}

/// Output image resolution in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ImageSize {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl ImageSize {
    pub fn width_f(&self) -> Real {
        Real::from(self.width)
    }

    pub fn height_f(&self) -> Real {
        Real::from(self.height)
    }

    /// Whether `(px, py)` lies inside `[0, width] × [0, height]`.
    pub fn contains(&self, px: Real, py: Real) -> bool {
        (0.0..=self.width_f()).contains(&px) && (0.0..=self.height_f()).contains(&py)
    }
}

/// Distortion-free pinhole intrinsics without skew.
///
/// The corresponding calibration matrix `K` has the form:
///
/// ```text
/// [ fx   0  cx ]
/// [  0  fy  cy ]
/// [  0   0   1 ]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FxFyCxCy {
    /// Focal length in pixels along X.
    pub fx: Real,
    /// Focal length in pixels along Y.
    pub fy: Real,
    /// Principal point X coordinate in pixels.
    pub cx: Real,
    /// Principal point Y coordinate in pixels.
    pub cy: Real,
}

impl FxFyCxCy {
    /// Derive intrinsics from optics under the square-pixel model.
    ///
    /// `fx = fy = focal / sensor_width * width`; the principal point sits at
    /// the exact image centre. `fy` mirrors `fx` rather than using a vertical
    /// sensor dimension.
    pub fn from_optics(optics: &Optics, image: &ImageSize) -> Self {
        let fx = optics.focal_length_mm / optics.sensor_width_mm * image.width_f();
        Self {
            fx,
            fy: fx,
            cx: image.width_f() * 0.5,
            cy: image.height_f() * 0.5,
        }
    }

    /// Return the 3x3 camera intrinsics matrix K.
    pub fn k_matrix(&self) -> Mat3 {
        Mat3::new(
            self.fx, 0.0, self.cx, 0.0, self.fy, self.cy, 0.0, 0.0, 1.0,
        )
    }
}
