use serde::Serialize;

use super::{look_at_pose, FxFyCxCy, ImageSize, Optics};
use crate::{Iso3, Pt3, Real, SceneError};

/// A scene camera whose orientation is always derived from its position, the
/// shared target point and an optional tilt.
#[derive(Clone, Debug, Serialize)]
pub struct Camera {
    name: String,
    position: Pt3,
    /// Tilt of the look direction around world Y, in degrees.
    tilt_deg: Real,
    optics: Optics,
    /// Camera-to-world transform.
    world_se3_cam: Iso3,
}

impl Camera {
    /// Place a camera at `position` aimed at `target`.
    pub fn look_at(
        name: impl Into<String>,
        position: Pt3,
        target: &Pt3,
        tilt_deg: Real,
        optics: Optics,
    ) -> Result<Self, SceneError> {
        let name = name.into();
        let Some(world_se3_cam) = look_at_pose(&position, target, tilt_deg) else {
            return Err(SceneError::DegenerateDirection { camera: name });
        };
        Ok(Self {
            name,
            position,
            tilt_deg,
            optics,
            world_se3_cam,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Pt3 {
        self.position
    }

    pub fn tilt_deg(&self) -> Real {
        self.tilt_deg
    }

    pub fn optics(&self) -> &Optics {
        &self.optics
    }

    pub fn world_se3_cam(&self) -> &Iso3 {
        &self.world_se3_cam
    }

    /// Express a world point in the camera frame (camera looks down `-Z`).
    pub fn to_camera_frame(&self, p_w: &Pt3) -> Pt3 {
        self.world_se3_cam.inverse_transform_point(p_w)
    }

    pub fn intrinsics(&self, image: &ImageSize) -> FxFyCxCy {
        FxFyCxCy::from_optics(&self.optics, image)
    }
}
