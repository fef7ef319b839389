//! Camera set construction.
//!
//! Two strategies are available, selected by [`CameraPlacement`]:
//! - `Fixed`: a deterministic, ordered list of named positions,
//! - `Procedural`: a line of cameras on one side plus a seeded random ring.
//!
//! Both honour the shared [`CameraSetConfig`] limits and aim every camera at
//! the same target through [`Camera::look_at`].

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::{markers::check_range, math::uniform, Camera, Optics, Pt3, Real, SceneError};

/// Inclusive scalar range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RealRange {
    pub min: Real,
    pub max: Real,
}

impl RealRange {
    pub const fn new(min: Real, max: Real) -> Self {
        Self { min, max }
    }

    fn validate(&self, name: &str) -> Result<(), SceneError> {
        check_range(name, self.min, self.max)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Real {
        uniform(rng, self.min, self.max)
    }
}

/// A named camera position in world coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedPosition {
    pub name: String,
    pub position: [Real; 3],
}

impl NamedPosition {
    pub fn new(name: &str, position: [Real; 3]) -> Self {
        Self {
            name: name.to_string(),
            position,
        }
    }

    fn point(&self) -> Pt3 {
        Pt3::from(self.position)
    }
}

/// Deterministic placement from an ordered list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedPlacement {
    pub positions: Vec<NamedPosition>,
    /// Entry that is the elevated top view. It is skipped when the top view is
    /// disabled and is the only entry that receives a tilt.
    pub top_camera: String,
}

impl Default for FixedPlacement {
    fn default() -> Self {
        Self {
            positions: vec![
                NamedPosition::new("c0", [8.0, -1.4, 3.1]),
                NamedPosition::new("c1", [8.0, 0.0, 3.0]),
                NamedPosition::new("c2", [8.0, 1.4, 3.05]),
                NamedPosition::new("c3", [-8.0, 0.0, 3.1]),
                NamedPosition::new("c4", [0.0, 8.2, 3.0]),
                NamedPosition::new("c5", [0.0, -8.2, 3.0]),
                NamedPosition::new("c6", [2.0, 1.5, 8.5]),
            ],
            top_camera: "c6".to_string(),
        }
    }
}

/// Procedural fallback placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProceduralPlacement {
    /// X coordinate of the camera line.
    pub line_x: Real,
    /// Y offsets of the line cameras, in order.
    pub line_offsets: Vec<Real>,
    /// Height of the line cameras.
    pub line_height: Real,
    /// Ring radius range around the world Z axis.
    pub radius_range: RealRange,
    /// Ring camera height range.
    pub height_range: RealRange,
    /// Height of the top camera.
    pub top_height: Real,
    /// X/Y offset of the top camera.
    pub top_offset: [Real; 2],
}

impl Default for ProceduralPlacement {
    fn default() -> Self {
        Self {
            line_x: 8.0,
            line_offsets: vec![-1.4, 0.0, 1.4],
            line_height: 3.05,
            radius_range: RealRange::new(7.5, 9.0),
            height_range: RealRange::new(2.8, 3.4),
            top_height: 8.5,
            top_offset: [2.0, 1.5],
        }
    }
}

/// Camera placement strategy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CameraPlacement {
    Fixed(FixedPlacement),
    Procedural(ProceduralPlacement),
}

impl Default for CameraPlacement {
    fn default() -> Self {
        Self::Fixed(FixedPlacement::default())
    }
}

/// Shared camera-set settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSetConfig {
    pub placement: CameraPlacement,
    pub max_cameras: usize,
    pub include_top: bool,
    /// Look-at anchor shared by every camera.
    pub target: [Real; 3],
    /// Tilt (degrees, about world Y) applied to the top camera.
    pub top_tilt_deg: Real,
    pub optics: Optics,
}

impl Default for CameraSetConfig {
    fn default() -> Self {
        Self {
            placement: CameraPlacement::default(),
            max_cameras: 7,
            include_top: true,
            target: [0.0, 0.0, 0.4],
            top_tilt_deg: 5.0,
            optics: Optics::default(),
        }
    }
}

impl CameraSetConfig {
    pub fn target_point(&self) -> Pt3 {
        Pt3::from(self.target)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        let optics = &self.optics;
        if !(optics.focal_length_mm.is_finite() && optics.focal_length_mm > 0.0) {
            return Err(SceneError::InvalidConfig(format!(
                "focal length must be positive, got {}",
                optics.focal_length_mm
            )));
        }
        if !(optics.sensor_width_mm.is_finite() && optics.sensor_width_mm > 0.0) {
            return Err(SceneError::InvalidConfig(format!(
                "sensor width must be positive, got {}",
                optics.sensor_width_mm
            )));
        }
        if !self.top_tilt_deg.is_finite() {
            return Err(SceneError::InvalidConfig("top tilt must be finite".into()));
        }
        match &self.placement {
            CameraPlacement::Fixed(_) => Ok(()),
            CameraPlacement::Procedural(p) => {
                p.radius_range.validate("radius_range")?;
                p.height_range.validate("height_range")
            }
        }
    }

    /// Build the ordered camera list.
    ///
    /// Only the procedural strategy consumes randomness (radius, angle,
    /// height per ring camera, in that order).
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Camera>, SceneError> {
        let cameras = match &self.placement {
            CameraPlacement::Fixed(fixed) => self.build_fixed(fixed)?,
            CameraPlacement::Procedural(procedural) => self.build_procedural(procedural, rng)?,
        };
        log::debug!("built {} cameras", cameras.len());
        Ok(cameras)
    }

    fn add_camera(&self, name: String, position: Pt3, top: bool) -> Result<Camera, SceneError> {
        let tilt = if top { self.top_tilt_deg } else { 0.0 };
        Camera::look_at(name, position, &self.target_point(), tilt, self.optics)
    }

    fn build_fixed(&self, fixed: &FixedPlacement) -> Result<Vec<Camera>, SceneError> {
        let mut cameras = Vec::new();
        for entry in &fixed.positions {
            let top = entry.name == fixed.top_camera;
            if top && !self.include_top {
                continue;
            }
            if cameras.len() >= self.max_cameras {
                break;
            }
            cameras.push(self.add_camera(entry.name.clone(), entry.point(), top)?);
        }
        Ok(cameras)
    }

    fn build_procedural<R: Rng + ?Sized>(
        &self,
        p: &ProceduralPlacement,
        rng: &mut R,
    ) -> Result<Vec<Camera>, SceneError> {
        let mut cameras = Vec::new();
        for (k, offset) in p.line_offsets.iter().enumerate() {
            if cameras.len() >= self.max_cameras {
                break;
            }
            let position = Pt3::new(p.line_x, *offset, p.line_height);
            cameras.push(self.add_camera(format!("c{k}"), position, false)?);
        }

        let ring_limit = self
            .max_cameras
            .saturating_sub(usize::from(self.include_top));
        while cameras.len() < ring_limit {
            let r = p.radius_range.sample(rng);
            let angle = uniform(rng, 0.0, TAU);
            let z = p.height_range.sample(rng);
            let position = Pt3::new(r * angle.cos(), r * angle.sin(), z);
            let name = format!("c{}", cameras.len());
            cameras.push(self.add_camera(name, position, false)?);
        }

        if self.include_top && cameras.len() < self.max_cameras {
            let position = Pt3::new(p.top_offset[0], p.top_offset[1], p.top_height);
            let name = format!("c{}", cameras.len());
            cameras.push(self.add_camera(name, position, true)?);
        }
        Ok(cameras)
    }
}
