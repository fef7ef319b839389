//! Marker layout generation.
//!
//! The layout is a fixed square of four markers centred at the origin
//! followed by a seeded random scatter. Marker order is the export order, so
//! it must never change for a given configuration.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{math::uniform, Pt3, Real, SceneError};

/// Linear RGB colour in `[0, 1]`.
pub type Color = [f32; 3];

/// Display palette; marker `i` uses `PALETTE[i % PALETTE.len()]`.
pub const PALETTE: [Color; 15] = [
    [1.0, 0.0, 0.0],
    [1.0, 0.0, 1.0],
    [0.0, 0.3, 1.0],
    [0.0, 1.0, 1.0],
    [0.0, 1.0, 0.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.5, 0.0],
    [0.6, 0.0, 1.0],
    [1.0, 0.4, 0.6],
    [0.3, 1.0, 0.3],
    [0.8, 0.2, 0.2],
    [0.2, 0.8, 0.8],
    [0.9, 0.9, 0.1],
    [0.5, 0.0, 0.5],
    [0.0, 0.5, 0.5],
];

/// A point marker observed by every camera.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Insertion index (stable ordinal).
    pub index: usize,
    pub name: String,
    /// World position in metres.
    pub position: Pt3,
    /// Render colour; has no effect on projection.
    pub color: Color,
}

impl Marker {
    pub fn new(index: usize, position: Pt3) -> Self {
        Self {
            index,
            name: format!("m{index}"),
            position,
            color: PALETTE[index % PALETTE.len()],
        }
    }
}

/// Parameters of the marker layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerLayoutConfig {
    /// Side length of the base square (metres).
    pub base_size: Real,
    /// Number of scattered markers appended after the square.
    pub num_random: usize,
    /// Scatter half-extent in X/Y and upper bound in Z (metres).
    pub random_spread: Real,
    /// Lower bound of the scatter in Z (metres).
    pub random_z_min: Real,
    /// Sphere radius used only when rendering.
    pub radius: Real,
}

impl Default for MarkerLayoutConfig {
    fn default() -> Self {
        Self {
            base_size: 1.0,
            num_random: 6,
            random_spread: 2.5,
            random_z_min: 0.2,
            radius: 0.010,
        }
    }
}

impl MarkerLayoutConfig {
    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.base_size.is_finite() && self.base_size >= 0.0) {
            return Err(SceneError::InvalidConfig(format!(
                "marker base_size must be a non-negative number, got {}",
                self.base_size
            )));
        }
        if !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(SceneError::InvalidConfig(format!(
                "marker radius must be a non-negative number, got {}",
                self.radius
            )));
        }
        if self.num_random > 0 {
            check_range("random_spread", -self.random_spread, self.random_spread)?;
            check_range("random_z", self.random_z_min, self.random_spread)?;
        }
        Ok(())
    }

    /// The four base-square corners in order (−,−), (+,−), (+,+), (−,+).
    pub fn base_square(&self) -> [Pt3; 4] {
        let mid = self.base_size * 0.5;
        [
            Pt3::new(-mid, -mid, 0.0),
            Pt3::new(mid, -mid, 0.0),
            Pt3::new(mid, mid, 0.0),
            Pt3::new(-mid, mid, 0.0),
        ]
    }

    /// Build the full marker set.
    ///
    /// The base square consumes no randomness; each scattered marker draws
    /// `x`, `y`, `z` from `rng` in that order.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Marker> {
        let base = self.base_square();
        let mut markers = Vec::with_capacity(base.len() + self.num_random);
        markers.extend(
            base.iter()
                .enumerate()
                .map(|(idx, p)| Marker::new(idx, *p)),
        );

        let spread = self.random_spread;
        for _ in 0..self.num_random {
            let x = uniform(rng, -spread, spread);
            let y = uniform(rng, -spread, spread);
            let z = uniform(rng, self.random_z_min, spread);
            markers.push(Marker::new(markers.len(), Pt3::new(x, y, z)));
        }
        log::debug!("built {} markers ({} scattered)", markers.len(), self.num_random);
        markers
    }
}

pub(crate) fn check_range(name: &str, min: Real, max: Real) -> Result<(), SceneError> {
    if !(min.is_finite() && max.is_finite()) {
        return Err(SceneError::InvalidConfig(format!(
            "range `{name}` must be finite, got [{min}, {max}]"
        )));
    }
    if min > max {
        return Err(SceneError::InvalidRange {
            name: name.to_string(),
            min,
            max,
        });
    }
    Ok(())
}
