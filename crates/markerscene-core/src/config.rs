use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{CameraSetConfig, ImageSize, MarkerLayoutConfig, SceneError};

/// Top-level dataset generation settings.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Directory receiving `scene.scn` and one image per camera.
    pub output_dir: PathBuf,
    pub image: ImageSize,
    /// Seed of the single generator shared by markers and cameras.
    pub seed: u64,
    pub markers: MarkerLayoutConfig,
    pub cameras: CameraSetConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dataset"),
            image: ImageSize::default(),
            seed: 42,
            markers: MarkerLayoutConfig::default(),
            cameras: CameraSetConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Reject configurations that cannot produce a dataset, before any
    /// geometry is generated.
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.image.width == 0 || self.image.height == 0 {
            return Err(SceneError::InvalidConfig(format!(
                "image size must be non-zero, got {}x{}",
                self.image.width, self.image.height
            )));
        }
        self.markers.validate()?;
        self.cameras.validate()
    }

    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        serde_json::from_str(json).map_err(|e| SceneError::InvalidConfig(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let data = fs::read_to_string(path).map_err(|e| SceneError::io(path, e))?;
        Self::from_json_str(&data)
    }

    pub fn to_json_pretty(&self) -> Result<String, SceneError> {
        serde_json::to_string_pretty(self).map_err(|e| SceneError::InvalidConfig(e.to_string()))
    }
}
