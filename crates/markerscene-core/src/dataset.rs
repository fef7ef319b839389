//! End-to-end dataset generation.
//!
//! Random numbers come from one [`StdRng`] seeded from [`SceneConfig::seed`]
//! and are consumed in a fixed sequence:
//! 1. base square markers (no draws),
//! 2. scattered markers (`x`, `y`, `z` each),
//! 3. procedural ring cameras only (`radius`, `angle`, `height` each).
//!
//! Reordering any of these steps changes the dataset for the same seed.

use std::{fs, path::PathBuf};

use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;

use crate::{
    Camera, CameraBlock, FrameRenderer, Marker, SceneConfig, SceneError, SceneExport,
    ViewProjector, SCENE_FILE_NAME,
};

/// Markers and cameras placed in the world frame.
#[derive(Clone, Debug, Serialize)]
pub struct Scene {
    pub markers: Vec<Marker>,
    pub cameras: Vec<Camera>,
}

impl Scene {
    /// Validate `config` and place markers and cameras.
    pub fn from_config(config: &SceneConfig) -> Result<Self, SceneError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let markers = config.markers.build(&mut rng);
        let cameras = config.cameras.build(&mut rng)?;
        Ok(Self { markers, cameras })
    }

    /// Compute the scene description without touching the filesystem.
    pub fn export<V: ViewProjector + ?Sized>(
        &self,
        projector: &V,
        config: &SceneConfig,
    ) -> SceneExport {
        SceneExport::build(projector, &self.cameras, &config.image, &self.markers)
    }
}

/// Result of a completed generation run.
#[derive(Clone, Debug)]
pub struct Dataset {
    pub scene: Scene,
    pub export: SceneExport,
    /// Location of the written scene description.
    pub scene_file: PathBuf,
}

/// Generate the full dataset into `config.output_dir`.
///
/// Each camera is processed in order: its block is computed and its frame is
/// rendered. The scene description is written once, after every camera has
/// succeeded.
pub fn generate_dataset<V, R>(
    config: &SceneConfig,
    projector: &V,
    renderer: &mut R,
) -> Result<Dataset, SceneError>
where
    V: ViewProjector + ?Sized,
    R: FrameRenderer + ?Sized,
{
    let scene = Scene::from_config(config)?;
    let out_dir = &config.output_dir;
    fs::create_dir_all(out_dir).map_err(|e| SceneError::io(out_dir, e))?;

    let mut blocks = Vec::with_capacity(scene.cameras.len());
    for camera in &scene.cameras {
        let block = CameraBlock::observe(projector, camera, &config.image, &scene.markers);
        log::debug!(
            "camera {}: {}/{} markers visible",
            camera.name(),
            block.num_visible(),
            scene.markers.len()
        );
        let frame_path = out_dir.join(format!("{}.png", camera.name()));
        renderer.render(camera, &scene.markers, &frame_path)?;
        blocks.push(block);
    }

    let export = SceneExport { blocks };
    let scene_file = out_dir.join(SCENE_FILE_NAME);
    export.write_atomic(&scene_file)?;
    log::info!(
        "saved {} with {} cameras and {} markers in {}",
        SCENE_FILE_NAME,
        scene.cameras.len(),
        scene.markers.len(),
        out_dir.display()
    );

    Ok(Dataset {
        scene,
        export,
        scene_file,
    })
}
