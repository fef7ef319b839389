//! Ground-truth synthesis for multi-camera marker calibration datasets.
//!
//! This crate places a fixed set of point markers and a set of look-at cameras
//! in a common world frame, derives pinhole intrinsics from each camera's
//! optics, projects every marker into every camera and exports the
//! correspondences as a plain-text scene description.
//!
//! Pipeline:
//! `markers + cameras -> (intrinsics, projections) per camera -> scene.scn`
//!
//! # Modules
//!
//! - \[`math`\]: type aliases and small geometry helpers.
//! - \[`models`\]: optics, intrinsics, look-at pose, view projection.
//! - \[`markers`\] / \[`placement`\]: seeded world layout.
//! - \[`export`\]: scene file writer and reader.
//! - \[`render`\]: per-camera image output.
//!
//! # Example
//!
//! ```no_run
//! use markerscene_core::{PinholeViewProjector, Scene, SceneConfig};
//!
//! let config = SceneConfig::default();
//! let scene = Scene::from_config(&config).unwrap();
//! let export = scene.export(&PinholeViewProjector::new(config.image), &config);
//! assert_eq!(export.blocks.len(), scene.cameras.len());
//! print!("{}", export.to_scn_string());
//! ```

mod config;
mod dataset;
mod error;
/// Scene description writer and reader.
mod export;
/// Marker layout generation.
mod markers;
/// Linear algebra type aliases and helpers.
mod math;
/// Camera models: optics, intrinsics, pose and view projection.
mod models;
/// Camera set construction strategies.
mod placement;
mod projector;
/// Render collaborators.
mod render;

pub use config::*;
pub use dataset::*;
pub use error::*;
pub use export::*;
pub use markers::*;
pub use math::*;
pub use models::*;
pub use placement::*;
pub use projector::*;
pub use render::*;
