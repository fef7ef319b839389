//! Camera model building blocks.
//!
//! A scene camera is described by three pieces:
//!
//! 1. [`Optics`] + [`ImageSize`]: focal length, sensor width and resolution,
//!    from which [`FxFyCxCy`] pinhole intrinsics are derived.
//! 2. A look-at pose (`world_se3_cam`) built from the camera position, the
//!    shared scene target and an optional tilt (see [`look_at_pose`]).
//! 3. A [`ViewProjector`] mapping world points to normalized view
//!    coordinates, implemented by the rendering backend or by
//!    [`PinholeViewProjector`].

mod camera;
mod intrinsics;
mod pose;
mod projection;

pub use camera::*;
pub use intrinsics::*;
pub use pose::*;
pub use projection::*;
