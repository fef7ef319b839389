//! Per-camera image output.
//!
//! Rendering is a collaborator of the dataset pipeline: it receives the
//! already-posed camera and the marker set, and writes one image per camera.

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::{Camera, ImageSize, Marker, Real, SceneError, ViewProjector};

/// Produces the image artifact for one camera.
pub trait FrameRenderer {
    fn render(&mut self, camera: &Camera, markers: &[Marker], path: &Path)
        -> Result<(), SceneError>;
}

/// Renderer that writes nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl FrameRenderer for NullRenderer {
    fn render(&mut self, _camera: &Camera, _markers: &[Marker], _path: &Path) -> Result<(), SceneError> {
        Ok(())
    }
}

/// Draws each frustum-visible marker as a flat disc on a black background.
///
/// Disc radius is the marker sphere radius projected at its depth, at least
/// one pixel. Nearer markers are drawn over farther ones.
#[derive(Clone, Debug)]
pub struct SplatRenderer<V> {
    pub projector: V,
    pub image: ImageSize,
    /// Marker sphere radius in metres.
    pub marker_radius: Real,
}

impl<V: ViewProjector> SplatRenderer<V> {
    pub fn new(projector: V, image: ImageSize, marker_radius: Real) -> Self {
        Self {
            projector,
            image,
            marker_radius,
        }
    }

    /// Rasterise the frame without writing it.
    pub fn draw(&self, camera: &Camera, markers: &[Marker]) -> RgbImage {
        let (w, h) = (self.image.width, self.image.height);
        let mut img = RgbImage::from_pixel(w, h, Rgb([0, 0, 0]));
        let fx = camera.intrinsics(&self.image).fx;

        let mut splats: Vec<_> = markers
            .iter()
            .filter_map(|m| {
                let vc = self.projector.view_coords(camera, &m.position);
                vc.in_frustum().then(|| {
                    let px = vc.u * self.image.width_f();
                    let py = (1.0 - vc.v) * self.image.height_f();
                    let radius = (fx * self.marker_radius / vc.depth).max(1.0);
                    (vc.depth, px, py, radius, to_rgb8(m.color))
                })
            })
            .collect();
        splats.sort_by(|a, b| b.0.total_cmp(&a.0));

        for (_, px, py, radius, color) in splats {
            let x0 = (px - radius).floor().max(0.0) as u32;
            let y0 = (py - radius).floor().max(0.0) as u32;
            let x1 = ((px + radius).ceil() as u32).min(w);
            let y1 = ((py + radius).ceil() as u32).min(h);
            let r2 = radius * radius;
            for y in y0..y1 {
                for x in x0..x1 {
                    let dx = Real::from(x) + 0.5 - px;
                    let dy = Real::from(y) + 0.5 - py;
                    if dx * dx + dy * dy <= r2 {
                        img.put_pixel(x, y, color);
                    }
                }
            }
        }
        img
    }
}

impl<V: ViewProjector> FrameRenderer for SplatRenderer<V> {
    fn render(&mut self, camera: &Camera, markers: &[Marker], path: &Path) -> Result<(), SceneError> {
        let img = self.draw(camera, markers);
        img.save(path).map_err(|e| SceneError::Render {
            camera: camera.name().to_string(),
            reason: format!("{}: {e}", path.display()),
        })?;
        log::debug!("rendered {} to {}", camera.name(), path.display());
        Ok(())
    }
}

fn to_rgb8(c: [f32; 3]) -> Rgb<u8> {
    Rgb(c.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8))
}
