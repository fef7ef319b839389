//! Scene description export and import.
//!
//! The scene file is a sequence of camera blocks in camera-creation order:
//!
//! ```text
//! camera c0
//! fx 1866.666667
//! fy 1866.666667
//! cx 960.000000
//! cy 540.000000
//! uv m0 1012.34 640.10
//! uv m1 -1 -1
//!
//! ```
//!
//! Within a block there is exactly one `uv` line per marker, in
//! marker-creation order; invisible markers carry the `-1 -1` sentinel.
//! Consumers may parse positionally, so block and line order are part of the
//! format.

use std::{fmt::Write as _, fs, io::Write as _, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    project_marker, Camera, FxFyCxCy, ImageSize, Marker, Projection, Pt2, SceneError,
    ViewProjector,
};

/// File name of the scene description inside the output directory.
pub const SCENE_FILE_NAME: &str = "scene.scn";

const SENTINEL: &str = "-1";

/// Intrinsics plus one projection per marker for a single camera.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraBlock {
    pub camera: String,
    pub intrinsics: FxFyCxCy,
    pub observations: Vec<Projection>,
}

impl CameraBlock {
    /// Compute intrinsics once, then project every marker in order.
    pub fn observe<V: ViewProjector + ?Sized>(
        projector: &V,
        camera: &Camera,
        image: &ImageSize,
        markers: &[Marker],
    ) -> Self {
        let intrinsics = camera.intrinsics(image);
        let observations = markers
            .iter()
            .map(|m| project_marker(projector, camera, image, m))
            .collect();
        Self {
            camera: camera.name().to_string(),
            intrinsics,
            observations,
        }
    }

    pub fn num_visible(&self) -> usize {
        self.observations.iter().filter(|o| o.visible()).count()
    }

    fn write_to(&self, out: &mut String) {
        let k = &self.intrinsics;
        // Writing into a String cannot fail.
        let _ = writeln!(out, "camera {}", self.camera);
        let _ = writeln!(out, "fx {:.6}", k.fx);
        let _ = writeln!(out, "fy {:.6}", k.fy);
        let _ = writeln!(out, "cx {:.6}", k.cx);
        let _ = writeln!(out, "cy {:.6}", k.cy);
        for obs in &self.observations {
            match obs.pixel {
                Some(px) => {
                    let _ = writeln!(out, "uv {} {:.2} {:.2}", obs.marker, px.x, px.y);
                }
                None => {
                    let _ = writeln!(out, "uv {} {SENTINEL} {SENTINEL}", obs.marker);
                }
            }
        }
        out.push('\n');
    }
}

/// Ordered collection of camera blocks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneExport {
    pub blocks: Vec<CameraBlock>,
}

impl SceneExport {
    pub fn build<V: ViewProjector + ?Sized>(
        projector: &V,
        cameras: &[Camera],
        image: &ImageSize,
        markers: &[Marker],
    ) -> Self {
        let blocks = cameras
            .iter()
            .map(|cam| CameraBlock::observe(projector, cam, image, markers))
            .collect();
        Self { blocks }
    }

    /// Render the scene description text.
    pub fn to_scn_string(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            block.write_to(&mut out);
        }
        out
    }

    /// Write the full scene description in one step.
    ///
    /// The text goes to a temporary file next to `path` which is then renamed
    /// over it, so readers never observe a truncated file.
    pub fn write_atomic(&self, path: &Path) -> Result<(), SceneError> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| SceneError::io(dir, e))?;
        tmp.write_all(self.to_scn_string().as_bytes())
            .and_then(|()| tmp.flush())
            .map_err(|e| SceneError::io(tmp.path(), e))?;
        tmp.persist(path)
            .map_err(|e| SceneError::io(path, e.error))?;
        log::info!("wrote {} camera blocks to {}", self.blocks.len(), path.display());
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self, SceneError> {
        let text = fs::read_to_string(path).map_err(|e| SceneError::io(path, e))?;
        Self::parse(&text)
    }

    /// Parse scene description text.
    pub fn parse(text: &str) -> Result<Self, SceneError> {
        let mut blocks = Vec::new();
        let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l.trim_end()));

        while let Some((line_no, line)) = lines.next() {
            if line.is_empty() {
                continue;
            }
            let camera = match line.split_once(' ') {
                Some(("camera", name)) if !name.is_empty() && !name.contains(' ') => {
                    name.to_string()
                }
                _ => return Err(SceneError::parse(line_no, "expected `camera <name>`")),
            };

            let mut k = [0.0; 4];
            for (slot, key) in k.iter_mut().zip(["fx", "fy", "cx", "cy"]) {
                let Some((line_no, line)) = lines.next() else {
                    return Err(SceneError::parse(
                        line_no,
                        format!("camera {camera}: missing `{key}`"),
                    ));
                };
                *slot = parse_keyed_value(line_no, line, key)?;
            }

            let mut observations = Vec::new();
            for (line_no, line) in lines.by_ref() {
                if line.is_empty() {
                    break;
                }
                observations.push(parse_uv(line_no, line, &camera)?);
            }

            blocks.push(CameraBlock {
                camera,
                intrinsics: FxFyCxCy {
                    fx: k[0],
                    fy: k[1],
                    cx: k[2],
                    cy: k[3],
                },
                observations,
            });
        }
        Ok(Self { blocks })
    }
}

fn parse_keyed_value(line_no: usize, line: &str, key: &str) -> Result<f64, SceneError> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(k), Some(v), None) if k == key => v
            .parse()
            .map_err(|_| SceneError::parse(line_no, format!("invalid `{key}` value `{v}`"))),
        _ => Err(SceneError::parse(line_no, format!("expected `{key} <float>`"))),
    }
}

fn parse_uv(line_no: usize, line: &str, camera: &str) -> Result<Projection, SceneError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let [tag, marker, x, y] = parts.as_slice() else {
        return Err(SceneError::parse(line_no, "expected `uv <marker> <x> <y>`"));
    };
    if *tag != "uv" {
        return Err(SceneError::parse(line_no, "expected `uv <marker> <x> <y>`"));
    }
    let pixel = match (*x == SENTINEL, *y == SENTINEL) {
        (true, true) => None,
        (false, false) => {
            let coord = |s: &str| {
                s.parse::<f64>()
                    .map_err(|_| SceneError::parse(line_no, format!("invalid coordinate `{s}`")))
            };
            Some(Pt2::new(coord(*x)?, coord(*y)?))
        }
        _ => {
            return Err(SceneError::parse(
                line_no,
                "sentinel must cover both coordinates",
            ))
        }
    };
    Ok(Projection {
        camera: camera.to_string(),
        marker: marker.to_string(),
        pixel,
    })
}
