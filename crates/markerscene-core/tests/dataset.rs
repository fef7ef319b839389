use std::{fs, path::Path};

use markerscene_core::{
    generate_dataset, Camera, CameraPlacement, FrameRenderer, ImageSize, Marker, NullRenderer,
    PinholeViewProjector, ProceduralPlacement, RealRange, Scene, SceneConfig, SceneError,
    SceneExport, SplatRenderer, SCENE_FILE_NAME,
};

fn config_in(dir: &Path) -> SceneConfig {
    SceneConfig {
        output_dir: dir.to_path_buf(),
        ..Default::default()
    }
}

fn scn_text(config: &SceneConfig) -> String {
    let scene = Scene::from_config(config).unwrap();
    scene
        .export(&PinholeViewProjector::new(config.image), config)
        .to_scn_string()
}

#[derive(Default)]
struct RecordingRenderer {
    frames: Vec<String>,
}

impl FrameRenderer for RecordingRenderer {
    fn render(&mut self, camera: &Camera, markers: &[Marker], path: &Path) -> Result<(), SceneError> {
        assert_eq!(markers.len(), 10);
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), format!("{}.png", camera.name()));
        self.frames.push(camera.name().to_string());
        Ok(())
    }
}

struct FailingRenderer {
    fail_on: &'static str,
}

impl FrameRenderer for FailingRenderer {
    fn render(&mut self, camera: &Camera, _markers: &[Marker], _path: &Path) -> Result<(), SceneError> {
        if camera.name() == self.fail_on {
            return Err(SceneError::Render {
                camera: camera.name().to_string(),
                reason: "backend unavailable".into(),
            });
        }
        Ok(())
    }
}

#[test]
fn default_dataset_has_one_record_per_camera_marker_pair() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let mut renderer = RecordingRenderer::default();

    let dataset = generate_dataset(&config, &PinholeViewProjector::new(config.image), &mut renderer)
        .unwrap();

    assert_eq!(renderer.frames, ["c0", "c1", "c2", "c3", "c4", "c5", "c6"]);
    assert_eq!(dataset.scene_file, dir.path().join(SCENE_FILE_NAME));

    let text = fs::read_to_string(&dataset.scene_file).unwrap();
    let parsed = SceneExport::parse(&text).unwrap();
    assert_eq!(parsed.to_scn_string(), text);
    assert_eq!(text, dataset.export.to_scn_string());
    assert_eq!(parsed.blocks.len(), dataset.scene.cameras.len());

    for (block, camera) in parsed.blocks.iter().zip(&dataset.scene.cameras) {
        assert_eq!(block.camera, camera.name());
        assert_eq!(block.intrinsics.fx, block.intrinsics.fy);
        let names: Vec<_> = block.observations.iter().map(|o| o.marker.as_str()).collect();
        let expected: Vec<_> = dataset.scene.markers.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, expected);
    }
}

#[test]
fn visible_coordinates_are_inside_the_image_and_sentinels_are_exact() {
    let config = SceneConfig::default();
    let text = scn_text(&config);
    let image = config.image;

    let mut visible = 0;
    let mut hidden = 0;
    for line in text.lines().filter(|l| l.starts_with("uv ")) {
        let parts: Vec<_> = line.split(' ').collect();
        assert_eq!(parts.len(), 4, "line={line}");
        if parts[2] == "-1" || parts[3] == "-1" {
            assert_eq!(&parts[2..], ["-1", "-1"]);
            hidden += 1;
        } else {
            let x: f64 = parts[2].parse().unwrap();
            let y: f64 = parts[3].parse().unwrap();
            assert!(image.contains(x, y), "line={line}");
            assert_eq!(parts[2].split('.').nth(1).map(str::len), Some(2));
            visible += 1;
        }
    }
    assert_eq!(visible + hidden, 7 * 10);
    assert!(visible > 0);
}

#[test]
fn intrinsics_lines_use_six_digits() {
    let text = scn_text(&SceneConfig::default());
    let head: Vec<_> = text.lines().take(5).collect();
    assert_eq!(
        head,
        [
            "camera c0",
            "fx 1866.666667",
            "fy 1866.666667",
            "cx 960.000000",
            "cy 540.000000"
        ]
    );
}

#[test]
fn square_corner_visible_in_side_camera() {
    let config = SceneConfig::default();
    let scene = Scene::from_config(&config).unwrap();
    let export = scene.export(&PinholeViewProjector::new(config.image), &config);
    let c1 = export.blocks.iter().find(|b| b.camera == "c1").unwrap();
    let m0 = &c1.observations[0];
    assert_eq!(m0.marker, "m0");
    let px = m0.pixel.expect("m0 visible from c1");
    assert!(config.image.contains(px.x, px.y));
}

#[test]
fn same_seed_gives_identical_bytes() {
    let mut config = SceneConfig::default();
    config.cameras.placement = CameraPlacement::Procedural(ProceduralPlacement::default());
    config.cameras.max_cameras = 9;
    assert_eq!(scn_text(&config), scn_text(&config));

    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();
    let projector = PinholeViewProjector::new(config.image);
    for dir in [&dir_a, &dir_b] {
        let cfg = SceneConfig {
            output_dir: dir.path().to_path_buf(),
            ..config.clone()
        };
        generate_dataset(&cfg, &projector, &mut NullRenderer).unwrap();
    }
    let a = fs::read(dir_a.path().join(SCENE_FILE_NAME)).unwrap();
    let b = fs::read(dir_b.path().join(SCENE_FILE_NAME)).unwrap();
    assert_eq!(a, b);

    let other = SceneConfig {
        seed: config.seed + 1,
        ..config.clone()
    };
    assert_ne!(scn_text(&config), scn_text(&other));
}

#[test]
fn disabling_top_removes_its_block() {
    let mut config = SceneConfig::default();
    config.cameras.include_top = false;
    let text = scn_text(&config);
    assert_eq!(text.matches("camera ").count(), 6);
    assert!(!text.contains("camera c6"));

    config.cameras.max_cameras = 2;
    let export = SceneExport::parse(&scn_text(&config)).unwrap();
    assert_eq!(export.blocks.len(), 2);
}

#[test]
fn render_failure_leaves_no_scene_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let mut renderer = FailingRenderer { fail_on: "c3" };

    let err = generate_dataset(&config, &PinholeViewProjector::new(config.image), &mut renderer)
        .unwrap_err();
    assert!(matches!(err, SceneError::Render { ref camera, .. } if camera == "c3"));
    assert!(!dir.path().join(SCENE_FILE_NAME).exists());
}

#[test]
fn invalid_config_fails_before_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never");
    let mut config = config_in(&out);
    config.cameras.placement = CameraPlacement::Procedural(ProceduralPlacement {
        radius_range: RealRange::new(9.0, 7.5),
        ..Default::default()
    });

    let err = generate_dataset(&config, &PinholeViewProjector::new(config.image), &mut NullRenderer)
        .unwrap_err();
    assert!(matches!(err, SceneError::InvalidRange { .. }));
    assert!(!out.exists());
}

#[test]
fn splat_renderer_writes_one_png_per_camera() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.image = ImageSize {
        width: 192,
        height: 108,
    };
    config.cameras.max_cameras = 3;
    let projector = PinholeViewProjector::new(config.image);
    let mut renderer = SplatRenderer::new(projector, config.image, config.markers.radius);

    generate_dataset(&config, &projector, &mut renderer).unwrap();
    for name in ["c0", "c1", "c2"] {
        let img = fs::read(dir.path().join(format!("{name}.png"))).unwrap();
        assert_eq!(&img[1..4], b"PNG");
    }
    assert!(dir.path().join(SCENE_FILE_NAME).exists());
}
