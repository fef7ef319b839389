use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use markerscene_core::{
    generate_dataset, CameraPlacement, Dataset, FrameRenderer, NullRenderer, PinholeViewProjector,
    ProceduralPlacement, SceneConfig, SplatRenderer,
};
use serde::Serialize;

/// Synthetic multi-camera marker dataset generator.
#[derive(Debug, Parser)]
#[command(author, version, about = "Generate a ground-truth multi-camera marker dataset")]
struct Args {
    /// Optional path to a JSON SceneConfig. Defaults are used if omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory (overrides the config file).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Random seed (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of cameras (overrides the config file).
    #[arg(long)]
    max_cameras: Option<usize>,

    /// Leave out the elevated top camera.
    #[arg(long)]
    no_top: bool,

    /// Use procedural camera placement instead of the fixed list.
    #[arg(long)]
    procedural: bool,

    /// Skip writing per-camera images.
    #[arg(long)]
    no_render: bool,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    dump_config: bool,
}

#[derive(Debug, Serialize)]
struct CameraSummary {
    camera: String,
    visible: usize,
}

#[derive(Debug, Serialize)]
struct GenerationReport {
    output: PathBuf,
    scene_file: PathBuf,
    num_cameras: usize,
    num_markers: usize,
    visible: Vec<CameraSummary>,
}

impl GenerationReport {
    fn from_dataset(config: &SceneConfig, dataset: &Dataset) -> Self {
        Self {
            output: config.output_dir.clone(),
            scene_file: dataset.scene_file.clone(),
            num_cameras: dataset.scene.cameras.len(),
            num_markers: dataset.scene.markers.len(),
            visible: dataset
                .export
                .blocks
                .iter()
                .map(|b| CameraSummary {
                    camera: b.camera.clone(),
                    visible: b.num_visible(),
                })
                .collect(),
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<SceneConfig> {
    match path {
        Some(p) => {
            SceneConfig::load(p).with_context(|| format!("loading config {}", p.display()))
        }
        None => Ok(SceneConfig::default()),
    }
}

fn effective_config(args: &Args) -> Result<SceneConfig> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(max) = args.max_cameras {
        config.cameras.max_cameras = max;
    }
    if args.no_top {
        config.cameras.include_top = false;
    }
    if args.procedural && !matches!(config.cameras.placement, CameraPlacement::Procedural(_)) {
        config.cameras.placement = CameraPlacement::Procedural(ProceduralPlacement::default());
    }
    Ok(config)
}

fn run(config: &SceneConfig, render: bool) -> Result<String> {
    let projector = PinholeViewProjector::new(config.image);
    let mut renderer: Box<dyn FrameRenderer> = if render {
        Box::new(SplatRenderer::new(
            projector,
            config.image,
            config.markers.radius,
        ))
    } else {
        Box::new(NullRenderer)
    };
    let dataset = generate_dataset(config, &projector, renderer.as_mut())
        .context("dataset generation failed")?;
    let report = GenerationReport::from_dataset(config, &dataset);
    Ok(serde_json::to_string_pretty(&report)?)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = try_main() {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    let config = effective_config(&args)?;
    if args.dump_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }
    let json = run(&config, !args.no_render)?;
    println!("{json}");
    Ok(())
}
