//! Command-line front-end for the gore rosette pipeline.
//!
//! Parameters are layered: built-in defaults, then the YAML file given with
//! `--config`, then `GORE_*` environment variables, then command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use gore::{make_rotary, Outcome, PipelineControl, Stage};
use gore_common::{Color, InterpolationMethod, PipelineParameters, ProjectionKind};
use image::RgbaImage;
use renderer::{compose, png};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Turn a disk image into a gore rosette
#[derive(Parser, Debug, Clone)]
#[command(name = "gore-cli")]
#[command(about = "Lay out a spherical disk image as a rosette of gores")]
pub struct Args {
    /// Source image, a disk centered on the optical axis
    pub input: PathBuf,

    /// Output image; PNG unless the extension says otherwise
    #[arg(short, long)]
    pub output: PathBuf,

    /// YAML parameter file (angles in degrees)
    #[arg(short, long, env = "GORE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Lens focal length
    #[arg(long)]
    pub focal_length: Option<f64>,

    /// Model eye radius
    #[arg(long)]
    pub eye_radius: Option<f64>,

    /// Half field of view of the source disk, degrees
    #[arg(long)]
    pub alpha_max: Option<f64>,

    /// Number of gores
    #[arg(short = 'n', long)]
    pub num_gores: Option<usize>,

    /// Angular radius of the polar cap, degrees
    #[arg(long)]
    pub phi_no_cut: Option<f64>,

    /// Largest distance from the pole kept in the gores, degrees
    #[arg(long)]
    pub alpha_limit: Option<f64>,

    /// Gore projection (sinusoidal, cassini, orthographic, azimuthal_equidistant)
    #[arg(short, long)]
    pub projection: Option<ProjectionKind>,

    /// Polar cap projection
    #[arg(long)]
    pub cap_projection: Option<ProjectionKind>,

    /// Pre-rotation, degrees counter-clockwise
    #[arg(long)]
    pub rotation: Option<f64>,

    /// Downscale fraction in (0, 1]
    #[arg(short, long)]
    pub quality: Option<f64>,

    /// Flatten source transparency onto this color (#RRGGBB or a name)
    #[arg(long)]
    pub background: Option<Color>,

    /// Sampling method (nearest, bilinear)
    #[arg(long)]
    pub interpolation: Option<InterpolationMethod>,

    /// Write an opaque image, filling transparency with the background color
    #[arg(long)]
    pub flatten: bool,

    /// Print the resolved parameters as JSON and exit
    #[arg(long)]
    pub print_config: bool,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

/// Install the global tracing subscriber.
pub fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Resolve the parameters for a run from every configuration layer.
pub fn resolve_parameters(args: &Args) -> Result<PipelineParameters> {
    let base = match &args.config {
        Some(path) => PipelineParameters::from_yaml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PipelineParameters::default(),
    };
    let mut params = base.with_env_overrides();

    if let Some(v) = args.focal_length {
        params.focal_length = v;
    }
    if let Some(v) = args.eye_radius {
        params.eye_radius = v;
    }
    if let Some(v) = args.alpha_max {
        params.alpha_max = v.to_radians();
    }
    if let Some(v) = args.num_gores {
        params.num_gores = v;
    }
    if let Some(v) = args.phi_no_cut {
        params.phi_no_cut = v.to_radians();
    }
    if let Some(v) = args.alpha_limit {
        params.alpha_limit = v.to_radians();
    }
    if let Some(v) = args.projection {
        params.projection = v;
    }
    if let Some(v) = args.cap_projection {
        params.cap_projection = v;
    }
    if let Some(v) = args.rotation {
        params.rotation_deg = v;
    }
    if let Some(v) = args.quality {
        params.quality = v;
    }
    if args.background.is_some() {
        params.background = args.background;
    }
    if let Some(v) = args.interpolation {
        params.interpolation = v;
    }

    params.validate().context("Invalid parameters")?;
    Ok(params)
}

/// Run the pipeline for one input file.
pub fn run(args: &Args) -> Result<()> {
    let params = resolve_parameters(args)?;

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&params)?);
        return Ok(());
    }

    let source = image::open(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?
        .to_rgba8();
    info!(
        input = %args.input.display(),
        width = source.width(),
        height = source.height(),
        "Loaded source image"
    );

    let progress = |stage: Stage| info!(stage = %stage, "Stage started");
    let control = PipelineControl::none().with_progress(&progress);

    let rosette = match make_rotary(&source, &params, &control)? {
        Outcome::Completed(rosette) => rosette,
        Outcome::Cancelled => bail!("Pipeline was cancelled"),
    };

    let background = params.background.unwrap_or(Color::WHITE);
    write_output(&args.output, &rosette, args.flatten.then_some(background))?;
    info!(
        output = %args.output.display(),
        width = rosette.width(),
        height = rosette.height(),
        "Wrote rosette"
    );
    Ok(())
}

/// Write `image`, flattened onto `flatten` if given. `.png` paths (and paths
/// without an extension) go through the renderer's PNG writer.
pub fn write_output(path: &Path, image: &RgbaImage, flatten: Option<Color>) -> Result<()> {
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .map_or(true, |e| e.eq_ignore_ascii_case("png"));

    let written = match (is_png, flatten) {
        (true, Some(color)) => png::write_rgb(path, &compose::flatten_to_rgb(image, color)),
        (true, None) => png::write_rgba(path, image),
        (false, Some(color)) => compose::flatten_to_rgb(image, color)
            .save(path)
            .map_err(Into::into),
        (false, None) => image.save(path).map_err(Into::into),
    };
    written.with_context(|| format!("Failed to write {}", path.display()))
}
