use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use passguide_core::config::country_spec::CountrySpec;
use passguide_core::config::guide_spec::GuideSpec;
use passguide_core::config::output_resolution::OutputResolution;
use passguide_core::config::overrides::DeveloperOverrides;
use passguide_core::cropping::domain::crop_planner::CropError;
use passguide_core::cropping::infrastructure::resample_renderer::ResampleRenderer;
use passguide_core::detection::domain::face_detector::FaceDetector;
use passguide_core::detection::infrastructure::json_detection_source::JsonDetectionSource;
use passguide_core::detection::infrastructure::skip_frame_detector::SkipFrameDetector;
use passguide_core::guidance::domain::compliance::ComplianceThresholds;
use passguide_core::pipeline::capture_photo_use_case::CapturePhotoUseCase;
use passguide_core::pipeline::guide_frame_use_case::{GuidanceUpdate, GuideFrameUseCase};
use passguide_core::shared::geometry::Size;

/// Passport photo framing guidance and cropping.
///
/// Detections come from an external face detector via a JSON sidecar file;
/// this tool contributes the geometry: live framing feedback (--guide) and
/// the final spec-compliant crop.
#[derive(Parser)]
#[command(name = "passguide")]
struct Cli {
    /// Input image (a captured camera frame).
    input: PathBuf,

    /// Output photo file (required unless --guide is used).
    output: Option<PathBuf>,

    /// Detection sidecar file (defaults to <input>.faces.json).
    #[arg(long)]
    detections: Option<PathBuf>,

    /// Report framing compliance instead of producing a photo.
    #[arg(long)]
    guide: bool,

    /// Country/document preset: standard or usa.
    #[arg(long, default_value = "standard")]
    country: String,

    /// Output resolution preset: standard-res, high-res or super-high-res.
    #[arg(long, default_value = "high-res")]
    resolution: String,

    /// Face height as a fraction of the photo height (overrides the preset).
    #[arg(long)]
    face_scale: Option<f64>,

    /// Head-top offset as a fraction of the photo height (overrides the preset).
    #[arg(long)]
    head_offset: Option<f64>,

    /// Detector input size, a multiple of 32 between 128 and 608.
    #[arg(long)]
    input_size: Option<u32>,

    /// Detector score threshold (0.0-1.0).
    #[arg(long)]
    score_threshold: Option<f64>,

    /// Frames to reuse a detection for in a live loop (0 = detect every frame).
    #[arg(long)]
    skip_frames: Option<usize>,

    /// Display size for guide mode as WIDTHxHEIGHT (defaults to the image size).
    #[arg(long)]
    display: Option<String>,

    /// Persist the effective override values for future runs.
    #[arg(long)]
    save_settings: bool,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let country = CountrySpec::by_code(&cli.country)
        .ok_or_else(|| format!("Unknown country '{}' (try: standard, usa)", cli.country))?;
    let resolution = OutputResolution::by_code(&cli.resolution).ok_or_else(|| {
        format!(
            "Unknown resolution '{}' (try: standard-res, high-res, super-high-res)",
            cli.resolution
        )
    })?;

    let mut overrides = DeveloperOverrides::load();
    apply_cli_overrides(&mut overrides, &cli);
    if cli.save_settings {
        overrides.save();
        log::info!("Saved override settings");
    }

    let image = image::open(&cli.input)
        .map_err(|e| format!("failed to read {}: {e}", cli.input.display()))?
        .to_rgb8();
    let detector = build_detector(&cli, &overrides);
    let spec = overrides.guide_spec(country);

    if cli.guide {
        run_guide(&cli, detector, &image, spec)
    } else {
        run_crop(&cli, detector, &image, spec, resolution)
    }
}

fn run_guide(
    cli: &Cli,
    detector: Box<dyn FaceDetector>,
    image: &image::RgbImage,
    spec: GuideSpec,
) -> Result<(), Box<dyn std::error::Error>> {
    let display = match &cli.display {
        Some(s) => parse_display(s)?,
        None => Size::of_image(image),
    };

    let mut use_case = GuideFrameUseCase::new(detector, ComplianceThresholds::default());
    match use_case.execute(image, display, &spec)? {
        GuidanceUpdate::NoFace => {
            if cli.json {
                println!("{}", serde_json::json!({ "status": "no-face" }));
            } else {
                println!("No face detected");
            }
        }
        GuidanceUpdate::Placed {
            overlay,
            compliance,
            shoulders,
        } => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "status": compliance.status.to_string(),
                        "message": compliance.message,
                        "overlay": overlay,
                        "shoulders": {
                            "top_y": shoulders.top_y,
                            "bottom_y": shoulders.bottom_y,
                        },
                    })
                );
            } else {
                println!(
                    "Overlay: {:.1}x{:.1} at ({:.1}, {:.1})",
                    overlay.width, overlay.height, overlay.x, overlay.y
                );
                println!("Status: {}", compliance.status);
                println!("{}", compliance.message.trim_end());
                println!(
                    "Shoulder band: y {:.1} to {:.1}",
                    shoulders.top_y, shoulders.bottom_y
                );
            }
        }
    }
    Ok(())
}

fn run_crop(
    cli: &Cli,
    detector: Box<dyn FaceDetector>,
    image: &image::RgbImage,
    spec: GuideSpec,
    resolution: &OutputResolution,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = cli.output.as_ref().ok_or("Output file is required")?;

    let mut use_case = CapturePhotoUseCase::new(detector, Box::new(ResampleRenderer::new()));
    match use_case.execute(image, &spec, resolution) {
        Ok(photo) => {
            photo.image.save(output)?;
            log::info!("Output written to {}", output.display());
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "status": "ok",
                        "output": output,
                        "crop": photo.plan.crop,
                        "output_size": photo.plan.output_size,
                    })
                );
            } else {
                println!(
                    "Saved {}x{} photo to {}",
                    photo.image.width(),
                    photo.image.height(),
                    output.display()
                );
            }
            Ok(())
        }
        Err(e) if e.downcast_ref::<CropError>() == Some(&CropError::NoFaceDetected) => {
            // Expected outcome, not a failure: report it without the error
            // prefix, but keep a nonzero exit for scripts.
            if cli.json {
                println!("{}", serde_json::json!({ "status": "no-face" }));
            } else {
                println!("No face detected in the photo!");
            }
            process::exit(1);
        }
        Err(e) => Err(e),
    }
}

fn build_detector(cli: &Cli, overrides: &DeveloperOverrides) -> Box<dyn FaceDetector> {
    let path = cli
        .detections
        .clone()
        .unwrap_or_else(|| sidecar_path(&cli.input));
    let options = overrides.detector_options();
    log::debug!(
        "external detector options: input_size={}, score_threshold={}",
        options.input_size,
        options.score_threshold
    );

    let base: Box<dyn FaceDetector> = Box::new(JsonDetectionSource::new(path));
    if overrides.frames_to_skip > 0 {
        Box::new(SkipFrameDetector::new(base, overrides.frames_to_skip))
    } else {
        base
    }
}

fn apply_cli_overrides(overrides: &mut DeveloperOverrides, cli: &Cli) {
    if let Some(v) = cli.face_scale {
        overrides.face_scale_height = v;
    }
    if let Some(v) = cli.head_offset {
        overrides.face_offset_top_ratio = v;
    }
    if let Some(v) = cli.input_size {
        overrides.input_size = v;
    }
    if let Some(v) = cli.score_threshold {
        overrides.score_threshold = v;
    }
    if let Some(v) = cli.skip_frames {
        overrides.frames_to_skip = v;
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !cli.guide && cli.output.is_none() {
        return Err("Output file is required unless --guide is used".into());
    }
    if let Some(scale) = cli.face_scale {
        if !(scale > 0.0 && scale < 1.0) {
            return Err(format!(
                "Face scale must be between 0.0 and 1.0 exclusive, got {scale}"
            )
            .into());
        }
    }
    if let Some(offset) = cli.head_offset {
        if !(offset > 0.0 && offset < 1.0) {
            return Err(format!(
                "Head offset must be between 0.0 and 1.0 exclusive, got {offset}"
            )
            .into());
        }
    }
    if let Some(size) = cli.input_size {
        if size % 32 != 0 || !(128..=608).contains(&size) {
            return Err(format!(
                "Input size must be a multiple of 32 between 128 and 608, got {size}"
            )
            .into());
        }
    }
    if let Some(threshold) = cli.score_threshold {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(format!(
                "Score threshold must be between 0.0 and 1.0, got {threshold}"
            )
            .into());
        }
    }
    if let Some(display) = &cli.display {
        parse_display(display)?;
    }
    Ok(())
}

fn parse_display(value: &str) -> Result<Size, Box<dyn std::error::Error>> {
    let err = || format!("Display must be WIDTHxHEIGHT, got '{value}'");
    let (w, h) = value.split_once('x').ok_or_else(err)?;
    let width: f64 = w.parse().map_err(|_| err())?;
    let height: f64 = h.parse().map_err(|_| err())?;
    if width <= 0.0 || height <= 0.0 {
        return Err(err().into());
    }
    Ok(Size::new(width, height))
}

fn sidecar_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".faces.json");
    PathBuf::from(name)
}
