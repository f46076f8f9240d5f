use std::process;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;

use facestream_core::capture::infrastructure::synthetic_camera::SyntheticCamera;
use facestream_core::detection::infrastructure::simulated_detector::SimulatedDetector;
use facestream_core::pipeline::stream_controller::StreamController;
use facestream_core::shared::region::FaceRegion;

/// Live detection pipeline demo over a synthetic camera.
#[derive(Parser)]
#[command(name = "facestream")]
struct Cli {
    /// Frame width in pixels.
    #[arg(long, default_value = "640")]
    width: u32,

    /// Frame height in pixels.
    #[arg(long, default_value = "480")]
    height: u32,

    /// Number of frames the synthetic camera delivers.
    #[arg(long, default_value = "120")]
    frames: usize,

    /// Synthetic camera frame rate (0 = unpaced).
    #[arg(long, default_value = "30")]
    fps: u32,

    /// Simulated detector latency in milliseconds.
    #[arg(long, default_value = "80")]
    detect_latency_ms: u64,

    /// Number of faces the simulated detector reports per frame.
    #[arg(long, default_value = "1")]
    faces: usize,

    /// Sensor mounting orientation in degrees.
    #[arg(long)]
    orientation: Option<i32>,

    /// Disable detection admission after this many milliseconds.
    #[arg(long)]
    disable_after_ms: Option<u64>,
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

    let mut source = SyntheticCamera::new(cli.width, cli.height, cli.frames);
    if cli.fps > 0 {
        source = source.with_frame_interval(Duration::from_secs_f64(1.0 / cli.fps as f64));
    }
    if let Some(degrees) = cli.orientation {
        source = source.with_sensor_orientation(degrees);
    }

    let regions: Vec<FaceRegion> = (0..cli.faces)
        .map(|i| FaceRegion::new(40 + 110 * i as i32, 60, 90, 90))
        .collect();
    let detector = SimulatedDetector::new(regions)
        .with_latency(Duration::from_millis(cli.detect_latency_ms));

    let controller = StreamController::start(Box::new(source), Box::new(detector))?;
    let state = controller.state();

    let started = Instant::now();
    let mut disabled = false;
    while !controller.is_finished() {
        thread::sleep(Duration::from_millis(250));

        if let Some(after_ms) = cli.disable_after_ms {
            if !disabled && started.elapsed() >= Duration::from_millis(after_ms) {
                controller.set_enabled(false);
                disabled = true;
            }
        }

        let snapshot = state.snapshot();
        log::info!("{}", snapshot.status);
    }

    controller.stop()?;

    let snapshot = state.snapshot();
    log::info!(
        "final result after {:.1}s: {} ({} regions)",
        started.elapsed().as_secs_f64(),
        snapshot.status,
        snapshot.regions.len()
    );
    Ok(())
}
