use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use thiserror::Error;

use crate::capture::domain::frame_source::FrameSource;
use crate::detection::domain::descriptor_builder;
use crate::detection::domain::face_detector::FaceDetector;
use crate::pipeline::pipeline_state::PipelineState;
use crate::shared::image_descriptor::ImageDescriptor;

#[derive(Error, Debug)]
pub enum StartError {
    #[error("no capture device available: {0}")]
    DeviceUnavailable(String),
}

#[derive(Error, Debug)]
pub enum StopError {
    #[error("capture thread panicked")]
    CaptureThreadPanicked,
    #[error("detection worker panicked")]
    WorkerThreadPanicked,
}

/// Runs one capture-to-detection stream.
///
/// Layout: `capture [admit/build] → worker [detect/publish]`
///
/// The capture thread performs gate admission and descriptor construction
/// (both bounded by frame size) and hands admitted descriptors to a
/// dedicated detection worker, so frame delivery never waits on the
/// detector. Frames that lose admission are dropped, not buffered.
pub struct StreamController {
    state: Arc<PipelineState>,
    stop_flag: Arc<AtomicBool>,
    capture_handle: thread::JoinHandle<Box<dyn FrameSource>>,
    worker_handle: thread::JoinHandle<Box<dyn FaceDetector>>,
}

impl StreamController {
    /// Opens the source and spawns the capture and detection threads.
    ///
    /// Fails with `DeviceUnavailable` when the source cannot be opened; no
    /// threads are spawned in that case.
    pub fn start(
        mut source: Box<dyn FrameSource>,
        detector: Box<dyn FaceDetector>,
    ) -> Result<Self, StartError> {
        let info = source
            .open()
            .map_err(|e| StartError::DeviceUnavailable(e.to_string()))?;
        log::info!(
            "stream started: {}x{}, sensor orientation {:?}",
            info.width,
            info.height,
            info.sensor_orientation
        );

        let state = Arc::new(PipelineState::new());
        let stop_flag = Arc::new(AtomicBool::new(false));

        // Capacity 1 matches the gate: a descriptor is only sent after
        // admission, and admission cannot succeed again until the previous
        // result was published. The producer-side send never blocks.
        let (work_tx, work_rx) = crossbeam_channel::bounded::<ImageDescriptor>(1);

        let capture_handle = spawn_capture(
            source,
            info.sensor_orientation,
            state.clone(),
            work_tx,
            stop_flag.clone(),
        );
        let worker_handle = spawn_worker(detector, work_rx, state.clone());

        Ok(Self {
            state,
            stop_flag,
            capture_handle,
            worker_handle,
        })
    }

    /// Handle for the rendering side to read published results.
    pub fn state(&self) -> Arc<PipelineState> {
        self.state.clone()
    }

    /// Enables or disables admission of new frames.
    ///
    /// An in-flight detection is unaffected: it still completes and
    /// publishes. The underlying stream keeps running while disabled;
    /// every frame is rejected at the gate in O(1).
    pub fn set_enabled(&self, enabled: bool) {
        self.state.gate().set_enabled(enabled);
        log::info!(
            "detection {}",
            if enabled { "enabled" } else { "disabled" }
        );
    }

    /// True once the source has delivered its last frame (or delivery was
    /// stopped) and the capture thread has exited.
    pub fn is_finished(&self) -> bool {
        self.capture_handle.is_finished()
    }

    /// Stops frame delivery, waits for an in-flight detection to publish,
    /// and releases both collaborators.
    ///
    /// Waiting (rather than abandoning) keeps the detector alive for the
    /// whole span of its last invocation, so a published result can never
    /// race a torn-down detector.
    pub fn stop(self) -> Result<(), StopError> {
        self.stop_flag.store(true, Ordering::Release);

        let source = self
            .capture_handle
            .join()
            .map_err(|_| StopError::CaptureThreadPanicked)?;
        drop(source);

        // The worker drains the last admitted descriptor, publishes, and
        // closes the detector before returning it.
        let detector = self
            .worker_handle
            .join()
            .map_err(|_| StopError::WorkerThreadPanicked)?;
        drop(detector);

        log::info!("stream stopped");
        Ok(())
    }
}

fn spawn_capture(
    mut source: Box<dyn FrameSource>,
    sensor_orientation: Option<i32>,
    state: Arc<PipelineState>,
    work_tx: crossbeam_channel::Sender<ImageDescriptor>,
    stop_flag: Arc<AtomicBool>,
) -> thread::JoinHandle<Box<dyn FrameSource>> {
    thread::spawn(move || {
        for frame_result in source.frames() {
            if stop_flag.load(Ordering::Acquire) {
                break;
            }

            let frame = match frame_result {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!("frame delivery failed: {e}");
                    continue;
                }
            };

            if !state.gate().try_enter() {
                log::trace!("frame {} dropped: detection busy or disabled", frame.index());
                continue;
            }

            match descriptor_builder::build(&frame, sensor_orientation) {
                Ok(descriptor) => {
                    if work_tx.send(descriptor).is_err() {
                        state.gate().exit();
                        break;
                    }
                }
                Err(e) => {
                    log::warn!("frame {} skipped: {e}", frame.index());
                    state.gate().exit();
                }
            }
        }
        source.close();
        source
    })
}

fn spawn_worker(
    mut detector: Box<dyn FaceDetector>,
    work_rx: crossbeam_channel::Receiver<ImageDescriptor>,
    state: Arc<PipelineState>,
) -> thread::JoinHandle<Box<dyn FaceDetector>> {
    thread::spawn(move || {
        for descriptor in work_rx {
            let regions = match detector.detect(&descriptor) {
                Ok(regions) => regions,
                Err(e) => {
                    log::warn!("detector failed, publishing empty result: {e}");
                    Vec::new()
                }
            };
            // Publish before releasing the slot: `busy` spans the full
            // admission-to-publication window.
            state.publish(regions);
            state.gate().exit();
        }
        detector.close();
        detector
    })
}
