use std::sync::Mutex;

use crate::pipeline::detection_gate::DetectionGate;
use crate::shared::region::FaceRegion;

/// Status line published when the last detection found nothing (or failed).
pub const NO_FACES_STATUS: &str = "No Faces Detected";

/// Latest published detection outcome, read by the rendering side.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionSnapshot {
    pub regions: Vec<FaceRegion>,
    pub status: String,
}

impl DetectionSnapshot {
    fn empty() -> Self {
        Self {
            regions: Vec::new(),
            status: NO_FACES_STATUS.to_string(),
        }
    }
}

/// Shared mutable state of one running stream.
///
/// Holds the admission gate and the last published result. All writers are
/// the pipeline's own threads (admission on the capture thread, publishing
/// on the detection worker); the rendering side only reads snapshots.
pub struct PipelineState {
    gate: DetectionGate,
    snapshot: Mutex<DetectionSnapshot>,
}

impl PipelineState {
    pub fn new() -> Self {
        Self {
            gate: DetectionGate::new(),
            snapshot: Mutex::new(DetectionSnapshot::empty()),
        }
    }

    pub fn gate(&self) -> &DetectionGate {
        &self.gate
    }

    /// Atomically replaces the last result and recomputes the status line.
    pub fn publish(&self, regions: Vec<FaceRegion>) {
        let status = if regions.is_empty() {
            NO_FACES_STATUS.to_string()
        } else {
            format!("Faces Detected: {}", regions.len())
        };
        // A poisoned lock still holds a complete previous snapshot; recover it.
        let mut snapshot = self.snapshot.lock().unwrap_or_else(|e| e.into_inner());
        snapshot.regions = regions;
        snapshot.status = status;
    }

    /// The last published result, eventually consistent with the newest
    /// completed detection.
    pub fn snapshot(&self) -> DetectionSnapshot {
        self.snapshot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new()
    }
}
