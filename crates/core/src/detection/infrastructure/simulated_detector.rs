use std::thread;
use std::time::Duration;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::image_descriptor::ImageDescriptor;
use crate::shared::region::FaceRegion;

/// Stand-in detector that reports a canned set of regions.
///
/// Fills the detector port where no ML runtime is wired: CLI demos and
/// latency experiments. The optional artificial latency models a slow model
/// so gate behavior (frame dropping under load) can be observed end to end.
pub struct SimulatedDetector {
    regions: Vec<FaceRegion>,
    latency: Option<Duration>,
    invocations: usize,
    closed: bool,
}

impl SimulatedDetector {
    pub fn new(regions: Vec<FaceRegion>) -> Self {
        Self {
            regions,
            latency: None,
            invocations: 0,
            closed: false,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn invocations(&self) -> usize {
        self.invocations
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl FaceDetector for SimulatedDetector {
    fn detect(
        &mut self,
        _image: &ImageDescriptor,
    ) -> Result<Vec<FaceRegion>, Box<dyn std::error::Error>> {
        if self.closed {
            return Err("detector invoked after close".into());
        }
        if let Some(latency) = self.latency {
            thread::sleep(latency);
        }
        self.invocations += 1;
        Ok(self.regions.clone())
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
