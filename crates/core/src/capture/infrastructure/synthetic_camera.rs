use std::thread;
use std::time::Duration;

use crate::capture::domain::frame_source::{FrameSource, SensorInfo};
use crate::shared::image_descriptor::NV21_FORMAT_CODE;
use crate::shared::raw_frame::{Plane, RawFrame};

/// Hardware-free frame source producing well-formed two-plane NV21 frames.
///
/// The luma plane carries a gradient that shifts per frame so consecutive
/// frames are distinguishable; the chroma plane is neutral gray. Used by the
/// CLI and by integration tests to run the full pipeline without a device.
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    frame_count: usize,
    frame_interval: Option<Duration>,
    sensor_orientation: Option<i32>,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32, frame_count: usize) -> Self {
        Self {
            width,
            height,
            frame_count,
            frame_interval: None,
            sensor_orientation: None,
        }
    }

    /// Paces frame delivery, sleeping between frames like a real sensor.
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = Some(interval);
        self
    }

    pub fn with_sensor_orientation(mut self, degrees: i32) -> Self {
        self.sensor_orientation = Some(degrees);
        self
    }
}

impl FrameSource for SyntheticCamera {
    fn open(&mut self) -> Result<SensorInfo, Box<dyn std::error::Error>> {
        if self.width == 0 || self.height == 0 {
            return Err("synthetic camera configured with zero-sized frames".into());
        }
        Ok(SensorInfo {
            width: self.width,
            height: self.height,
            sensor_orientation: self.sensor_orientation,
        })
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<RawFrame, Box<dyn std::error::Error>>> + '_> {
        let width = self.width;
        let height = self.height;
        let interval = self.frame_interval;
        Box::new((0..self.frame_count).map(move |index| {
            if let Some(interval) = interval {
                if index > 0 {
                    thread::sleep(interval);
                }
            }
            Ok(nv21_frame(width, height, index))
        }))
    }

    fn close(&mut self) {}
}

fn nv21_frame(width: u32, height: u32, index: usize) -> RawFrame {
    let w = width as usize;
    let h = height as usize;

    let mut luma = vec![0u8; w * h];
    for (row, line) in luma.chunks_mut(w).enumerate() {
        for (col, px) in line.iter_mut().enumerate() {
            *px = ((row + col + index) % 256) as u8;
        }
    }
    // Interleaved VU at half vertical resolution, neutral gray.
    let chroma = vec![128u8; w * (h / 2)];

    RawFrame::new(
        vec![
            Plane::new(luma, w, width, height),
            Plane::new(chroma, w, width, height / 2),
        ],
        width,
        height,
        NV21_FORMAT_CODE,
        index,
    )
}
