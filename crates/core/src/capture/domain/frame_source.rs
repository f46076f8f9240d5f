use crate::shared::raw_frame::RawFrame;

/// Capture-side metadata reported when a source opens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SensorInfo {
    pub width: u32,
    pub height: u32,
    /// Mounting orientation of the sensor in degrees, when the device
    /// reports one.
    pub sensor_orientation: Option<i32>,
}

/// Delivers raw frames from a capture device.
///
/// Implementations own the device handle and its streaming details; the
/// pipeline works with the abstract `RawFrame` type.
pub trait FrameSource: Send {
    /// Opens the device and returns its sensor metadata.
    fn open(&mut self) -> Result<SensorInfo, Box<dyn std::error::Error>>;

    /// Returns an iterator over frames in delivery order.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<RawFrame, Box<dyn std::error::Error>>> + '_>;

    /// Releases the device.
    fn close(&mut self);
}
