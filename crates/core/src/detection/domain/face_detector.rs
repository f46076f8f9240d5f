use crate::shared::image_descriptor::ImageDescriptor;
use crate::shared::region::FaceRegion;

/// Domain interface for face detection over normalized image descriptors.
///
/// Implementations may be stateful (e.g., tracking across frames),
/// hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect(
        &mut self,
        image: &ImageDescriptor,
    ) -> Result<Vec<FaceRegion>, Box<dyn std::error::Error>>;

    /// Releases any resources held by the detector. Called exactly once,
    /// after the last `detect` has returned.
    fn close(&mut self);
}
