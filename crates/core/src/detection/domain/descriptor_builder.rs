use thiserror::Error;

use crate::shared::image_descriptor::{ImageDescriptor, PixelFormat, PlaneMetadata, Rotation};
use crate::shared::raw_frame::RawFrame;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("frame carried no planes")]
    EmptyFrame,
    #[error("unsupported pixel format code {0}")]
    UnsupportedFormat(i32),
}

/// Converts a raw multi-plane frame into a detector-ready descriptor.
///
/// Plane bytes are concatenated in delivery order (luma first for the YUV
/// family; detectors expect that ordering) and the per-plane layout is
/// retained as metadata. Failures stay inside the pipeline: callers log
/// and skip the frame.
pub fn build(
    frame: &RawFrame,
    sensor_orientation: Option<i32>,
) -> Result<ImageDescriptor, BuildError> {
    if frame.planes().is_empty() {
        return Err(BuildError::EmptyFrame);
    }
    let format = PixelFormat::from_code(frame.format_code());
    if format == PixelFormat::Unsupported {
        return Err(BuildError::UnsupportedFormat(frame.format_code()));
    }

    let total: usize = frame.planes().iter().map(|p| p.bytes().len()).sum();
    let mut bytes = Vec::with_capacity(total);
    let mut planes = Vec::with_capacity(frame.planes().len());
    for plane in frame.planes() {
        bytes.extend_from_slice(plane.bytes());
        planes.push(PlaneMetadata {
            bytes_per_row: plane.bytes_per_row(),
            width: plane.width(),
            height: plane.height(),
        });
    }

    Ok(ImageDescriptor::new(
        bytes,
        frame.width() as f32,
        frame.height() as f32,
        Rotation::from_degrees(sensor_orientation),
        format,
        planes,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::raw_frame::Plane;
    use approx::assert_relative_eq;

    fn nv21_frame(width: u32, height: u32) -> RawFrame {
        let luma = vec![1u8; (width * height) as usize];
        let chroma = vec![128u8; (width * height / 2) as usize];
        RawFrame::new(
            vec![
                Plane::new(luma, width as usize, width, height),
                Plane::new(chroma, width as usize, width, height / 2),
            ],
            width,
            height,
            17,
            0,
        )
    }

    #[test]
    fn test_concatenates_planes_in_order() {
        let frame = RawFrame::new(
            vec![
                Plane::new(vec![1u8; 8], 4, 4, 2),
                Plane::new(vec![2u8; 4], 4, 4, 1),
                Plane::new(vec![3u8; 4], 4, 4, 1),
            ],
            4,
            2,
            35,
            0,
        );
        let desc = build(&frame, None).unwrap();
        assert_eq!(desc.bytes().len(), 16);
        assert_eq!(&desc.bytes()[..8], &[1u8; 8]);
        assert_eq!(&desc.bytes()[8..12], &[2u8; 4]);
        assert_eq!(&desc.bytes()[12..], &[3u8; 4]);
    }

    #[test]
    fn test_metadata_matches_plane_count_and_order() {
        let frame = RawFrame::new(
            vec![
                Plane::new(vec![0u8; 12], 6, 4, 2),
                Plane::new(vec![0u8; 6], 6, 4, 1),
            ],
            4,
            2,
            17,
            0,
        );
        let desc = build(&frame, None).unwrap();
        assert_eq!(desc.planes().len(), 2);
        assert_eq!(desc.planes()[0].height, 2);
        assert_eq!(desc.planes()[1].height, 1);
        assert!(desc.planes().iter().all(|p| p.bytes_per_row == 6));
        assert_eq!(
            desc.bytes().len(),
            frame.planes().iter().map(|p| p.bytes().len()).sum::<usize>()
        );
    }

    #[test]
    fn test_logical_size_and_format() {
        let desc = build(&nv21_frame(640, 480), None).unwrap();
        assert_relative_eq!(desc.width(), 640.0);
        assert_relative_eq!(desc.height(), 480.0);
        assert_eq!(desc.format(), PixelFormat::Nv21);
    }

    #[test]
    fn test_rotation_resolved_from_sensor_orientation() {
        let desc = build(&nv21_frame(4, 4), Some(270)).unwrap();
        assert_eq!(desc.rotation(), Rotation::Deg270);
    }

    #[test]
    fn test_rotation_defaults_when_orientation_absent() {
        let desc = build(&nv21_frame(4, 4), None).unwrap();
        assert_eq!(desc.rotation(), Rotation::Deg0);
    }

    #[test]
    fn test_unsupported_format_carries_code() {
        let frame = RawFrame::new(vec![Plane::new(vec![0u8; 4], 2, 2, 2)], 2, 2, 999, 0);
        match build(&frame, None) {
            Err(BuildError::UnsupportedFormat(code)) => assert_eq!(code, 999),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_frame_rejected() {
        let frame = RawFrame::new(Vec::new(), 2, 2, 17, 0);
        assert!(matches!(build(&frame, None), Err(BuildError::EmptyFrame)));
    }

    #[test]
    fn test_yuv420_maps_from_code_35() {
        let frame = RawFrame::new(vec![Plane::new(vec![0u8; 4], 2, 2, 2)], 2, 2, 35, 0);
        let desc = build(&frame, None).unwrap();
        assert_eq!(desc.format(), PixelFormat::Yuv420);
    }
}
