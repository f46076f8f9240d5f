/// One plane of a multi-planar camera frame: raw bytes plus row stride.
///
/// Strides may exceed the plane width when the device pads rows for
/// alignment; consumers must honor `bytes_per_row` when indexing.
#[derive(Clone, Debug)]
pub struct Plane {
    bytes: Vec<u8>,
    bytes_per_row: usize,
    width: u32,
    height: u32,
}

impl Plane {
    pub fn new(bytes: Vec<u8>, bytes_per_row: usize, width: u32, height: u32) -> Self {
        debug_assert!(
            bytes_per_row >= width as usize,
            "row stride must cover the plane width"
        );
        Self {
            bytes,
            bytes_per_row,
            width,
            height,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// A single device-delivered frame, exactly as the capture layer produced it.
///
/// Planes are kept in device order (luma first for the YUV family). The
/// frame is immutable and owned by the pipeline for one processing step,
/// then dropped; `index` is monotonic and used for ordering and logging only.
#[derive(Clone, Debug)]
pub struct RawFrame {
    planes: Vec<Plane>,
    width: u32,
    height: u32,
    format_code: i32,
    index: usize,
}

impl RawFrame {
    pub fn new(planes: Vec<Plane>, width: u32, height: u32, format_code: i32, index: usize) -> Self {
        Self {
            planes,
            width,
            height,
            format_code,
            index,
        }
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Device-native pixel format code, unmapped.
    pub fn format_code(&self) -> i32 {
        self.format_code
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_construction_and_accessors() {
        let plane = Plane::new(vec![1, 2, 3, 4, 5, 6], 3, 2, 2);
        assert_eq!(plane.bytes(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(plane.bytes_per_row(), 3);
        assert_eq!(plane.width(), 2);
        assert_eq!(plane.height(), 2);
    }

    #[test]
    #[should_panic(expected = "row stride must cover the plane width")]
    fn test_plane_stride_below_width_panics_in_debug() {
        Plane::new(vec![0u8; 4], 2, 4, 1);
    }

    #[test]
    fn test_frame_construction_and_accessors() {
        let planes = vec![
            Plane::new(vec![0u8; 16], 4, 4, 4),
            Plane::new(vec![128u8; 8], 4, 4, 2),
        ];
        let frame = RawFrame::new(planes, 4, 4, 17, 7);
        assert_eq!(frame.planes().len(), 2);
        assert_eq!(frame.width(), 4);
        assert_eq!(frame.height(), 4);
        assert_eq!(frame.format_code(), 17);
        assert_eq!(frame.index(), 7);
    }

    #[test]
    fn test_frame_preserves_plane_order() {
        let planes = vec![
            Plane::new(vec![1u8; 4], 2, 2, 2),
            Plane::new(vec![2u8; 2], 2, 2, 1),
        ];
        let frame = RawFrame::new(planes, 2, 2, 35, 0);
        assert_eq!(frame.planes()[0].bytes()[0], 1);
        assert_eq!(frame.planes()[1].bytes()[0], 2);
    }

    #[test]
    fn test_clone_is_independent() {
        let frame = RawFrame::new(vec![Plane::new(vec![9u8; 4], 2, 2, 2)], 2, 2, 17, 3);
        let cloned = frame.clone();
        drop(frame);
        assert_eq!(cloned.planes()[0].bytes(), &[9, 9, 9, 9]);
    }
}
