use ndarray::{ArrayView2, ShapeBuilder};

/// Device format code for single-plane-interleaved NV21.
pub const NV21_FORMAT_CODE: i32 = 17;
/// Device format code for three-plane YUV 4:2:0.
pub const YUV420_FORMAT_CODE: i32 = 35;

/// Closed set of frame rotations the detector understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Maps a device orientation in degrees onto the closed set.
    ///
    /// Total over all inputs: an absent or unrecognized orientation falls
    /// back to `Deg0`, so a sensor reporting a nonstandard angle still
    /// yields a usable descriptor instead of an error.
    pub fn from_degrees(degrees: Option<i32>) -> Self {
        match degrees {
            Some(90) => Rotation::Deg90,
            Some(180) => Rotation::Deg180,
            Some(270) => Rotation::Deg270,
            _ => Rotation::Deg0,
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }
}

/// Closed set of pixel formats the detector understands.
///
/// `Unsupported` is a mapped value, not an error: the mapper is total, and
/// the descriptor builder is where an unsupported format becomes a skipped
/// frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Nv21,
    Yuv420,
    Unsupported,
}

impl PixelFormat {
    pub fn from_code(code: i32) -> Self {
        match code {
            NV21_FORMAT_CODE => PixelFormat::Nv21,
            YUV420_FORMAT_CODE => PixelFormat::Yuv420,
            _ => PixelFormat::Unsupported,
        }
    }
}

/// Per-plane layout retained after plane bytes were concatenated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaneMetadata {
    pub bytes_per_row: usize,
    pub width: u32,
    pub height: u32,
}

/// Normalized, detector-ready representation of one frame.
///
/// Plane bytes are concatenated in device order into a single buffer;
/// `planes` records the original stride and dimensions of each plane in the
/// same order. Built once per admitted frame and consumed by exactly one
/// detector call.
#[derive(Clone, Debug)]
pub struct ImageDescriptor {
    bytes: Vec<u8>,
    width: f32,
    height: f32,
    rotation: Rotation,
    format: PixelFormat,
    planes: Vec<PlaneMetadata>,
}

impl ImageDescriptor {
    pub fn new(
        bytes: Vec<u8>,
        width: f32,
        height: f32,
        rotation: Rotation,
        format: PixelFormat,
        planes: Vec<PlaneMetadata>,
    ) -> Self {
        Self {
            bytes,
            width,
            height,
            rotation,
            format,
            planes,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn planes(&self) -> &[PlaneMetadata] {
        &self.planes
    }

    /// Strided 2-D view over the luma plane (the first plane for the YUV
    /// family).
    ///
    /// Returns `None` when there are no planes or the recorded geometry does
    /// not fit inside the concatenated buffer.
    pub fn luma_view(&self) -> Option<ArrayView2<'_, u8>> {
        let meta = self.planes.first()?;
        let rows = meta.height as usize;
        let cols = meta.width as usize;
        if rows == 0 || cols == 0 {
            return None;
        }
        ArrayView2::from_shape((rows, cols).strides((meta.bytes_per_row, 1)), &self.bytes).ok()
    }
}
