/// Bounding box of one detected face, in frame pixel coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceRegion {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl FaceRegion {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}
