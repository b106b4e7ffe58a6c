use image::RgbaImage;

/// Bounding box of a detected face in frame pixel coordinates.
///
/// Produced fresh by the detector every frame; a box has no identity
/// across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceBox {
    /// X coordinate of the top-left corner (pixels).
    pub x: i32,
    /// Y coordinate of the top-left corner (pixels).
    pub y: i32,
    /// Width of the bounding box (pixels).
    pub w: u32,
    /// Height of the bounding box (pixels).
    pub h: u32,
}

/// Detection parameters passed through to the backend.
#[derive(Debug, Clone, Copy)]
pub struct DetectorParams {
    /// Multiplicative step between detection pyramid scales.
    pub scale_step: f32,
    /// Minimum neighboring detections required to accept a face.
    pub min_neighbors: u32,
    /// Smallest face size the detector will report, in pixels.
    pub min_face_size: u32,
}

impl Default for DetectorParams {
    fn default() -> Self {
        DetectorParams {
            scale_step: 1.1,
            min_neighbors: 4,
            min_face_size: 20,
        }
    }
}

/// Pluggable face detection backend.
///
/// Implement this trait to provide a custom detector (ONNX, dlib, etc.).
/// The core imposes its own draw order on the returned boxes, so no
/// ordering guarantee is required here.
pub trait FaceDetector: Send + Sync {
    /// Detect faces in a row-major grayscale buffer of `width` × `height` bytes.
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<FaceBox>;
}

/// Derive the detector's grayscale input from an RGBA frame.
///
/// Rec. 601 luma weights, matching what `image::imageops::grayscale`
/// produces for the same buffer.
pub fn grayscale_frame(frame: &RgbaImage) -> Vec<u8> {
    frame
        .pixels()
        .map(|p| {
            let [r, g, b, _] = p.0;
            (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32).round() as u8
        })
        .collect()
}
