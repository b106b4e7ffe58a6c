use std::path::Path;

use crate::error::FaceSuitError;
use crate::face_detector::{DetectorParams, FaceBox, FaceDetector};

/// Face detector backed by the `rustface` crate (SeetaFace engine).
///
/// The model file is loaded once on construction; detection itself builds a
/// fresh engine per call so the detector can stay `&self` and `Sync`.
pub struct RustfaceDetector {
    model: rustface::Model,
    params: DetectorParams,
}

impl RustfaceDetector {
    /// Load a SeetaFace model (e.g. `seeta_fd_frontal_v1.0.bin`) from disk.
    pub fn from_model_file(path: &Path, params: DetectorParams) -> Result<Self, FaceSuitError> {
        let data = std::fs::read(path)?;
        let model = rustface::read_model(std::io::Cursor::new(data))
            .map_err(|e| FaceSuitError::InvalidAsset(format!("{:?}: {}", path, e)))?;
        Ok(Self { model, params })
    }
}

impl FaceDetector for RustfaceDetector {
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<FaceBox> {
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(self.params.min_face_size);
        // SeetaFace has no neighbor count; its score threshold plays the
        // same spurious-detection-suppression role (4 neighbors ≈ 2.0).
        detector.set_score_thresh(self.params.min_neighbors as f64 / 2.0);
        // SeetaFace expresses the pyramid as a downscale factor < 1.
        detector.set_pyramid_scale_factor(1.0 / self.params.scale_step);
        detector.set_slide_window_step(4, 4);

        let faces = detector.detect(&rustface::ImageData::new(gray, width, height));

        faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceBox {
                    x: bbox.x(),
                    y: bbox.y(),
                    w: bbox.width(),
                    h: bbox.height(),
                }
            })
            .collect()
    }
}
