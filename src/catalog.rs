use image::RgbaImage;

use crate::error::FaceSuitError;
use crate::mask::AlphaMask;

/// One loaded overlay: the source image, its precomputed binary mask, and
/// the sizing parameters that drive placement.
#[derive(Debug, Clone)]
pub struct OverlayEntry {
    /// The overlay image in RGBA, as decoded by the loader.
    pub image: RgbaImage,

    /// Binary opacity mask derived from `image` at catalog build time.
    /// Always the same dimensions as `image`.
    pub mask: AlphaMask,

    /// Scales the overlay's width relative to the detected face width.
    pub size_factor: f32,

    /// Shifts vertical placement by a signed fraction of face height,
    /// relative to the bottom of the face box. Positive values raise the
    /// overlay toward the face; negative values push it further below the
    /// chin.
    pub vertical_offset: f32,
}

/// Ordered, non-empty set of overlays with a current selection.
///
/// The current index is the only mutable state in the pipeline; `advance`
/// is the only way to change it, and `current` the only way to read the
/// selection. Built once at startup and held for the process lifetime.
#[derive(Debug, Clone)]
pub struct OverlayCatalog {
    entries: Vec<OverlayEntry>,
    current: usize,
}

impl OverlayCatalog {
    /// Build a catalog from parallel sequences of images and per-overlay
    /// parameters, deriving a mask for each image at `threshold`.
    ///
    /// Fails with [`FaceSuitError::Configuration`] if the sequences are
    /// empty or their lengths differ — mismatched counts are a startup
    /// error, never discovered per-frame.
    pub fn build(
        images: Vec<RgbaImage>,
        size_factors: &[f32],
        vertical_offsets: &[f32],
        threshold: u8,
    ) -> Result<OverlayCatalog, FaceSuitError> {
        if images.is_empty() {
            return Err(FaceSuitError::Configuration(
                "overlay catalog cannot be empty".into(),
            ));
        }
        if images.len() != size_factors.len() || images.len() != vertical_offsets.len() {
            return Err(FaceSuitError::Configuration(format!(
                "mismatched overlay parameter counts: {} images, {} size factors, {} offsets",
                images.len(),
                size_factors.len(),
                vertical_offsets.len()
            )));
        }

        let entries = images
            .into_iter()
            .zip(size_factors.iter().zip(vertical_offsets.iter()))
            .map(|(image, (&size_factor, &vertical_offset))| {
                let mask = AlphaMask::generate(&image, threshold);
                OverlayEntry {
                    image,
                    mask,
                    size_factor,
                    vertical_offset,
                }
            })
            .collect();

        Ok(OverlayCatalog {
            entries,
            current: 0,
        })
    }

    /// The currently selected overlay. Total: the index is always valid.
    pub fn current(&self) -> &OverlayEntry {
        &self.entries[self.current]
    }

    /// Index of the current selection.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Move the selection to the next overlay, wrapping from last to first.
    /// Does not reload or regenerate anything.
    pub fn advance(&mut self) {
        self.current = (self.current + 1) % self.entries.len();
    }

    /// Number of overlays in the catalog. Always at least 1.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: construction rejects empty catalogs. Kept for the
    /// conventional pair with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
