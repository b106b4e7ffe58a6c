use crate::catalog::OverlayEntry;
use crate::error::FaceSuitError;
use crate::face_detector::FaceBox;

/// Computed geometry for pasting one overlay onto one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Overlay width after scaling to the face.
    pub scaled_width: u32,
    /// Overlay height after scaling, derived to preserve aspect ratio.
    pub scaled_height: u32,
    /// X coordinate of the paste top-left corner. May be negative; the
    /// compositor clips.
    pub paste_x: i32,
    /// Y coordinate of the paste top-left corner. May be negative.
    pub paste_y: i32,
}

/// Compute scaled overlay dimensions and the paste coordinate for one face.
///
/// The overlay width is driven directly by the face width via the entry's
/// `size_factor`; height follows from the overlay's own aspect ratio.
/// Horizontally the overlay is centered on the face midpoint; vertically it
/// anchors at the bottom of the face box, shifted by `vertical_offset` as a
/// signed fraction of the face height.
///
/// Fails with [`FaceSuitError::DegeneratePlacement`] when the scaled size
/// collapses to zero (zero-width face, or a pathological aspect ratio).
/// Callers skip the face rather than aborting the frame.
pub fn place(face: &FaceBox, overlay: &OverlayEntry) -> Result<Placement, FaceSuitError> {
    let scaled_width = (face.w as f64 * overlay.size_factor as f64).floor() as i64;
    if scaled_width <= 0 {
        return Err(FaceSuitError::DegeneratePlacement {
            width: scaled_width,
        });
    }

    let (img_w, img_h) = (overlay.image.width(), overlay.image.height());
    let scaled_height = (scaled_width as f64 * img_h as f64 / img_w as f64).floor() as i64;
    if scaled_height <= 0 {
        return Err(FaceSuitError::DegeneratePlacement {
            width: scaled_width,
        });
    }

    let paste_x = (face.x as f64 + 0.5 * face.w as f64 - 0.5 * scaled_width as f64).floor() as i32;
    let paste_y =
        (face.y as f64 + face.h as f64 * (1.0 - overlay.vertical_offset as f64)).floor() as i32;

    Ok(Placement {
        scaled_width: scaled_width as u32,
        scaled_height: scaled_height as u32,
        paste_x,
        paste_y,
    })
}
