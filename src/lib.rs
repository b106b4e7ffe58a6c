//! Real-time face overlay compositing: scale and alpha-paste "suit" images
//! onto detected faces, cycling through a catalog of overlays on user input.
//!
//! The crate is the per-frame core of a webcam toy: a capture/display loop
//! (not provided here) feeds RGBA frames and detector output in, and this
//! crate computes placements and pastes the selected overlay in place.
//!
//! # Example
//!
//! ```no_run
//! use facesuit::{composite, ChannelOrder, FaceBox, OverlayCatalog, OverlayMode};
//!
//! let images = facesuit::load_overlay_images(std::path::Path::new("img")).unwrap();
//! let mut catalog = OverlayCatalog::build(
//!     images,
//!     &[2.8, 3.5, 4.5],
//!     &[-0.3, -0.1, -0.1],
//!     facesuit::DEFAULT_ALPHA_THRESHOLD,
//! )
//! .unwrap();
//!
//! let mut frame = image::RgbaImage::new(1100, 960);
//! // Boxes come from a face detector each frame.
//! let faces = vec![FaceBox { x: 400, y: 300, w: 120, h: 120 }];
//! composite(
//!     &mut frame,
//!     &faces,
//!     catalog.current(),
//!     OverlayMode::Multi,
//!     ChannelOrder::Rgba,
//! );
//!
//! // On a cycle-overlay input event:
//! catalog.advance();
//! ```
#![warn(missing_docs)]

/// Overlay catalog and selection state.
pub mod catalog;
/// Frame compositing: draw order, channel alignment, masked paste.
pub mod compositor;
mod error;
/// Face detection traits and data types.
pub mod face_detector;
mod loader;
/// Binary alpha-mask derivation.
pub mod mask;
/// Face-to-overlay placement geometry.
pub mod placement;
#[cfg(feature = "face-detection")]
/// Built-in SeetaFace-based face detector backend.
pub mod rustface_backend;

pub use catalog::{OverlayCatalog, OverlayEntry};
pub use compositor::{composite, swap_red_blue, ChannelOrder, OverlayMode};
/// Error type returned by facesuit operations.
pub use error::FaceSuitError;
pub use face_detector::{grayscale_frame, DetectorParams, FaceBox, FaceDetector};
/// Overlay asset loading (directory scan, reserved-name check).
pub use loader::{load_overlay_images, MASK_SUFFIX};
pub use mask::{AlphaMask, DEFAULT_ALPHA_THRESHOLD};
pub use placement::{place, Placement};
#[cfg(feature = "face-detection")]
pub use rustface_backend::RustfaceDetector;

use image::RgbaImage;

/// One iteration of the overlay pipeline: paste the catalog's current
/// overlay onto `frame` for the given faces.
///
/// Equivalent to calling [`composite`] with [`OverlayCatalog::current`];
/// the catalog itself is untouched (selection only changes via
/// [`OverlayCatalog::advance`], driven by the caller's input events).
pub fn render_frame(
    frame: &mut RgbaImage,
    faces: &[FaceBox],
    catalog: &OverlayCatalog,
    mode: OverlayMode,
    frame_order: ChannelOrder,
) {
    composite(frame, faces, catalog.current(), mode, frame_order);
}
