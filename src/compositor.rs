use image::imageops::{resize, FilterType};
use image::RgbaImage;

use crate::catalog::OverlayEntry;
use crate::error::FaceSuitError;
use crate::face_detector::FaceBox;
use crate::placement::{place, Placement};

/// Which faces receive the overlay in one composite call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayMode {
    /// Only the widest detected face (more stable with jittery detectors).
    Single,
    /// Every detected face, drawn smallest first so larger faces occlude
    /// likely-spurious small detections.
    #[default]
    Multi,
}

/// Channel order of the destination frame buffer.
///
/// Overlay assets are decoded as RGBA; capture pipelines often hand the
/// compositor BGRA frames. The compositor aligns the overlay to the frame
/// before pasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelOrder {
    /// Red, green, blue, alpha — the order overlay assets decode to.
    #[default]
    Rgba,
    /// Blue, green, red, alpha — common for capture pipelines.
    Bgra,
}

/// A mask pixel at or above this alpha counts as opaque after the
/// antialiased resize softens the binary mask's edges.
const MASK_OPACITY_CUTOFF: u8 = 128;

/// Swap the red and blue channels of every pixel.
///
/// This is the whole of the RGBA↔BGRA conversion; applying it twice is the
/// identity.
pub fn swap_red_blue(image: &RgbaImage) -> RgbaImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        pixel.0.swap(0, 2);
    }
    out
}

/// Paste the selected overlay onto `frame` for the given faces, in place.
///
/// An empty face list leaves the frame untouched. In `Single` mode only the
/// widest face (first occurrence on ties) is composited; in `Multi` mode
/// all faces are composited in ascending width order. A face whose
/// placement degenerates is skipped; the rest of the frame still renders.
/// Paste regions extending past the frame edges are clipped silently.
pub fn composite(
    frame: &mut RgbaImage,
    faces: &[FaceBox],
    overlay: &OverlayEntry,
    mode: OverlayMode,
    frame_order: ChannelOrder,
) {
    if faces.is_empty() {
        return;
    }

    match mode {
        OverlayMode::Single => {
            let mut widest = &faces[0];
            for face in &faces[1..] {
                if face.w > widest.w {
                    widest = face;
                }
            }
            composite_one(frame, widest, overlay, frame_order);
        }
        OverlayMode::Multi => {
            let mut ordered: Vec<&FaceBox> = faces.iter().collect();
            // Stable sort: equal widths keep detector output order.
            ordered.sort_by_key(|face| face.w);
            for face in ordered {
                composite_one(frame, face, overlay, frame_order);
            }
        }
    }
}

fn composite_one(
    frame: &mut RgbaImage,
    face: &FaceBox,
    overlay: &OverlayEntry,
    frame_order: ChannelOrder,
) {
    let Placement {
        scaled_width,
        scaled_height,
        paste_x,
        paste_y,
    } = match place(face, overlay) {
        Ok(p) => p,
        Err(FaceSuitError::DegeneratePlacement { width }) => {
            log::debug!(
                "skipping face at ({}, {}): degenerate scaled width {}",
                face.x,
                face.y,
                width
            );
            return;
        }
        Err(_) => return,
    };

    let mut scaled_img = resize(
        &overlay.image,
        scaled_width,
        scaled_height,
        FilterType::Lanczos3,
    );
    let scaled_mask = resize(
        overlay.mask.as_image(),
        scaled_width,
        scaled_height,
        FilterType::Lanczos3,
    );

    if frame_order == ChannelOrder::Bgra {
        scaled_img = swap_red_blue(&scaled_img);
    }

    paste(frame, &scaled_img, &scaled_mask, paste_x, paste_y);
}

/// Overwrite frame pixels from `src` wherever the mask is opaque, clipping
/// at the frame bounds.
fn paste(frame: &mut RgbaImage, src: &RgbaImage, mask: &RgbaImage, paste_x: i32, paste_y: i32) {
    let (frame_w, frame_h) = (frame.width() as i64, frame.height() as i64);

    for sy in 0..src.height() {
        let dy = paste_y as i64 + sy as i64;
        if dy < 0 || dy >= frame_h {
            continue;
        }
        for sx in 0..src.width() {
            let dx = paste_x as i64 + sx as i64;
            if dx < 0 || dx >= frame_w {
                continue;
            }
            if mask.get_pixel(sx, sy).0[3] < MASK_OPACITY_CUTOFF {
                continue;
            }
            frame.put_pixel(dx as u32, dy as u32, *src.get_pixel(sx, sy));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::AlphaMask;
    use image::Rgba;

    const BACKGROUND: Rgba<u8> = Rgba([1, 2, 3, 255]);

    fn frame(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, BACKGROUND)
    }

    fn opaque_overlay(w: u32, h: u32, color: [u8; 4]) -> OverlayEntry {
        let image = RgbaImage::from_pixel(w, h, Rgba(color));
        let mask = AlphaMask::generate(&image, 30);
        OverlayEntry {
            image,
            mask,
            size_factor: 1.0,
            vertical_offset: 1.0, // paste_y == face.y
        }
    }

    /// Overlay with a horizontal red-to-blue gradient, so different paste
    /// geometries produce distinguishable pixels.
    fn gradient_overlay(w: u32, h: u32) -> OverlayEntry {
        let mut image = RgbaImage::new(w, h);
        for (x, _, pixel) in image.enumerate_pixels_mut() {
            let t = (x * 255 / (w - 1).max(1)) as u8;
            *pixel = Rgba([255 - t, 0, t, 255]);
        }
        let mask = AlphaMask::generate(&image, 30);
        OverlayEntry {
            image,
            mask,
            size_factor: 1.0,
            vertical_offset: 1.0,
        }
    }

    fn changed_pixels(frame: &RgbaImage) -> usize {
        frame.pixels().filter(|p| **p != BACKGROUND).count()
    }

    #[test]
    fn empty_face_list_changes_nothing() {
        let mut f = frame(32, 32);
        let overlay = opaque_overlay(8, 8, [200, 0, 0, 255]);
        composite(&mut f, &[], &overlay, OverlayMode::Multi, ChannelOrder::Rgba);
        assert_eq!(changed_pixels(&f), 0);
    }

    #[test]
    fn single_face_pastes_at_placement() {
        let mut f = frame(32, 32);
        let overlay = opaque_overlay(8, 8, [200, 0, 0, 255]);
        let face = FaceBox { x: 10, y: 4, w: 8, h: 8 };
        composite(
            &mut f,
            &[face],
            &overlay,
            OverlayMode::Multi,
            ChannelOrder::Rgba,
        );
        // scaled 8x8, centered on midpoint 14 → paste_x=10, paste_y=4
        assert_eq!(f.get_pixel(10, 4), &Rgba([200, 0, 0, 255]));
        assert_eq!(f.get_pixel(17, 11), &Rgba([200, 0, 0, 255]));
        assert_eq!(f.get_pixel(9, 4), &BACKGROUND);
        assert_eq!(changed_pixels(&f), 64);
    }

    #[test]
    fn transparent_mask_regions_leave_frame_untouched() {
        // Overlay with a fully transparent left half.
        let mut image = RgbaImage::from_pixel(8, 8, Rgba([200, 0, 0, 255]));
        for y in 0..8 {
            for x in 0..4 {
                image.put_pixel(x, y, Rgba([200, 0, 0, 0]));
            }
        }
        let mask = AlphaMask::generate(&image, 30);
        let overlay = OverlayEntry {
            image,
            mask,
            size_factor: 1.0,
            vertical_offset: 1.0,
        };
        let mut f = frame(32, 32);
        let face = FaceBox { x: 8, y: 8, w: 8, h: 8 };
        composite(
            &mut f,
            &[face],
            &overlay,
            OverlayMode::Multi,
            ChannelOrder::Rgba,
        );
        assert_eq!(f.get_pixel(8, 8), &BACKGROUND); // masked out
        assert_eq!(f.get_pixel(15, 8), &Rgba([200, 0, 0, 255]));
    }

    #[test]
    fn paste_clips_at_frame_edges() {
        let mut f = frame(16, 16);
        let overlay = opaque_overlay(8, 8, [0, 200, 0, 255]);
        // Face near the corner pushes the paste region off the frame.
        let face = FaceBox { x: -4, y: -4, w: 8, h: 8 };
        composite(
            &mut f,
            &[face],
            &overlay,
            OverlayMode::Multi,
            ChannelOrder::Rgba,
        );
        // No panic, and only the in-bounds part painted.
        assert!(changed_pixels(&f) < 64);
        assert!(changed_pixels(&f) > 0);
    }

    #[test]
    fn degenerate_face_is_skipped_but_others_still_paint() {
        let mut f = frame(32, 32);
        let overlay = opaque_overlay(8, 8, [200, 0, 0, 255]);
        let bad = FaceBox { x: 2, y: 2, w: 0, h: 8 };
        let good = FaceBox { x: 10, y: 4, w: 8, h: 8 };
        composite(
            &mut f,
            &[bad, good],
            &overlay,
            OverlayMode::Multi,
            ChannelOrder::Rgba,
        );
        assert_eq!(changed_pixels(&f), 64);
    }

    #[test]
    fn only_degenerate_faces_changes_nothing() {
        let mut f = frame(32, 32);
        let overlay = opaque_overlay(8, 8, [200, 0, 0, 255]);
        let bad = FaceBox { x: 2, y: 2, w: 0, h: 8 };
        composite(
            &mut f,
            &[bad],
            &overlay,
            OverlayMode::Multi,
            ChannelOrder::Rgba,
        );
        assert_eq!(changed_pixels(&f), 0);
    }

    #[test]
    fn multi_mode_draws_ascending_so_largest_wins_overlap() {
        let overlay = gradient_overlay(16, 16);
        let faces = [
            FaceBox { x: 20, y: 20, w: 30, h: 30 },
            FaceBox { x: 10, y: 10, w: 80, h: 80 },
            FaceBox { x: 30, y: 30, w: 50, h: 50 },
        ];

        let mut actual = frame(128, 128);
        composite(
            &mut actual,
            &faces,
            &overlay,
            OverlayMode::Multi,
            ChannelOrder::Rgba,
        );

        // Reference: paste one at a time in ascending width order.
        let mut expected = frame(128, 128);
        for face in [faces[0], faces[2], faces[1]] {
            composite(
                &mut expected,
                &[face],
                &overlay,
                OverlayMode::Multi,
                ChannelOrder::Rgba,
            );
        }
        assert_eq!(actual, expected);
    }

    #[test]
    fn single_mode_composites_only_widest_face() {
        let mut f = frame(64, 64);
        let overlay = opaque_overlay(8, 8, [200, 0, 0, 255]);
        let small = FaceBox { x: 2, y: 40, w: 8, h: 8 };
        let big = FaceBox { x: 20, y: 4, w: 16, h: 16 };
        composite(
            &mut f,
            &[small, big],
            &overlay,
            OverlayMode::Single,
            ChannelOrder::Rgba,
        );
        // Only the big face's 16x16 paste region changed.
        assert_eq!(changed_pixels(&f), 256);
        assert_eq!(f.get_pixel(2, 40), &BACKGROUND);
    }

    #[test]
    fn single_mode_tie_breaks_on_first_occurrence() {
        let overlay = opaque_overlay(8, 8, [200, 0, 0, 255]);
        let first = FaceBox { x: 0, y: 0, w: 50, h: 50 };
        let second = FaceBox { x: 100, y: 100, w: 50, h: 50 };
        let third = FaceBox { x: 200, y: 0, w: 30, h: 30 };

        let mut f = frame(256, 256);
        composite(
            &mut f,
            &[first, second, third],
            &overlay,
            OverlayMode::Single,
            ChannelOrder::Rgba,
        );
        // First face's region painted, second's untouched.
        assert!(f.get_pixel(25, 10) != &BACKGROUND);
        assert_eq!(f.get_pixel(125, 110), &BACKGROUND);
    }

    #[test]
    fn bgra_frames_get_red_and_blue_swapped() {
        let mut f = frame(32, 32);
        let overlay = opaque_overlay(8, 8, [200, 10, 40, 255]);
        let face = FaceBox { x: 10, y: 4, w: 8, h: 8 };
        composite(
            &mut f,
            &[face],
            &overlay,
            OverlayMode::Multi,
            ChannelOrder::Bgra,
        );
        assert_eq!(f.get_pixel(10, 4), &Rgba([40, 10, 200, 255]));
    }

    #[test]
    fn swap_red_blue_twice_is_identity() {
        let mut image = RgbaImage::new(4, 4);
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            *pixel = Rgba([x as u8 * 17, y as u8 * 31, 200, 255]);
        }
        assert_eq!(swap_red_blue(&swap_red_blue(&image)), image);
    }

    #[test]
    fn swap_red_blue_leaves_green_and_alpha() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 40]));
        let swapped = swap_red_blue(&image);
        assert_eq!(swapped.get_pixel(0, 0), &Rgba([30, 20, 10, 40]));
    }
}
