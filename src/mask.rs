use image::{Rgba, RgbaImage};

/// Default transparency threshold: source pixels with alpha below this are
/// treated as fully transparent in the derived mask.
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 30;

/// Binary opacity stencil derived from a source image's alpha channel.
///
/// Every pixel is either fully opaque `(255,255,255,255)` or fully
/// transparent `(0,0,0,0)` — never an intermediate value. The mask always
/// has the same dimensions as the image it was generated from.
#[derive(Debug, Clone)]
pub struct AlphaMask(RgbaImage);

impl AlphaMask {
    /// Derive a binary mask from `source`.
    ///
    /// A pixel whose source alpha is `>= threshold` becomes opaque;
    /// anything below becomes transparent. The comparison is inclusive on
    /// the opaque side: alpha exactly equal to `threshold` maps to opaque.
    pub fn generate(source: &RgbaImage, threshold: u8) -> AlphaMask {
        let mut mask = RgbaImage::new(source.width(), source.height());
        for (x, y, pixel) in source.enumerate_pixels() {
            let a = pixel.0[3];
            let out = if a < threshold {
                Rgba([0, 0, 0, 0])
            } else {
                Rgba([255, 255, 255, 255])
            };
            mask.put_pixel(x, y, out);
        }
        AlphaMask(mask)
    }

    /// Mask width in pixels (equal to the source image's width).
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    /// Mask height in pixels (equal to the source image's height).
    pub fn height(&self) -> u32 {
        self.0.height()
    }

    /// The underlying pixel buffer. Edge pixels stay binary here; softening
    /// only happens later when the mask is resized for a placement.
    pub fn as_image(&self) -> &RgbaImage {
        &self.0
    }
}
