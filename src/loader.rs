use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::FaceSuitError;

/// Filename suffix reserved for derived masks. Masks are generated, never
/// loaded, so an asset named this way is a packaging mistake.
pub const MASK_SUFFIX: &str = "_alpha";

/// Recursively load every `.png` under `dir` as an RGBA overlay image.
///
/// Files are returned in sorted path order so the catalog's overlay order
/// is reproducible across platforms and filesystems. Fails with
/// [`FaceSuitError::InvalidAsset`] if any file stem ends with the reserved
/// `_alpha` suffix, or if a decoded image has a zero dimension.
pub fn load_overlay_images(dir: &Path) -> Result<Vec<RgbaImage>, FaceSuitError> {
    let mut paths = Vec::new();
    collect_pngs(dir, &mut paths)?;
    paths.sort();

    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        if stem.ends_with(MASK_SUFFIX) {
            return Err(FaceSuitError::InvalidAsset(format!(
                "filename {:?} must not end with {:?}: masks are derived, never loaded",
                path, MASK_SUFFIX
            )));
        }

        let image = image::open(&path)
            .map_err(|e| FaceSuitError::Decode(format!("{:?}: {}", path, e)))?
            .to_rgba8();
        if image.width() == 0 || image.height() == 0 {
            return Err(FaceSuitError::InvalidAsset(format!(
                "{:?} has a zero dimension",
                path
            )));
        }

        log::debug!(
            "loaded overlay {:?} ({}x{})",
            path,
            image.width(),
            image.height()
        );
        images.push(image);
    }

    Ok(images)
}

fn collect_pngs(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), FaceSuitError> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_pngs(&path, out)?;
        } else if path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"))
        {
            out.push(path);
        }
    }
    Ok(())
}
