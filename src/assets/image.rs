use std::path::Path;

use crate::foundation::error::{ReelError, ReelResult};

/// Decode a still image from disk.
pub fn load_image(path: &Path) -> ReelResult<image::DynamicImage> {
    if !path.is_file() {
        return Err(ReelError::not_found(path));
    }
    image::open(path)
        .map_err(|e| ReelError::media(format!("image decode failed for '{}': {e}", path.display())))
}

/// Save an RGBA image as PNG, creating parent directories.
pub fn save_png(img: &image::RgbaImage, path: &Path) -> ReelResult<()> {
    use anyhow::Context as _;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory '{}'", parent.display()))?;
    }
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
