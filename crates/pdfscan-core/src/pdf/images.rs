//! Writing embedded page images to disk.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::PdfProcessor;
use crate::error::Result;

/// Save every embedded image as `page_<p>_image_<j>.png` under `dir`.
///
/// Page and image indices are 0-based. Pages whose images cannot be read
/// are skipped with a warning. Returns the number of files written.
pub fn dump_images<P: PdfProcessor + ?Sized>(processor: &P, dir: &Path) -> Result<usize> {
    fs::create_dir_all(dir)?;

    let mut written = 0;
    for page in 1..=processor.page_count() {
        let images = match processor.extract_images(page) {
            Ok(images) => images,
            Err(e) => {
                warn!("Failed to extract images from page {}: {}", page, e);
                continue;
            }
        };

        for (j, img) in images.iter().enumerate() {
            let path = dir.join(format!("page_{}_image_{}.png", page - 1, j));
            img.save_with_format(&path, image::ImageFormat::Png)?;
            debug!("Wrote {}", path.display());
            written += 1;
        }
    }

    Ok(written)
}
