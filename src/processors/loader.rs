// thumbsweep/src/processors/loader.rs
use crate::core::{ThumbError, Result};
use image::codecs::gif::GifDecoder;
use image::{DynamicImage, GenericImageView, ImageReader};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Clone)]
pub struct Loader;

impl Loader {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, path: &Path) -> Result<DynamicImage> {
        log::debug!("Loading image from: {}", path.display());

        self.validate_path(path)?;

        let image = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| {
                ThumbError::ProcessingError(format!("Failed to decode image: {}", e))
            })?;

        let (width, height) = image.dimensions();
        log::debug!(
            "Loaded image: {}x{} pixels, color: {:?}",
            width, height, image.color()
        );

        Ok(image)
    }

    /// Opens a GIF for frame-by-frame decoding. The file handle lives as long
    /// as the returned decoder.
    pub fn open_gif(&self, path: &Path) -> Result<GifDecoder<BufReader<File>>> {
        log::debug!("Opening animation from: {}", path.display());

        self.validate_path(path)?;

        let file = File::open(path)?;
        let decoder = GifDecoder::new(BufReader::new(file)).map_err(|e| {
            ThumbError::ProcessingError(format!("Failed to decode GIF: {}", e))
        })?;

        Ok(decoder)
    }

    fn validate_path(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ThumbError::InvalidParameter(
                format!("File does not exist: {}", path.display())
            ));
        }

        let metadata = path.metadata()?;
        if metadata.len() == 0 {
            return Err(ThumbError::InvalidParameter(
                format!("File is empty: {}", path.display())
            ));
        }

        Ok(())
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.png");
        image::RgbImage::new(12, 8).save(&path).unwrap();

        let image = Loader::new().load(&path).unwrap();
        assert_eq!(image.dimensions(), (12, 8));
    }

    #[test]
    fn test_load_rejects_empty_and_garbage_files() {
        let dir = tempdir().unwrap();
        let empty = dir.path().join("empty.png");
        let garbage = dir.path().join("garbage.jpg");
        fs::write(&empty, b"").unwrap();
        fs::write(&garbage, b"definitely not a jpeg").unwrap();

        let loader = Loader::new();
        assert!(loader.load(&empty).is_err());
        assert!(loader.load(&garbage).is_err());
        assert!(loader.open_gif(&garbage).is_err());
    }
}
