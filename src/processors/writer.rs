// thumbsweep/src/processors/writer.rs
use crate::core::{ThumbError, Result};
use crate::utils::format_file_size;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{DynamicImage, Frame, ImageFormat};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Encodes thumbnails in the format implied by the target's extension.
pub struct Writer;

impl Writer {
    pub fn new() -> Self {
        Self
    }

    pub fn save(&self, image: &DynamicImage, path: &Path) -> Result<()> {
        let format = self.detect_format(path)?;

        log::debug!("Saving image to {} with format {:?}", path.display(), format);

        match format {
            // JPEG takes 8-bit gray or RGB only
            ImageFormat::Jpeg if !matches!(image, DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_)) => {
                let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
                self.save_generic(&rgb, path, format)
            }
            _ => self.save_generic(image, path, format),
        }
    }

    /// Writes `frames` as an infinitely looping GIF. Nothing is written when
    /// `frames` is empty.
    pub fn save_animation(&self, frames: Vec<Frame>, path: &Path) -> Result<()> {
        if frames.is_empty() {
            return Err(ThumbError::ProcessingError(format!(
                "No frames left to encode for {}",
                path.display()
            )));
        }

        let frame_count = frames.len();
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        {
            let mut encoder = GifEncoder::new(&mut writer);
            encoder.set_repeat(Repeat::Infinite)?;
            encoder.encode_frames(frames)?;
        }
        writer.flush()?;

        log::debug!("Encoded {} frames to {}", frame_count, path.display());
        self.log_save_result(path)
    }

    fn save_generic(&self, image: &DynamicImage, path: &Path, format: ImageFormat) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        image.write_to(&mut writer, format)?;
        writer.flush()?;

        self.log_save_result(path)
    }

    fn detect_format(&self, path: &Path) -> Result<ImageFormat> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("jpg") | Some("jpeg") => Ok(ImageFormat::Jpeg),
            Some("png") => Ok(ImageFormat::Png),
            Some("gif") => Ok(ImageFormat::Gif),
            _ => Err(ThumbError::UnsupportedFormat(format!(
                "Cannot pick an encoder for {}",
                path.display()
            ))),
        }
    }

    fn log_save_result(&self, path: &Path) -> Result<()> {
        let file_size = std::fs::metadata(path)?.len();
        log::debug!("Saved image: {} ({})", path.display(), format_file_size(file_size));
        Ok(())
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}
