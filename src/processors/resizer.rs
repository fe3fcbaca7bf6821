// thumbsweep/src/processors/resizer.rs
use crate::core::{ThumbError, ResizeAlgorithm, Result};
use image::{imageops::FilterType, DynamicImage, GenericImageView};

pub struct Resizer {
    algorithm: ResizeAlgorithm,
}

impl Resizer {
    pub fn new(algorithm: ResizeAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Resizes by `scale` on both axes, flooring each dimension.
    pub fn resize_scaled(&self, image: &DynamicImage, scale: f64) -> Result<DynamicImage> {
        let (orig_width, orig_height) = image.dimensions();
        let (width, height) = scaled_dimensions(orig_width, orig_height, scale)?;

        if width == orig_width && height == orig_height {
            log::debug!("Image dimensions unchanged, skipping resize");
            return Ok(image.clone());
        }

        log::debug!(
            "Resizing image from {}x{} to {}x{} ({:?})",
            orig_width,
            orig_height,
            width,
            height,
            self.algorithm
        );

        Ok(image.resize_exact(width, height, self.filter_type()))
    }

    pub fn filter_type(&self) -> FilterType {
        match self.algorithm {
            ResizeAlgorithm::Nearest => FilterType::Nearest,
            ResizeAlgorithm::Bilinear => FilterType::Triangle,
            ResizeAlgorithm::Bicubic => FilterType::CatmullRom,
            ResizeAlgorithm::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// `floor(width * scale) x floor(height * scale)`; a zero-sized result is an error.
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> Result<(u32, u32)> {
    let new_width = (f64::from(width) * scale).floor();
    let new_height = (f64::from(height) * scale).floor();

    if !(new_width >= 1.0 && new_height >= 1.0) {
        return Err(ThumbError::InvalidParameter(format!(
            "Scaling {}x{} by {} gives an empty image",
            width, height, scale
        )));
    }

    if new_width > f64::from(u32::MAX) || new_height > f64::from(u32::MAX) {
        return Err(ThumbError::InvalidParameter(format!(
            "Scaling {}x{} by {} overflows",
            width, height, scale
        )));
    }

    Ok((new_width as u32, new_height as u32))
}
