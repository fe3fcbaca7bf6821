// thumbsweep/src/processors/animated.rs
use super::loader::Loader;
use super::resizer::{scaled_dimensions, Resizer};
use super::writer::Writer;
use crate::core::{ResizeAlgorithm, Result};
use image::{AnimationDecoder, Delay, DynamicImage, Frame, ImageResult};
use std::fmt;
use std::path::Path;

/// Frames that made it through resizing, plus how many were dropped.
pub struct ResizedFrames {
    pub frames: Vec<Frame>,
    pub dropped: usize,
}

impl fmt::Debug for ResizedFrames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizedFrames")
            .field("frames", &self.frames.len())
            .field("dropped", &self.dropped)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationStats {
    pub written_frames: usize,
    pub dropped_frames: usize,
}

/// Rescales animated GIFs frame by frame.
///
/// Every frame is flattened to RGB before resizing, so transparent areas
/// come out opaque. Source frame timings are discarded and replaced by a
/// single fixed delay.
pub struct AnimatedResizer {
    loader: Loader,
    resizer: Resizer,
    writer: Writer,
    scale: f64,
    delay: Delay,
}

impl AnimatedResizer {
    pub fn new(scale: f64, algorithm: ResizeAlgorithm, frame_delay_ms: u32) -> Self {
        Self {
            loader: Loader::new(),
            resizer: Resizer::new(algorithm),
            writer: Writer::new(),
            scale,
            delay: Delay::from_numer_denom_ms(frame_delay_ms, 1),
        }
    }

    /// Decodes `source`, resizes each frame and writes the result to `target`.
    ///
    /// A failure to open the source aborts before anything is written. Bad
    /// frames are dropped and the surviving frames are still written.
    pub fn resize_gif(&self, source: &Path, target: &Path) -> Result<AnimationStats> {
        let decoder = self.loader.open_gif(source)?;
        let resized = self.resize_frames(decoder.into_frames());

        let stats = AnimationStats {
            written_frames: resized.frames.len(),
            dropped_frames: resized.dropped,
        };

        self.writer.save_animation(resized.frames, target)?;

        log::info!("Resized and saved GIF: {}", target.display());
        Ok(stats)
    }

    /// Single pass over a frame sequence. Frames that fail to convert or
    /// resize are logged and skipped; a decode error ends the sequence, since
    /// the decoder cannot resynchronize after it.
    pub fn resize_frames<I>(&self, frames: I) -> ResizedFrames
    where
        I: IntoIterator<Item = ImageResult<Frame>>,
    {
        let mut resized = ResizedFrames {
            frames: Vec::new(),
            dropped: 0,
        };

        for (index, frame) in frames.into_iter().enumerate() {
            let frame = match frame {
                Ok(frame) => frame,
                Err(e) => {
                    log::error!("Error decoding frame {}, stopping: {}", index, e);
                    resized.dropped += 1;
                    break;
                }
            };

            match self.resize_frame(frame) {
                Ok(frame) => resized.frames.push(frame),
                Err(e) => {
                    log::error!("Error processing frame {}: {}", index, e);
                    resized.dropped += 1;
                }
            }
        }

        resized
    }

    fn resize_frame(&self, frame: Frame) -> Result<Frame> {
        let rgb = DynamicImage::ImageRgba8(frame.into_buffer()).to_rgb8();
        let (width, height) = scaled_dimensions(rgb.width(), rgb.height(), self.scale)?;

        let scaled = DynamicImage::ImageRgb8(rgb).resize_exact(width, height, self.resizer.filter_type());

        Ok(Frame::from_parts(scaled.to_rgba8(), 0, 0, self.delay))
    }
}
