// thumbsweep/src/core/processor.rs
use super::{Result, ThumbError, ThumbnailConfig};
use crate::processors::{AnimatedResizer, Loader, Resizer, Writer};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailOutcome {
    Static { width: u32, height: u32 },
    Animated { frames: usize, dropped_frames: usize },
}

/// Produces one thumbnail from one source file.
pub struct ThumbnailProcessor {
    config: ThumbnailConfig,
    loader: Loader,
    resizer: Resizer,
    writer: Writer,
    animated: AnimatedResizer,
}

impl ThumbnailProcessor {
    pub fn new(config: ThumbnailConfig) -> Self {
        let resizer = Resizer::new(config.static_algorithm);
        let animated = AnimatedResizer::new(
            config.scale,
            config.animated_algorithm,
            config.frame_delay_ms,
        );

        Self {
            config,
            loader: Loader::new(),
            resizer,
            writer: Writer::new(),
            animated,
        }
    }

    pub fn config(&self) -> &ThumbnailConfig {
        &self.config
    }

    /// Dispatches on the source extension: GIFs go frame by frame, the
    /// rest are resized as a single image.
    pub fn process<P: AsRef<Path>>(&self, source: P, target: P) -> Result<ThumbnailOutcome> {
        let source = source.as_ref();
        let target = target.as_ref();

        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match self.config.format_of(&name) {
            Some(tag) if tag.is_animated() => self.process_animated(source, target),
            Some(_) => self.process_static(source, target),
            None => Err(ThumbError::UnsupportedFormat(format!(
                "Not a recognized image: {}",
                source.display()
            ))),
        }
    }

    pub fn process_static(&self, source: &Path, target: &Path) -> Result<ThumbnailOutcome> {
        let image = self.loader.load(source)?;
        let resized = self.resizer.resize_scaled(&image, self.config.scale)?;

        self.writer.save(&resized, target)?;
        log::info!("Resized and saved: {}", target.display());

        Ok(ThumbnailOutcome::Static {
            width: resized.width(),
            height: resized.height(),
        })
    }

    pub fn process_animated(&self, source: &Path, target: &Path) -> Result<ThumbnailOutcome> {
        let stats = self.animated.resize_gif(source, target)?;

        Ok(ThumbnailOutcome::Animated {
            frames: stats.written_frames,
            dropped_frames: stats.dropped_frames,
        })
    }
}
