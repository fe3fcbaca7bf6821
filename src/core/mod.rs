// thumbsweep/src/core/mod.rs
pub mod processor;

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAlgorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

/// Image formats recognized by extension. Declaration order is the order
/// used in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormatTag {
    Png,
    Jpg,
    Jpeg,
    Gif,
}

impl FormatTag {
    pub const ALL: [FormatTag; 4] = [FormatTag::Png, FormatTag::Jpg, FormatTag::Jpeg, FormatTag::Gif];

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(FormatTag::Png),
            "jpg" => Some(FormatTag::Jpg),
            "jpeg" => Some(FormatTag::Jpeg),
            "gif" => Some(FormatTag::Gif),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatTag::Png => "png",
            FormatTag::Jpg => "jpg",
            FormatTag::Jpeg => "jpeg",
            FormatTag::Gif => "gif",
        }
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, FormatTag::Gif)
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do when a cleaned filename already exists in the folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Replace the existing file.
    Overwrite,
    /// Leave the entry under its original name and report the conflict.
    #[default]
    Skip,
    /// Append `-1`, `-2`, ... before the extension until the name is free.
    AutoSuffix,
}

#[derive(Debug, Clone)]
pub struct ThumbnailConfig {
    pub scale: f64,
    pub frame_delay_ms: u32,
    pub formats: Vec<FormatTag>,
    pub thumb_marker: String,
    pub manifest_name: String,
    pub conflict_policy: ConflictPolicy,
    pub static_algorithm: ResizeAlgorithm,
    pub animated_algorithm: ResizeAlgorithm,
    pub show_progress: bool,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            scale: 0.25,
            frame_delay_ms: 100,
            formats: FormatTag::ALL.to_vec(),
            thumb_marker: "_thumb".to_string(),
            manifest_name: "image_list.txt".to_string(),
            conflict_policy: ConflictPolicy::default(),
            static_algorithm: ResizeAlgorithm::Bicubic,
            animated_algorithm: ResizeAlgorithm::Lanczos3,
            show_progress: false,
        }
    }
}

impl ThumbnailConfig {
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ThumbError::InvalidParameter(format!(
                "Scale factor must be a positive number, got {}",
                self.scale
            )));
        }

        if self.frame_delay_ms == 0 {
            return Err(ThumbError::InvalidParameter(
                "Frame delay must be at least 1 ms".to_string(),
            ));
        }

        if self.formats.is_empty() {
            return Err(ThumbError::InvalidParameter(
                "At least one image format must be recognized".to_string(),
            ));
        }

        if self.thumb_marker.is_empty() {
            return Err(ThumbError::InvalidParameter(
                "Thumbnail marker cannot be empty".to_string(),
            ));
        }

        if self.manifest_name.is_empty() || self.manifest_name.contains(['/', '\\']) {
            return Err(ThumbError::InvalidParameter(format!(
                "Invalid manifest name: {:?}",
                self.manifest_name
            )));
        }

        Ok(())
    }

    /// Recognized format for a file name, matched on its last extension.
    pub fn format_of(&self, file_name: &str) -> Option<FormatTag> {
        crate::utils::extension_of(file_name)
            .and_then(|ext| FormatTag::from_extension(&ext))
            .filter(|tag| self.formats.contains(tag))
    }
}

#[derive(Error, Debug)]
pub enum ThumbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Directory listing error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Processing error: {0}")]
    ProcessingError(String),

    #[error("Name conflict: {from} -> {to} already exists")]
    Conflict { from: String, to: PathBuf },
}

pub type Result<T> = std::result::Result<T, ThumbError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Cleanup,
    Catalog,
    Manifest,
    Thumbnail,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Cleanup => "cleanup",
            Stage::Catalog => "catalog",
            Stage::Manifest => "manifest",
            Stage::Thumbnail => "thumbnail",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct Failure {
    pub stage: Stage,
    pub subject: String,
    pub message: String,
}

/// Outcome of one folder run. Failures never abort the run; they end up here.
#[derive(Debug, Default)]
pub struct RunReport {
    pub deleted: usize,
    pub renamed: usize,
    pub cataloged: usize,
    pub thumbnails: usize,
    pub dropped_frames: usize,
    pub failures: Vec<Failure>,
}

impl RunReport {
    pub fn record_failure(&mut self, stage: Stage, subject: impl Into<String>, error: &ThumbError) {
        self.failures.push(Failure {
            stage,
            subject: subject.into(),
            message: error.to_string(),
        });
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn failures_in(&self, stage: Stage) -> impl Iterator<Item = &Failure> {
        self.failures.iter().filter(move |f| f.stage == stage)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "deleted {} old thumbnails, renamed {} files, cataloged {} images, wrote {} thumbnails",
            self.deleted, self.renamed, self.cataloged, self.thumbnails
        )?;
        if self.dropped_frames > 0 {
            write!(f, ", dropped {} GIF frames", self.dropped_frames)?;
        }
        if !self.failures.is_empty() {
            write!(f, ", {} failures", self.failures.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ThumbnailConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scale, 0.25);
        assert_eq!(config.frame_delay_ms, 100);
        assert_eq!(config.formats, FormatTag::ALL.to_vec());
    }

    #[test]
    fn test_rejects_non_positive_scale() {
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = ThumbnailConfig::default().with_scale(scale);
            assert!(config.validate().is_err(), "scale {} accepted", scale);
        }
    }

    #[test]
    fn test_enlarging_scale_is_allowed() {
        let config = ThumbnailConfig::default().with_scale(2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_of_is_case_insensitive() {
        let config = ThumbnailConfig::default();
        assert_eq!(config.format_of("a1.JPG"), Some(FormatTag::Jpg));
        assert_eq!(config.format_of("clip.Gif"), Some(FormatTag::Gif));
        assert_eq!(config.format_of("notes.txt"), None);
        assert_eq!(config.format_of("README"), None);
    }

    #[test]
    fn test_format_of_respects_configured_formats() {
        let config = ThumbnailConfig {
            formats: vec![FormatTag::Png],
            ..Default::default()
        };
        assert_eq!(config.format_of("a.png"), Some(FormatTag::Png));
        assert_eq!(config.format_of("a.gif"), None);
    }

    #[test]
    fn test_format_order_is_declaration_order() {
        let mut tags = vec![FormatTag::Gif, FormatTag::Jpeg, FormatTag::Png, FormatTag::Jpg];
        tags.sort();
        assert_eq!(tags, FormatTag::ALL.to_vec());
    }
}
