// thumbsweep/src/cli.rs
use crate::core::{ConflictPolicy, ResizeAlgorithm, ThumbnailConfig};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "thumbsweep", version, about = "Regenerate _thumb copies of every image in a folder")]
pub struct Cli {
    /// Folder to process (not recursive)
    pub folder: PathBuf,

    /// Scale factor applied to width and height
    #[arg(short, long, default_value_t = 0.25)]
    pub scale: f64,

    /// What to do when a cleaned filename already exists
    #[arg(long, value_enum, default_value_t = ConflictArg::Skip)]
    pub on_conflict: ConflictArg,

    /// Display time of every frame in generated GIFs, in milliseconds
    #[arg(long, default_value_t = 100)]
    pub frame_delay_ms: u32,

    /// Resampling filter for static images
    #[arg(long, value_enum, default_value_t = Algorithm::Bicubic)]
    pub filter: Algorithm,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl From<Algorithm> for ResizeAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Nearest => ResizeAlgorithm::Nearest,
            Algorithm::Bilinear => ResizeAlgorithm::Bilinear,
            Algorithm::Bicubic => ResizeAlgorithm::Bicubic,
            Algorithm::Lanczos3 => ResizeAlgorithm::Lanczos3,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictArg {
    Overwrite,
    Skip,
    Suffix,
}

impl From<ConflictArg> for ConflictPolicy {
    fn from(arg: ConflictArg) -> Self {
        match arg {
            ConflictArg::Overwrite => ConflictPolicy::Overwrite,
            ConflictArg::Skip => ConflictPolicy::Skip,
            ConflictArg::Suffix => ConflictPolicy::AutoSuffix,
        }
    }
}

impl Cli {
    pub fn to_config(&self) -> ThumbnailConfig {
        ThumbnailConfig {
            scale: self.scale,
            frame_delay_ms: self.frame_delay_ms,
            conflict_policy: self.on_conflict.into(),
            static_algorithm: self.filter.into(),
            show_progress: !self.no_progress,
            ..Default::default()
        }
    }
}
