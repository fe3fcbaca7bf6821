mod cli;
mod core;
mod processors;
mod utils;

pub use cli::{Algorithm, Cli, ConflictArg};
pub use crate::core::processor::{ThumbnailOutcome, ThumbnailProcessor};
pub use crate::core::{
    ConflictPolicy, Failure, FormatTag, ResizeAlgorithm, Result, RunReport, Stage,
    ThumbError, ThumbnailConfig,
};
pub use processors::{
    scaled_dimensions, AnimatedResizer, AnimationStats, Catalog, Cataloger, Cleanup,
    FolderProcessor, Loader, RenameOutcome, ResizedFrames, Resizer, Writer,
};
pub use utils::{
    extension_of, format_file_size, list_entries, normalize_filename, suffixed_name,
    thumbnail_path, Entry,
};

pub mod prelude {
    pub use crate::{
        Cleanup, Cataloger, FolderProcessor, RunReport, ThumbnailConfig, ThumbnailProcessor,
    };
}
