// thumbsweep/src/processors/mod.rs
mod animated;
mod batch;
mod catalog;
mod cleanup;
mod loader;
mod resizer;
mod writer;

pub use animated::{AnimatedResizer, AnimationStats, ResizedFrames};
pub use batch::FolderProcessor;
pub use catalog::{Catalog, Cataloger, RenameOutcome};
pub use cleanup::Cleanup;
pub use loader::Loader;
pub use resizer::{scaled_dimensions, Resizer};
pub use writer::Writer;
