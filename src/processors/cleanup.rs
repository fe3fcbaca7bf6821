// thumbsweep/src/processors/cleanup.rs
use crate::core::{RunReport, Stage, ThumbError};
use crate::utils::{list_entries, Entry};
use std::path::Path;

/// Deletes every file whose name contains the thumbnail marker.
pub struct Cleanup {
    marker: String,
}

impl Cleanup {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn run(&self, folder: &Path, report: &mut RunReport) {
        let entries = match list_entries(folder) {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("Error deleting files: {}", e);
                report.record_failure(Stage::Cleanup, folder.display().to_string(), &e);
                return;
            }
        };

        self.remove_thumbnails(&entries, report);
    }

    /// Deletes the marked entries of a snapshot, one at a time.
    pub fn remove_thumbnails(&self, entries: &[Entry], report: &mut RunReport) {
        for entry in entries.iter().filter(|e| e.name.contains(&self.marker)) {
            match std::fs::remove_file(&entry.path) {
                Ok(()) => {
                    log::info!("Deleted: {}", entry.path.display());
                    report.deleted += 1;
                }
                Err(e) => {
                    let e = ThumbError::from(e);
                    log::error!("Error deleting {}: {}", entry.path.display(), e);
                    report.record_failure(Stage::Cleanup, entry.name.clone(), &e);
                }
            }
        }
    }
}
