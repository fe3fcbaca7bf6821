use crate::core::processor::{ThumbnailOutcome, ThumbnailProcessor};
use crate::core::{Result, RunReport, Stage, ThumbError, ThumbnailConfig};
use crate::processors::{Cataloger, Cleanup};
use crate::utils::{list_entries, thumbnail_path, Entry};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Runs the full maintenance pass over one folder: cleanup, normalize and
/// catalog, then thumbnail generation. Each stage lists the folder again so
/// it sees what the previous stage renamed or deleted.
pub struct FolderProcessor {
    processor: ThumbnailProcessor,
}

impl FolderProcessor {
    pub fn new(config: ThumbnailConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            processor: ThumbnailProcessor::new(config),
        })
    }

    pub fn config(&self) -> &ThumbnailConfig {
        self.processor.config()
    }

    pub fn run(&self, folder: &Path) -> Result<RunReport> {
        self.validate_folder(folder)?;

        let config = self.config();
        let mut report = RunReport::default();

        Cleanup::new(config.thumb_marker.as_str()).run(folder, &mut report);
        Cataloger::new(config).run(folder, &mut report);
        self.generate_thumbnails(folder, &mut report);

        log::info!("Done! Check the folder: {}", folder.display());
        Ok(report)
    }

    fn generate_thumbnails(&self, folder: &Path, report: &mut RunReport) {
        let entries = match list_entries(folder) {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("Error listing {}: {}", folder.display(), e);
                report.record_failure(Stage::Thumbnail, folder.display().to_string(), &e);
                return;
            }
        };

        let sources: Vec<Entry> = entries
            .into_iter()
            .filter(|entry| self.config().format_of(&entry.name).is_some())
            .collect();

        if sources.is_empty() {
            log::warn!("No image files found in {}", folder.display());
            return;
        }

        log::info!("Generating {} thumbnails in {}", sources.len(), folder.display());

        let pb = self.create_progress_bar(sources.len());

        for source in &sources {
            pb.set_message(source.name.clone());
            let target = thumbnail_path(&source.path, &self.config().thumb_marker);

            match self.processor.process(&source.path, &target) {
                Ok(outcome) => {
                    report.thumbnails += 1;
                    if let ThumbnailOutcome::Animated { dropped_frames, .. } = outcome {
                        report.dropped_frames += dropped_frames;
                        if dropped_frames > 0 {
                            log::warn!(
                                "{} frames dropped from {}",
                                dropped_frames,
                                target.display()
                            );
                        }
                    }
                }
                Err(e) => {
                    log::error!("Error resizing image {}: {}", source.name, e);
                    report.record_failure(Stage::Thumbnail, source.name.clone(), &e);
                }
            }
            pb.inc(1);
        }

        pb.finish_with_message(format!("{} thumbnails written", report.thumbnails));
    }

    fn create_progress_bar(&self, total: usize) -> ProgressBar {
        if !self.config().show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }

    fn validate_folder(&self, folder: &Path) -> Result<()> {
        if !folder.exists() {
            return Err(ThumbError::InvalidParameter(
                format!("Folder does not exist: {}", folder.display())
            ));
        }

        if !folder.is_dir() {
            return Err(ThumbError::InvalidParameter(
                format!("Path is not a directory: {}", folder.display())
            ));
        }

        Ok(())
    }
}
