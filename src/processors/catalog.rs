// thumbsweep/src/processors/catalog.rs
use crate::core::{ConflictPolicy, FormatTag, Result, RunReport, Stage, ThumbError, ThumbnailConfig};
use crate::utils::{list_entries, normalize_filename, suffixed_name, Entry};
use std::collections::BTreeMap;
use std::path::Path;

/// Cleaned filenames grouped by format, in snapshot order. Every format has
/// a group, even when nothing is cataloged under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<FormatTag, Vec<String>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            entries: FormatTag::ALL.iter().map(|tag| (*tag, Vec::new())).collect(),
        }
    }

    pub fn push(&mut self, tag: FormatTag, name: String) {
        self.entries.entry(tag).or_default().push(name);
    }

    pub fn files(&self, tag: FormatTag) -> &[String] {
        self.entries.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Manifest text: a `Format:` header per format, one `- name` line per
    /// file and a blank line after each group, empty groups included.
    pub fn render_manifest(&self) -> String {
        let mut out = String::new();
        for (tag, files) in &self.entries {
            out.push_str(&format!("Format: {}\n", tag));
            for file in files {
                out.push_str(&format!("- {}\n", file));
            }
            out.push('\n');
        }
        out
    }

    pub fn write_manifest(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render_manifest())?;
        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Unchanged,
    Renamed(String),
    /// Cleaned name was taken; the file keeps its original name.
    Skipped { conflict: String },
}

/// Renames entries to their cleaned names and builds the [`Catalog`].
pub struct Cataloger<'a> {
    config: &'a ThumbnailConfig,
}

impl<'a> Cataloger<'a> {
    pub fn new(config: &'a ThumbnailConfig) -> Self {
        Self { config }
    }

    /// Renames and catalogs the folder, then writes the manifest.
    ///
    /// Returns `None` only if the folder could not be listed.
    pub fn run(&self, folder: &Path, report: &mut RunReport) -> Option<Catalog> {
        let entries = match list_entries(folder) {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("Error listing {}: {}", folder.display(), e);
                report.record_failure(Stage::Catalog, folder.display().to_string(), &e);
                return None;
            }
        };

        let mut catalog = Catalog::new();

        for entry in &entries {
            match self.process_entry(folder, entry, report) {
                Ok(Some((tag, name))) => {
                    catalog.push(tag, name);
                    report.cataloged += 1;
                }
                Ok(None) => {}
                Err(e) => {
                    log::error!("Error processing file {}: {}", entry.name, e);
                    report.record_failure(Stage::Catalog, entry.name.clone(), &e);
                }
            }
        }

        let manifest_path = folder.join(&self.config.manifest_name);
        match catalog.write_manifest(&manifest_path) {
            Ok(()) => log::info!("Wrote image list: {}", manifest_path.display()),
            Err(e) => {
                log::error!("Error writing image list: {}", e);
                report.record_failure(Stage::Manifest, self.config.manifest_name.clone(), &e);
            }
        }

        Some(catalog)
    }

    fn process_entry(
        &self,
        folder: &Path,
        entry: &Entry,
        report: &mut RunReport,
    ) -> Result<Option<(FormatTag, String)>> {
        let final_name = match self.rename_entry(folder, entry)? {
            RenameOutcome::Unchanged => entry.name.clone(),
            RenameOutcome::Renamed(name) => {
                log::info!("Renamed: {} -> {}", entry.name, name);
                report.renamed += 1;
                name
            }
            RenameOutcome::Skipped { conflict } => {
                let e = ThumbError::Conflict {
                    from: entry.name.clone(),
                    to: folder.join(&conflict),
                };
                log::warn!("Keeping original name: {}", e);
                report.record_failure(Stage::Catalog, entry.name.clone(), &e);
                entry.name.clone()
            }
        };

        Ok(self.config.format_of(&final_name).map(|tag| (tag, final_name)))
    }

    /// Moves `entry` to its cleaned name according to the conflict policy.
    pub fn rename_entry(&self, folder: &Path, entry: &Entry) -> Result<RenameOutcome> {
        let cleaned = normalize_filename(&entry.name);
        if cleaned == entry.name {
            return Ok(RenameOutcome::Unchanged);
        }

        if cleaned.is_empty() {
            return Err(ThumbError::InvalidParameter(format!(
                "File name {:?} is empty once cleaned",
                entry.name
            )));
        }

        let mut target_name = cleaned;
        if folder.join(&target_name).exists() {
            match self.config.conflict_policy {
                ConflictPolicy::Overwrite => {
                    log::warn!("Overwriting {} with {}", target_name, entry.name);
                }
                ConflictPolicy::Skip => {
                    return Ok(RenameOutcome::Skipped { conflict: target_name });
                }
                ConflictPolicy::AutoSuffix => {
                    target_name = free_name(folder, &target_name);
                }
            }
        }

        std::fs::rename(&entry.path, folder.join(&target_name))?;
        Ok(RenameOutcome::Renamed(target_name))
    }
}

fn free_name(folder: &Path, name: &str) -> String {
    (1..)
        .map(|counter| suffixed_name(name, counter))
        .find(|candidate| !folder.join(candidate).exists())
        .unwrap_or_else(|| name.to_string())
}
