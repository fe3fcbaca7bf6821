// thumbsweep/src/utils/mod.rs
use crate::core::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One file in the target folder, as seen by a directory snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
}

/// Strips spaces and parentheses from a file name. Idempotent.
pub fn normalize_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| !matches!(c, ' ' | '(' | ')'))
        .collect()
}

/// Lower-cased substring after the last `.`, or `None` when there is no dot.
pub fn extension_of(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

/// `<stem><marker><ext>` next to `source`, keeping the extension's case.
pub fn thumbnail_path(source: &Path, marker: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let new_filename = match source.extension() {
        Some(ext) => format!("{}{}.{}", stem, marker, ext.to_string_lossy()),
        None => format!("{}{}", stem, marker),
    };

    source.with_file_name(new_filename)
}

/// `<stem>-<n>.<ext>` used when auto-suffixing a conflicting name.
pub fn suffixed_name(file_name: &str, counter: usize) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!("{}-{}.{}", stem, counter, ext),
        None => format!("{}-{}", file_name, counter),
    }
}

/// Snapshot of the files directly inside `folder`, sorted by name.
///
/// Symlinks are followed, so a link to a file counts as a file. Failing to
/// read `folder` itself fails the snapshot; an entry that cannot be read is
/// logged and left out.
pub fn list_entries(folder: &Path) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 => {
                log::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if !entry.file_type().is_file() {
            continue;
        }

        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.into_path(),
        });
    }

    Ok(entries)
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = ((bytes_f64.log10() / base.log10()).floor() as usize).min(UNITS.len() - 1);
    let size = bytes_f64 / base.powi(exponent as i32);

    format!("{:.2} {}", size, UNITS[exponent])
}
