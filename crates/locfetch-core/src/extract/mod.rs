//! Archive extraction.
//!
//! Entries are pulled one at a time through [`ZipEntries::next_entry`]; the
//! mutable borrow on the archive guarantees a single open entry, which bounds
//! open file handles and memory regardless of archive size. Extraction is
//! best-effort: unsafe entry names are skipped with a warning and per-entry
//! I/O failures are logged, while only an unreadable archive aborts the run.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use zip::read::ZipFile;
use zip::ZipArchive;

use crate::error::{DistError, Result};

/// Counters describing what an extraction run did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractReport {
    pub files_written: usize,
    pub dirs_created: usize,
    pub skipped_unsafe: usize,
    pub failed: usize,
}

/// Pull-based reader over the entries of a zip archive.
pub struct ZipEntries {
    archive: ZipArchive<BufReader<File>>,
    path: PathBuf,
    index: usize,
}

/// One archive entry, readable as a byte stream.
pub struct Entry<'a> {
    inner: ZipFile<'a>,
}

impl Entry<'_> {
    /// Declared path of the entry inside the archive. Must be validated
    /// before any filesystem use.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Whether the entry declares a directory (name ends in a separator).
    pub fn is_dir(&self) -> bool {
        self.inner.is_dir()
    }
}

impl Read for Entry<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl ZipEntries {
    /// Open an archive for entry-by-entry reading.
    ///
    /// Fails with [`DistError::ArchiveCorrupt`] when the file is not a
    /// readable zip archive.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let archive =
            ZipArchive::new(BufReader::new(file)).map_err(|e| DistError::ArchiveCorrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            archive,
            path: path.to_path_buf(),
            index: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }

    /// Advance to the next entry, or `None` when the archive is exhausted.
    ///
    /// The returned entry borrows the reader; it must be dropped before the
    /// next call.
    pub fn next_entry(&mut self) -> Result<Option<Entry<'_>>> {
        if self.index >= self.archive.len() {
            return Ok(None);
        }

        let index = self.index;
        self.index += 1;

        let inner = self
            .archive
            .by_index(index)
            .map_err(|e| DistError::ArchiveCorrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        Ok(Some(Entry { inner }))
    }
}

/// True when the declared name contains a parent-directory segment.
fn has_parent_segment(name: &str) -> bool {
    name.split(['/', '\\']).any(|segment| segment == "..")
}

/// Extract `archive_path` into `target_dir`.
///
/// Unsafe and empty entry names are skipped; per-entry I/O failures are
/// counted but do not abort the run. Only a corrupt archive is fatal.
pub fn extract(archive_path: &Path, target_dir: &Path) -> Result<ExtractReport> {
    std::fs::create_dir_all(target_dir)?;

    let mut entries = ZipEntries::open(archive_path)?;
    let mut report = ExtractReport::default();

    while let Some(mut entry) = entries.next_entry()? {
        let name = entry.name().to_string();

        if name.is_empty() {
            continue;
        }

        if has_parent_segment(&name) {
            log::warn!("Skipping unsafe archive entry {name:?}: parent-directory segment");
            report.skipped_unsafe += 1;
            continue;
        }

        let outpath = target_dir.join(&name);

        if entry.is_dir() {
            match std::fs::create_dir_all(&outpath) {
                Ok(()) => report.dirs_created += 1,
                Err(e) => {
                    log::error!("Failed to create directory {}: {e}", outpath.display());
                    report.failed += 1;
                }
            }
            continue;
        }

        match write_entry(&mut entry, &outpath) {
            Ok(()) => report.files_written += 1,
            Err(e) => {
                log::error!("Failed to extract {name:?}: {e}");
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

fn write_entry(entry: &mut Entry<'_>, outpath: &Path) -> std::io::Result<()> {
    if let Some(parent) = outpath.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut outfile = File::create(outpath)?;
    std::io::copy(entry, &mut outfile)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn build_zip(path: &Path, entries: &[(&str, Option<&[u8]>)]) {
        let file = File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();

        for (name, content) in entries {
            match content {
                Some(bytes) => {
                    writer.start_file(*name, options).unwrap();
                    writer.write_all(bytes).unwrap();
                }
                None => {
                    writer.add_directory(*name, options).unwrap();
                }
            }
        }

        writer.finish().unwrap();
    }

    fn snapshot(dir: &Path) -> BTreeMap<String, Vec<u8>> {
        let mut files = BTreeMap::new();
        let mut stack = vec![dir.to_path_buf()];
        while let Some(current) = stack.pop() {
            for entry in std::fs::read_dir(&current).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    stack.push(path);
                } else {
                    let rel = path.strip_prefix(dir).unwrap().to_string_lossy().to_string();
                    files.insert(rel, std::fs::read(&path).unwrap());
                }
            }
        }
        files
    }

    #[test]
    fn test_extracts_files_and_directories() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("bundle.zip");
        build_zip(
            &archive,
            &[
                ("wording/", None),
                ("wording/fr.json", Some(b"{\"a\":1}")),
                ("top.txt", Some(b"top")),
            ],
        );

        let target = dir.path().join("out");
        let report = extract(&archive, &target).unwrap();

        assert_eq!(report.files_written, 2);
        assert_eq!(report.dirs_created, 1);
        assert_eq!(report.skipped_unsafe, 0);
        assert_eq!(report.failed, 0);
        assert_eq!(
            std::fs::read(target.join("wording/fr.json")).unwrap(),
            b"{\"a\":1}"
        );
        assert_eq!(std::fs::read(target.join("top.txt")).unwrap(), b"top");
    }

    #[test]
    fn test_parent_segment_entries_are_skipped() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("evil.zip");
        build_zip(
            &archive,
            &[
                ("../escape.txt", Some(b"nope")),
                ("inner/../../escape2.txt", Some(b"nope")),
                ("safe.txt", Some(b"yes")),
            ],
        );

        // Extract into a subdirectory so an escape would land somewhere
        // observable.
        let target = dir.path().join("out");
        let report = extract(&archive, &target).unwrap();

        assert_eq!(report.skipped_unsafe, 2);
        assert_eq!(report.files_written, 1);
        assert!(target.join("safe.txt").exists());
        assert!(!dir.path().join("escape.txt").exists());
        assert!(!dir.path().join("escape2.txt").exists());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("bundle.zip");
        build_zip(
            &archive,
            &[
                ("a.json", Some(b"{\"a\":1}")),
                ("nested/", None),
                ("nested/b.json", Some(b"{\"b\":2}")),
            ],
        );

        let target = dir.path().join("out");
        extract(&archive, &target).unwrap();
        let first = snapshot(&target);

        extract(&archive, &target).unwrap();
        let second = snapshot(&target);

        assert_eq!(first, second);
    }

    #[test]
    fn test_corrupt_archive_is_fatal() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("garbage.zip");
        std::fs::write(&archive, b"this is not a zip file").unwrap();

        let err = extract(&archive, &dir.path().join("out")).unwrap_err();
        assert!(matches!(err, DistError::ArchiveCorrupt { .. }), "got {err}");
    }

    #[test]
    fn test_next_entry_walks_all_entries() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("bundle.zip");
        build_zip(
            &archive,
            &[("one.txt", Some(b"1")), ("two.txt", Some(b"2"))],
        );

        let mut entries = ZipEntries::open(&archive).unwrap();
        assert_eq!(entries.len(), 2);

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().unwrap() {
            names.push(entry.name().to_string());
        }
        assert_eq!(names, vec!["one.txt", "two.txt"]);
    }

    #[test]
    fn test_has_parent_segment() {
        assert!(has_parent_segment("../x"));
        assert!(has_parent_segment("a/../b"));
        assert!(has_parent_segment("a\\..\\b"));
        assert!(!has_parent_segment("a/b..c"));
        assert!(!has_parent_segment("..a/b"));
    }
}
