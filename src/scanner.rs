/*!
 * Tree traversal and file content resolution
 */

use std::collections::HashSet;
use std::sync::Arc;

use glob_match::glob_match;
use indicatif::ProgressBar;
use tracing::{debug, warn};

use crate::classify::BinaryExtensions;
use crate::error::{RepoTxtError, Result};
use crate::root::{join, Root, README_FILE};
use crate::types::{Content, Entry, EntryKind, FileDump, ListEntry, SkipReason};

/// Directory names that are never traversed
const ALWAYS_SKIPPED: &[&str] = &[".git"];

/// Options controlling a scan
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Names whose content is never read
    pub binary_extensions: BinaryExtensions,
    /// Glob patterns matched against entry names; matches are left out entirely
    pub ignore_patterns: Vec<String>,
}

impl ScanOptions {
    /// Check if an entry should be left out of the scan
    pub fn should_ignore(&self, name: &str) -> bool {
        ALWAYS_SKIPPED.contains(&name)
            || self
                .ignore_patterns
                .iter()
                .any(|pattern| glob_match(pattern, name))
    }
}

/// Lazy depth-first walk over a root
///
/// Uses an explicit stack instead of recursion, so depth is bounded by memory
/// only. Entries within a directory come out sorted by name.
pub struct Walk<'r, R: Root + ?Sized> {
    root: &'r R,
    options: &'r ScanOptions,
    pending: Vec<Entry>,
    visited: HashSet<String>,
}

/// Start walking a root
///
/// Listing the root itself happens eagerly; failing to do so is fatal.
pub fn enumerate<'r, R: Root + ?Sized>(root: &'r R, options: &'r ScanOptions) -> Result<Walk<'r, R>> {
    let mut walk = Walk {
        root,
        options,
        pending: Vec::new(),
        visited: HashSet::new(),
    };

    walk.visited.insert(String::new());
    let entries = root.list("")?;
    walk.push_children("", entries);

    Ok(walk)
}

impl<R: Root + ?Sized> Walk<'_, R> {
    fn push_children(&mut self, dir: &str, mut entries: Vec<ListEntry>) {
        entries.retain(|e| !self.options.should_ignore(&e.name));
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        // Reversed so the smallest name is popped first
        for entry in entries.into_iter().rev() {
            let path = join(dir, &entry.name);
            self.pending.push(match entry.kind {
                EntryKind::Directory => Entry::Directory(path),
                EntryKind::File => Entry::File(path),
            });
        }
    }
}

impl<R: Root + ?Sized> Iterator for Walk<'_, R> {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        loop {
            let entry = self.pending.pop()?;

            let path = match &entry {
                Entry::File(_) => return Some(entry),
                Entry::Directory(path) => path.clone(),
            };

            if !self.visited.insert(path.clone()) {
                debug!("Skipping already visited directory {}", path);
                continue;
            }

            match self.root.list(&path) {
                Ok(children) => self.push_children(&path, children),
                Err(e) => warn!("Error listing directory {}: {}", path, e),
            }

            return Some(entry);
        }
    }
}

/// Resolve the content of a single file
///
/// Never fails: problems are reported as a [`SkipReason`].
pub fn read_content<R: Root + ?Sized>(
    root: &R,
    path: &str,
    extensions: &BinaryExtensions,
) -> Content {
    if extensions.is_binary(path) {
        return Content::Skipped(SkipReason::BinaryExtension);
    }

    match root.read_bytes(path) {
        Ok(bytes) => Content::decode(bytes),
        Err(RepoTxtError::MissingEncoding(_)) => Content::Skipped(SkipReason::MissingEncoding),
        Err(RepoTxtError::Decode(e)) => {
            debug!("Could not decode {}: {}", path, e);
            Content::Skipped(SkipReason::DecodeFailure)
        }
        Err(e) => {
            warn!("Error reading {}: {}", path, e);
            Content::Skipped(SkipReason::ReadError(e.to_string()))
        }
    }
}

/// Scanner statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStatistics {
    /// Number of directories emitted
    pub directories: usize,
    /// Files whose content made it into the dump
    pub files_included: usize,
    /// Of those, files decoded as Latin-1
    pub latin1_decoded: usize,
    /// Files skipped by extension
    pub skipped_binary: usize,
    /// Files skipped because the remote gave no encoding
    pub skipped_missing_encoding: usize,
    /// Files skipped because their payload could not be decoded
    pub skipped_decode: usize,
    /// Files skipped because reading failed
    pub skipped_error: usize,
    /// Characters of included content
    pub total_chars: usize,
}

impl ScanStatistics {
    fn record(&mut self, content: &Content) {
        match content {
            Content::Text(_) => self.files_included += 1,
            Content::Latin1(_) => {
                self.files_included += 1;
                self.latin1_decoded += 1;
            }
            Content::Skipped(SkipReason::BinaryExtension) => self.skipped_binary += 1,
            Content::Skipped(SkipReason::MissingEncoding) => self.skipped_missing_encoding += 1,
            Content::Skipped(SkipReason::DecodeFailure) => self.skipped_decode += 1,
            Content::Skipped(SkipReason::ReadError(_)) => self.skipped_error += 1,
        }
        self.total_chars += content.char_count();
    }

    /// Total number of files skipped for any reason
    pub fn files_skipped(&self) -> usize {
        self.skipped_binary + self.skipped_missing_encoding + self.skipped_decode + self.skipped_error
    }
}

/// Everything gathered from one scan of a root
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Root name
    pub name: String,
    /// README text or placeholder
    pub readme: String,
    /// Entries in walk order
    pub entries: Vec<Entry>,
    /// Files of the content dump, in walk order
    pub files: Vec<FileDump>,
    /// Scan statistics
    pub statistics: ScanStatistics,
}

/// Scanner for root contents
pub struct Scanner {
    /// Scanner options
    options: ScanOptions,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(options: ScanOptions, progress: Arc<ProgressBar>) -> Self {
        Self { options, progress }
    }

    /// Walk the root once and resolve every file's content
    pub fn scan<R: Root + ?Sized>(&self, root: &R) -> Result<Snapshot> {
        self.progress.set_message(format!("Fetching README for: {}", root.name()));
        let readme = root.readme();

        let mut entries = Vec::new();
        let mut files = Vec::new();
        let mut statistics = ScanStatistics::default();

        for entry in enumerate(root, &self.options)? {
            match &entry {
                Entry::Directory(path) => {
                    statistics.directories += 1;
                    self.progress.set_message(format!("Processing {}", path));
                }
                Entry::File(path) => {
                    if entry.name().eq_ignore_ascii_case(README_FILE) {
                        debug!("README {} has its own section", path);
                    } else {
                        self.progress.inc(1);
                        self.progress.set_message(format!("Current file: {}", path));

                        let content = read_content(root, path, &self.options.binary_extensions);
                        statistics.record(&content);
                        files.push(FileDump {
                            path: path.clone(),
                            content,
                        });
                    }
                }
            }
            entries.push(entry);
        }

        Ok(Snapshot {
            name: root.name().to_string(),
            readme,
            entries,
            files,
            statistics,
        })
    }
}
