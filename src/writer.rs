/*!
 * Text document rendering for repotxt
 */

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::scanner::Snapshot;
use crate::types::{Content, Entry, FileDump};

/// Render the structure section: one path per line, directories end in `/`
pub fn render_structure(entries: &[Entry]) -> String {
    let mut out = String::new();
    for entry in entries {
        match entry {
            Entry::Directory(path) => {
                let _ = writeln!(out, "{}/", path);
            }
            Entry::File(path) => {
                let _ = writeln!(out, "{}", path);
            }
        }
    }
    out
}

/// Render the content dump section
pub fn render_contents(files: &[FileDump]) -> String {
    let mut out = String::new();
    for file in files {
        let _ = writeln!(out, "File: {}", file.path);
        let _ = match &file.content {
            Content::Text(text) => write!(out, "Content:\n{}\n\n", text),
            Content::Latin1(text) => write!(out, "Content (Latin-1 Decoded):\n{}\n\n", text),
            Content::Skipped(reason) => write!(out, "Content: {}\n\n", reason),
        };
    }
    out
}

/// Assemble the full document from its sections
pub fn render(instructions: &str, snapshot: &Snapshot) -> String {
    format!(
        "{}\n\nREADME:\n{}\n\nRepository Structure: {}\n{}\n\n{}",
        instructions,
        snapshot.readme,
        snapshot.name,
        render_structure(&snapshot.entries),
        render_contents(&snapshot.files)
    )
}

/// Where a rendered document goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Standard output
    Stdout,
    /// A file on disk
    File(PathBuf),
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::Stdout => write!(f, "<stdout>"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Writer for rendered documents
pub struct TextWriter {
    destination: Destination,
}

impl TextWriter {
    /// Create a new writer
    pub fn new(destination: Destination) -> Self {
        Self { destination }
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Render the snapshot and write it out, returning the document
    pub fn write(&self, instructions: &str, snapshot: &Snapshot) -> Result<String> {
        let document = render(instructions, snapshot);
        match &self.destination {
            Destination::Stdout => print!("{}", document),
            Destination::File(path) => fs::write(path, &document)?,
        }
        Ok(document)
    }
}
