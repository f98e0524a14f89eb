/*!
 * Core types and data structures for repotxt
 */

use std::fmt;

/// Kind of an entry returned by a root listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Directory that can be listed further
    Directory,
    /// Anything that is read as a file
    File,
}

/// One item of a directory listing, as reported by a root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Entry name (single path component)
    pub name: String,
    /// Entry kind
    pub kind: EntryKind,
}

impl ListEntry {
    /// Create a directory listing entry
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }

    /// Create a file listing entry
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }
}

/// An entry discovered under the root, identified by its relative path
///
/// Paths are `/`-separated and have no leading slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Entry {
    /// Directory
    Directory(String),
    /// File
    File(String),
}

impl Entry {
    /// Relative path from the root
    pub fn path(&self) -> &str {
        match self {
            Entry::Directory(path) | Entry::File(path) => path,
        }
    }

    /// Final path component
    pub fn name(&self) -> &str {
        let path = self.path();
        path.rsplit('/').next().unwrap_or(path)
    }
}

/// Reason a file's content was omitted from the dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Name matches the binary extension table; bytes were never read
    BinaryExtension,
    /// Remote provided no encoded payload (e.g. files over the API size limit)
    MissingEncoding,
    /// Payload could not be turned into bytes
    DecodeFailure,
    /// Underlying read failed
    ReadError(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::BinaryExtension => write!(f, "Skipped binary file"),
            SkipReason::MissingEncoding => write!(f, "Skipped due to missing encoding"),
            SkipReason::DecodeFailure => write!(f, "Skipped due to unsupported encoding"),
            SkipReason::ReadError(message) => write!(f, "Skipped due to error: {}", message),
        }
    }
}

/// Resolved content of a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Valid UTF-8 text
    Text(String),
    /// Bytes that were not valid UTF-8, decoded as Latin-1
    Latin1(String),
    /// Content omitted
    Skipped(SkipReason),
}

impl Content {
    /// Decode raw bytes as UTF-8, falling back to Latin-1
    pub fn decode(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Content::Text(text),
            Err(e) => Content::Latin1(e.into_bytes().iter().map(|&b| char::from(b)).collect()),
        }
    }

    /// Number of characters that end up in the dump
    pub fn char_count(&self) -> usize {
        match self {
            Content::Text(text) | Content::Latin1(text) => text.chars().count(),
            Content::Skipped(_) => 0,
        }
    }
}

/// A file of the content dump together with its resolved content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDump {
    /// Relative path from the root
    pub path: String,
    /// Resolved content
    pub content: Content,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_name() {
        assert_eq!(Entry::File("a/b/c.txt".to_string()).name(), "c.txt");
        assert_eq!(Entry::Directory("top".to_string()).name(), "top");
    }

    #[test]
    fn test_decode_latin1_fallback() {
        assert_eq!(
            Content::decode(b"caf\xe9".to_vec()),
            Content::Latin1("café".to_string())
        );
        assert_eq!(
            Content::decode("café".as_bytes().to_vec()),
            Content::Text("café".to_string())
        );
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(
            SkipReason::ReadError("permission denied".to_string()).to_string(),
            "Skipped due to error: permission denied"
        );
        assert_eq!(SkipReason::BinaryExtension.to_string(), "Skipped binary file");
    }
}
