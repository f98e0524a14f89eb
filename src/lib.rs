/*!
 * repotxt - Flatten a source tree into a single text document for LLM context
 *
 * This library walks a local directory or a GitHub repository and
 * concatenates its README, directory structure and file contents into one
 * UTF-8 document.
 */

pub mod classify;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod root;
pub mod scanner;
pub mod types;
pub mod writer;


// Re-export main components for easier access
pub use classify::{classify, BinaryExtensions};
pub use config::{Args, Config, Target};
pub use error::{RepoTxtError, Result};
pub use report::{Reporter, ScanReport};
pub use root::{LocalRoot, RemoteRoot, Root};
pub use scanner::{enumerate, read_content, ScanOptions, ScanStatistics, Scanner, Snapshot, Walk};
pub use types::{Content, Entry, EntryKind, FileDump, ListEntry, SkipReason};
pub use writer::{render, Destination, TextWriter};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
