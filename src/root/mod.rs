/*!
 * Roots: the trees repotxt can serialize
 *
 * A root is anything that can list the entries of a directory and return
 * the raw bytes of a file, both addressed by `/`-separated paths relative
 * to the root. Two providers exist: the local filesystem and the GitHub
 * contents API.
 */

mod local;
mod remote;
mod url;

pub use local::LocalRoot;
pub use remote::{decode_payload, FilePayload, RemoteRoot, DEFAULT_API_URL};
pub use url::{is_github_url, GitHubRepo};

use tracing::info;

use crate::config::{Config, Target};
use crate::error::Result;
use crate::types::ListEntry;

/// Name of the README file given its own section
pub const README_FILE: &str = "README.md";

/// Placeholder used when the root has no readable README
pub const README_NOT_FOUND: &str = "README not found.";

/// A tree that can be listed and read
pub trait Root {
    /// Display name of the root (directory or repository name)
    fn name(&self) -> &str;

    /// List the entries of a directory; `""` is the root itself
    fn list(&self, rel_path: &str) -> Result<Vec<ListEntry>>;

    /// Read the raw bytes of a file
    fn read_bytes(&self, rel_path: &str) -> Result<Vec<u8>>;

    /// README text, or [`README_NOT_FOUND`]
    fn readme(&self) -> String {
        self.read_bytes(README_FILE)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .unwrap_or_else(|| README_NOT_FOUND.to_string())
    }
}

/// Join a relative directory path and an entry name
pub fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Resolve the configured target into a root
///
/// Errors here are fatal for the run: missing credential, unreachable
/// repository, missing directory.
pub fn open(config: &Config) -> Result<Box<dyn Root>> {
    match &config.target {
        Target::Local(path) => {
            info!(path = %path.display(), "opening local root");
            Ok(Box::new(LocalRoot::open(path)?))
        }
        Target::Remote(repo) => {
            info!(repo = %repo, "connecting to remote root");
            Ok(Box::new(RemoteRoot::connect(
                repo.clone(),
                config.github_token.as_ref(),
                &config.api_url,
            )?))
        }
    }
}
