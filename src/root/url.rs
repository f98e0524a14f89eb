/*!
 * GitHub repository URL parsing
 */

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::error::RepoTxtError;

// Statically compiled regexes for better performance
static HTTP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?:www\.)?github\.com/[^/]+/[^/]+(?:/.*)?$")
        .expect("valid HTTP regex")
});

static SSH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^git@github\.com:([^/]+)/([^/]+?)(?:\.git)?/?$").expect("valid SSH regex")
});

static SHORTHAND_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)$").expect("valid shorthand regex")
});

/// A repository hosted on GitHub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubRepo {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl std::fmt::Display for GitHubRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl GitHubRepo {
    fn new(owner: &str, name: &str) -> Result<Self, RepoTxtError> {
        let name = name.strip_suffix(".git").unwrap_or(name);
        if owner.is_empty() || name.is_empty() {
            return Err(RepoTxtError::InvalidUrl(format!("{}/{}", owner, name)));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl FromStr for GitHubRepo {
    type Err = RepoTxtError;

    /// Accepts `https://github.com/owner/repo[.git][/...]`,
    /// `git@github.com:owner/repo.git` and `owner/repo`
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();

        if HTTP_REGEX.is_match(input) {
            let parsed = Url::parse(input)
                .map_err(|e| RepoTxtError::InvalidUrl(format!("{}: {}", input, e)))?;
            let segments: Vec<&str> = parsed
                .path_segments()
                .map(|s| s.filter(|seg| !seg.is_empty()).collect())
                .unwrap_or_default();

            if segments.len() < 2 {
                return Err(RepoTxtError::InvalidUrl(format!(
                    "Missing owner or repository in URL: {}",
                    input
                )));
            }

            return Self::new(segments[0], segments[1]);
        }

        if let Some(captures) = SSH_REGEX.captures(input) {
            return Self::new(&captures[1], &captures[2]);
        }

        if let Some(captures) = SHORTHAND_REGEX.captures(input) {
            return Self::new(&captures[1], &captures[2]);
        }

        Err(RepoTxtError::InvalidUrl(input.to_string()))
    }
}

/// Check if a string is a GitHub repository URL (HTTP(S) or SSH form)
pub fn is_github_url(input: &str) -> bool {
    let input = input.trim();
    (HTTP_REGEX.is_match(input) || SSH_REGEX.is_match(input)) && input.parse::<GitHubRepo>().is_ok()
}
