//! Remote root backed by the GitHub REST contents API

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::{Client, Response};
use reqwest::header::{self, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::url::GitHubRepo;
use super::Root;
use crate::error::{RepoTxtError, Result};
use crate::types::ListEntry;
use crate::{bail, error};

/// Public GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("repotxt/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct RepoMetadata {
    default_branch: String,
}

#[derive(Deserialize)]
struct ContentItem {
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

/// File object returned by the contents API
#[derive(Debug, Deserialize)]
pub struct FilePayload {
    /// `base64`, `none`, or absent for files the API will not inline
    #[serde(default)]
    pub encoding: Option<String>,
    /// Encoded content, wrapped at 60 columns
    #[serde(default)]
    pub content: Option<String>,
}

/// Turn a contents API file object into raw bytes
pub fn decode_payload(path: &str, payload: &FilePayload) -> Result<Vec<u8>> {
    match payload.encoding.as_deref() {
        None | Some("none") | Some("") => Err(RepoTxtError::MissingEncoding(path.to_string())),
        Some("base64") => {
            let encoded: String = payload
                .content
                .as_deref()
                .unwrap_or_default()
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            STANDARD
                .decode(encoded)
                .map_err(|e| error!(Decode, "{}: {}", path, e))
        }
        Some(other) => Err(error!(Decode, "{}: unsupported encoding {}", path, other)),
    }
}

/// A repository on GitHub, read through the contents API
pub struct RemoteRoot {
    repo: GitHubRepo,
    client: Client,
    api_url: Url,
    branch: String,
}

impl RemoteRoot {
    /// Connect to a repository and resolve its default branch
    ///
    /// Fails with a configuration error before any request when no token is
    /// given.
    pub fn connect(repo: GitHubRepo, token: Option<&SecretString>, api_url: &str) -> Result<Self> {
        let token = match token {
            Some(token) if !token.expose_secret().trim().is_empty() => token,
            _ => bail!(
                Config,
                "Please set the GITHUB_TOKEN environment variable or pass --github-token"
            ),
        };

        let api_url = Url::parse(api_url)
            .map_err(|e| error!(Config, "Invalid API URL {}: {}", api_url, e))?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret().trim()))
            .map_err(|_| error!(Config, "GitHub token contains invalid characters"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        let mut root = Self {
            repo,
            client,
            api_url,
            branch: String::new(),
        };

        let metadata: RepoMetadata = root.get_json(root.repo_url()?)?;
        debug!(repo = %root.repo, branch = %metadata.default_branch, "resolved default branch");
        root.branch = metadata.default_branch;

        Ok(root)
    }

    /// Branch the contents are read from
    pub fn branch(&self) -> &str {
        &self.branch
    }

    fn repo_url(&self) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| error!(Config, "API URL cannot be a base: {}", self.api_url))?
            .pop_if_empty()
            .extend(["repos", self.repo.owner.as_str(), self.repo.name.as_str()]);
        Ok(url)
    }

    fn contents_url(&self, rel_path: &str) -> Result<Url> {
        let mut url = self.repo_url()?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| error!(Config, "API URL cannot be a base: {}", self.api_url))?;
            segments.push("contents");
            if rel_path.is_empty() {
                segments.push("");
            } else {
                segments.extend(rel_path.split('/'));
            }
        }
        url.query_pairs_mut().append_pair("ref", &self.branch);
        Ok(url)
    }

    fn get_json<T: for<'de> Deserialize<'de>>(&self, url: Url) -> Result<T> {
        let response = self.client.get(url.clone()).send()?;
        let response = check_status(&url, response)?;
        Ok(response.json()?)
    }
}

fn check_status(url: &Url, response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let error_text = response
        .text()
        .unwrap_or_else(|_| "Unable to read error message".to_string());
    bail!(Fetch, "GitHub API returned {} for {}: {}", status, url.path(), error_text)
}

impl Root for RemoteRoot {
    fn name(&self) -> &str {
        &self.repo.name
    }

    fn list(&self, rel_path: &str) -> Result<Vec<ListEntry>> {
        let items: Vec<ContentItem> = self.get_json(self.contents_url(rel_path)?)?;

        Ok(items
            .into_iter()
            .map(|item| {
                if item.kind == "dir" {
                    ListEntry::dir(item.name)
                } else {
                    ListEntry::file(item.name)
                }
            })
            .collect())
    }

    fn read_bytes(&self, rel_path: &str) -> Result<Vec<u8>> {
        let payload: FilePayload = self.get_json(self.contents_url(rel_path)?)?;
        decode_payload(rel_path, &payload)
    }
}
