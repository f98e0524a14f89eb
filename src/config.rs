/*!
 * Configuration handling for repotxt
 */

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use secrecy::SecretString;
use tracing::info;

use crate::classify::BinaryExtensions;
use crate::error::{RepoTxtError, Result};
use crate::root::{is_github_url, GitHubRepo, DEFAULT_API_URL};
use crate::scanner::ScanOptions;
use crate::writer::Destination;
use crate::{bail, ensure, error};

/// Instructions file looked up in the working directory when none is given
pub const DEFAULT_INSTRUCTIONS_FILE: &str = "instructions-prompt.txt";

/// Placeholder in the instructions replaced by the root name
pub const REPO_NAME_PLACEHOLDER: &str = "##REPO_NAME##";

/// Built-in preamble used when no instructions file is available
pub const DEFAULT_INSTRUCTIONS: &str = "Prompt: Analyze the ##REPO_NAME## repository to understand its structure, purpose, and functionality. Follow these steps to study the codebase:

1. Read the README file to gain an overview of the project, its goals, and any setup instructions.

2. Examine the repository structure to understand how the files and directories are organized.

3. Identify the main entry point of the application (e.g., main.py, app.py, index.js) and start analyzing the code flow from there.

4. Study the dependencies and libraries used in the project to understand the external tools and frameworks being utilized.

5. Analyze the core functionality of the project by examining the key modules, classes, and functions.

6. Look for any configuration files (e.g., config.py, .env) to understand how the project is configured and what settings are available.

7. Investigate any tests or test directories to see how the project ensures code quality and handles different scenarios.

8. Review any documentation or inline comments to gather insights into the codebase and its intended behavior.

9. Identify any potential areas for improvement, optimization, or further exploration based on your analysis.

10. Provide a summary of your findings, including the project's purpose, key features, and any notable observations or recommendations.

Use the files and contents provided below to complete this analysis:

";

/// Command-line arguments for repotxt
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "repotxt",
    version = env!("CARGO_PKG_VERSION"),
    about = "Flatten a directory or GitHub repository into one text document",
    long_about = "Concatenates an instructions preamble, the README, the directory structure and every file's contents into a single text document, ready to hand to a Large Language Model."
)]
pub struct Args {
    /// Local directory or GitHub repository URL (prompts for a URL when omitted)
    pub target: Option<String>,

    /// Directory the `<name>_contents.txt` file is written to
    #[clap(long, env = "OUTPUT_DIR")]
    pub output_dir: Option<String>,

    /// Instructions file; `##REPO_NAME##` is replaced by the repository name
    #[clap(long)]
    pub instructions: Option<String>,

    /// Comma-separated list of glob patterns to ignore (matched on names)
    #[clap(long, value_delimiter = ',')]
    pub ignore_patterns: Vec<String>,

    /// Comma-separated list of extra name suffixes treated as binary
    #[clap(long, value_delimiter = ',')]
    pub binary_extensions: Vec<String>,

    /// GitHub personal access token
    #[clap(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub API base URL
    #[clap(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Print the document to stdout instead of writing a file
    #[clap(long)]
    pub stdout: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// What is being serialized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Directory on the local filesystem
    Local(PathBuf),
    /// Repository on GitHub
    Remote(GitHubRepo),
}

impl Target {
    /// Interpret a command-line argument: GitHub URLs are remote, anything else is a path
    pub fn from_arg(arg: &str) -> Self {
        if is_github_url(arg) {
            if let Ok(repo) = arg.parse() {
                return Target::Remote(repo);
            }
        }
        Target::Local(PathBuf::from(arg))
    }

    /// Interpret a prompt answer: a URL or `owner/repo`
    pub fn from_prompt(answer: &str) -> Result<Self> {
        Ok(Target::Remote(answer.parse()?))
    }
}

/// Application configuration
#[derive(Debug)]
pub struct Config {
    /// What to serialize
    pub target: Target,

    /// Directory the output file is written to
    pub output_dir: PathBuf,

    /// Explicitly requested instructions file
    pub instructions_path: Option<PathBuf>,

    /// Patterns to ignore
    pub ignore_patterns: Vec<String>,

    /// Binary extension table
    pub binary_extensions: BinaryExtensions,

    /// GitHub credential
    pub github_token: Option<SecretString>,

    /// GitHub API base URL
    pub api_url: String,

    /// Print to stdout instead of writing a file
    pub stdout: bool,
}

impl Config {
    /// Create configuration from command-line arguments and a resolved target
    pub fn from_args(args: Args, target: Target) -> Self {
        let output_dir = match args.output_dir.as_deref() {
            None | Some("") | Some("DEFAULT") => PathBuf::from("."),
            Some(dir) => PathBuf::from(dir),
        };

        let mut binary_extensions = BinaryExtensions::default();
        binary_extensions.extend(args.binary_extensions.into_iter().map(|s| s.trim().to_string()));

        Self {
            target,
            output_dir,
            instructions_path: args.instructions.map(PathBuf::from),
            ignore_patterns: args.ignore_patterns,
            binary_extensions,
            github_token: args
                .github_token
                .filter(|t| !t.trim().is_empty())
                .map(SecretString::from),
            api_url: args.api_url,
            stdout: args.stdout,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Target::Local(path) = &self.target {
            ensure!(
                path.is_dir(),
                PathNotFound,
                "Target directory not found: {}",
                path.display()
            );
        }

        if !self.stdout {
            ensure!(
                self.output_dir.is_dir(),
                Config,
                "Output directory not found: {}",
                self.output_dir.display()
            );
        }

        if let Some(path) = &self.instructions_path {
            ensure!(
                path.is_file(),
                Config,
                "Instructions file not found: {}",
                path.display()
            );
        }

        if self.ignore_patterns.iter().any(|p| p.trim().is_empty()) {
            bail!(Config, "Ignore patterns must not be empty");
        }

        Ok(())
    }

    /// Options handed to the scanner
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            binary_extensions: self.binary_extensions.clone(),
            ignore_patterns: self.ignore_patterns.clone(),
        }
    }

    /// Where the document for a root named `name` goes
    ///
    /// Path separators in `name` are replaced so the file always lands in
    /// the output directory.
    pub fn destination(&self, name: &str) -> Destination {
        if self.stdout {
            Destination::Stdout
        } else {
            let stem = name.replace(['/', '\\'], "_");
            Destination::File(self.output_dir.join(format!("{}_contents.txt", stem)))
        }
    }

    /// Load the instructions preamble for a root named `name`
    ///
    /// Without an explicit file, [`DEFAULT_INSTRUCTIONS_FILE`] is used when
    /// present; otherwise the built-in [`DEFAULT_INSTRUCTIONS`].
    pub fn load_instructions(&self, name: &str) -> Result<String> {
        self.load_instructions_with(name, Path::new(DEFAULT_INSTRUCTIONS_FILE))
    }

    fn load_instructions_with(&self, name: &str, fallback_file: &Path) -> Result<String> {
        let path = match &self.instructions_path {
            Some(path) => path.as_path(),
            None if fallback_file.is_file() => fallback_file,
            None => {
                info!(
                    "{} not found, using built-in instructions",
                    fallback_file.display()
                );
                return Ok(default_instructions(name));
            }
        };

        read_instructions(path, name)
    }
}

/// Built-in preamble with the repository name filled in
pub fn default_instructions(name: &str) -> String {
    DEFAULT_INSTRUCTIONS.replace(REPO_NAME_PLACEHOLDER, name)
}

/// Read an instructions file and substitute the repository name
pub fn read_instructions(path: &Path, name: &str) -> Result<String> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => error!(Config, "Instructions file not found: {}", path.display()),
        _ => RepoTxtError::Io(e),
    })?;
    Ok(text.replace(REPO_NAME_PLACEHOLDER, name))
}
