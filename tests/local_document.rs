/*!
 * Integration test: serialize a local directory through the public API
 */

use std::fs;
use std::sync::Arc;

use clap::Parser;
use indicatif::ProgressBar;
use tempfile::tempdir;

use repotxt::config::{Args, Config, Target};
use repotxt::root;
use repotxt::scanner::Scanner;
use repotxt::writer::{Destination, TextWriter};
use repotxt::RepoTxtError;

#[test]
fn test_local_directory_to_contents_file() {
    let project = tempdir().unwrap();
    let out = tempdir().unwrap();

    fs::write(project.path().join("README.md"), "# Demo\nA tiny project.\n").unwrap();
    fs::create_dir_all(project.path().join("src/nested")).unwrap();
    fs::write(project.path().join("src/main.rs"), "fn main() {}\n").unwrap();
    fs::write(project.path().join("src/nested/data.json"), "{}\n").unwrap();
    fs::write(project.path().join("logo.png"), [0x89u8, 0x50, 0x4e, 0x47]).unwrap();
    fs::write(project.path().join("notes.tmp2"), "scratch").unwrap();

    let prompt = out.path().join("prompt.txt");
    fs::write(&prompt, "Summarize ##REPO_NAME##.").unwrap();

    let args = Args::parse_from([
        "repotxt",
        "--output-dir",
        out.path().to_str().unwrap(),
        "--instructions",
        prompt.to_str().unwrap(),
        "--ignore-patterns",
        "*.tmp2",
    ]);
    let config = Config::from_args(args, Target::Local(project.path().to_path_buf()));
    config.validate().unwrap();

    let root = root::open(&config).unwrap();
    let name = root.name().to_string();

    let scanner = Scanner::new(config.scan_options(), Arc::new(ProgressBar::hidden()));
    let snapshot = scanner.scan(root.as_ref()).unwrap();

    let instructions = config.load_instructions(&snapshot.name).unwrap();
    let destination = config.destination(&snapshot.name);
    let writer = TextWriter::new(destination.clone());
    writer.write(&instructions, &snapshot).unwrap();

    let expected_path = out.path().join(format!("{}_contents.txt", name));
    assert_eq!(destination, Destination::File(expected_path.clone()));

    let document = fs::read_to_string(expected_path).unwrap();
    let expected = format!(
        "Summarize {name}.\n\n\
         README:\n# Demo\nA tiny project.\n\n\n\
         Repository Structure: {name}\n\
         README.md\n\
         logo.png\n\
         src/\n\
         src/main.rs\n\
         src/nested/\n\
         src/nested/data.json\n\
         \n\n\
         File: logo.png\nContent: Skipped binary file\n\n\
         File: src/main.rs\nContent:\nfn main() {{}}\n\n\n\
         File: src/nested/data.json\nContent:\n{{}}\n\n\n",
        name = name
    );
    assert_eq!(document, expected);
}

#[test]
fn test_remote_target_without_token_fails_before_listing() {
    let args = Args::parse_from([
        "repotxt",
        "--github-token",
        "",
        "--api-url",
        "http://127.0.0.1:9",
        "--stdout",
    ]);
    let config = Config::from_args(args, Target::from_arg("https://github.com/octo/demo"));
    config.validate().unwrap();

    let err = root::open(&config).err().unwrap();
    assert!(matches!(err, RepoTxtError::Config(_)));
}
