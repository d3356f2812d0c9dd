//!
//! The git repository acquisition strategy.
//!

use std::process::Command;

use crate::build_config::BuildConfig;
use crate::session::Session;
use crate::utils;

use super::Source;

/// The upstream monorepo URL.
pub const REPOSITORY_URL: &str = "https://github.com/llvm/llvm-project.git";

///
/// Clones the monorepo and checks out the requested reference.
///
/// The reference may be a branch, a tag, or a commit hash; all of them are valid
/// checkout arguments.
///
pub fn checkout(config: &BuildConfig, session: &Session) -> anyhow::Result<Source> {
    let git_directory = session.git_directory();

    let mut clone = Command::new("git");
    clone
        .arg("clone")
        .arg("--progress")
        .arg(REPOSITORY_URL)
        .arg(git_directory.as_path());
    if config.debug > 0 {
        utils::echo(&clone);
    }
    utils::command(&mut clone, "Repository cloning")?;

    utils::command(
        Command::new("git")
            .arg("-C")
            .arg(git_directory.as_path())
            .arg("checkout")
            .arg(config.version.as_str()),
        "Reference checkout",
    )?;

    let commit = utils::output(
        Command::new("git")
            .arg("-C")
            .arg(git_directory.as_path())
            .args(["rev-parse", "HEAD"]),
        "Commit resolving",
    )?
    .trim()
    .to_owned();

    let summary = utils::output(
        Command::new("git")
            .arg("-C")
            .arg(git_directory.as_path())
            .args(["log", "-1", "--oneline"]),
        "Commit describing",
    )?;
    println!("Checked out {}", summary.trim());

    Ok(Source {
        cmake_directory: git_directory.join(super::CMAKE_SUBDIRECTORY),
        tree_directory: git_directory,
        archive_path: None,
        commit: Some(commit),
    })
}

///
/// Resolves the remote reference to a commit hash without touching the filesystem.
///
pub fn resolve_remote_commit(reference: &str) -> anyhow::Result<String> {
    let listing = utils::output(
        Command::new("git").args(["ls-remote", REPOSITORY_URL, reference]),
        "Remote reference listing",
    )?;
    let commit = listing
        .split_whitespace()
        .next()
        .ok_or_else(|| {
            anyhow::anyhow!("Reference `{}` not found in {}", reference, REPOSITORY_URL)
        })?;
    Ok(commit.to_owned())
}
