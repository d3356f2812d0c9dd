//!
//! The toolchain source acquisition.
//!

pub mod repository;
pub mod tarball;

use std::path::Path;
use std::path::PathBuf;

use crate::build_config::BuildConfig;
use crate::session::Session;

/// The monorepo subdirectory handed to the build system.
pub const CMAKE_SUBDIRECTORY: &str = "llvm";

/// The commit marker file written into the install tree in the repository mode.
pub const COMMIT_MARKER_FILE_NAME: &str = ".version";

///
/// The acquired source tree location.
///
/// Immutable once the acquisition has finished.
///
#[derive(Debug)]
pub struct Source {
    /// The source tree root.
    pub tree_directory: PathBuf,
    /// The subdirectory passed to the build system.
    pub cmake_directory: PathBuf,
    /// The downloaded archive, in the release archive mode.
    pub archive_path: Option<PathBuf>,
    /// The resolved commit hash, in the repository mode.
    pub commit: Option<String>,
}

impl Source {
    ///
    /// Acquires the source tree with the strategy selected by the configuration.
    ///
    pub fn acquire(config: &BuildConfig, session: &Session) -> anyhow::Result<Self> {
        if config.from_repository {
            repository::checkout(config, session)
        } else {
            tarball::fetch(config, session)
        }
    }

    ///
    /// Writes the single-line commit marker into the install tree root.
    ///
    /// Only meaningful in the repository mode, where the commit has been resolved.
    ///
    pub fn write_commit_marker(&self, install_directory: &Path) -> anyhow::Result<()> {
        let commit = match self.commit.as_deref() {
            Some(commit) => commit,
            None => return Ok(()),
        };
        let path = install_directory.join(COMMIT_MARKER_FILE_NAME);
        std::fs::write(path.as_path(), format!("{}\n", commit))
            .map_err(|error| anyhow::anyhow!("File {:?} writing: {}", path, error))
    }
}
