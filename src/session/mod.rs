//!
//! The ephemeral build session tree.
//!

use std::path::Path;
use std::path::PathBuf;

use colored::Colorize;
use rand::Rng;

/// The temporary directory name prefix.
pub const DIRECTORY_PREFIX: &str = "clang-builder";

/// The downloaded archives subdirectory.
pub const ARCHIVES_SUBDIRECTORY: &str = "archives";

/// The unpacked source tree subdirectory.
pub const SOURCE_SUBDIRECTORY: &str = "src";

/// The out-of-tree build subdirectory.
pub const BUILD_SUBDIRECTORY: &str = "build";

/// The repository clone subdirectory.
pub const GIT_SUBDIRECTORY: &str = "git";

///
/// The ephemeral working tree owned by a single builder run.
///
/// The tree is removed when the session is dropped, on both the normal and the error
/// exit paths, unless the operator has asked to keep it. Removal failures are reported
/// as warnings and never change the exit code.
///
#[derive(Debug)]
pub struct Session {
    /// The working tree root.
    directory: PathBuf,
    /// Whether the tree is removed on drop.
    cleanup: bool,
}

impl Session {
    ///
    /// Creates the working tree skeleton under `base`.
    ///
    pub fn new(base: &Path) -> anyhow::Result<Self> {
        let suffix: u32 = rand::thread_rng().gen();
        let directory = base.join(format!("{}-{:08x}", DIRECTORY_PREFIX, suffix));
        for subdirectory in [
            ARCHIVES_SUBDIRECTORY,
            SOURCE_SUBDIRECTORY,
            BUILD_SUBDIRECTORY,
            GIT_SUBDIRECTORY,
        ] {
            let path = directory.join(subdirectory);
            std::fs::create_dir_all(&path)
                .map_err(|error| anyhow::anyhow!("Directory {:?} creating: {}", path, error))?;
        }
        Ok(Self {
            directory,
            cleanup: true,
        })
    }

    ///
    /// Keeps the working tree on disk after the run.
    ///
    pub fn keep(&mut self) {
        self.cleanup = false;
    }

    /// The working tree root.
    pub fn directory(&self) -> &Path {
        self.directory.as_path()
    }

    /// The archive download directory.
    pub fn archives_directory(&self) -> PathBuf {
        self.directory.join(ARCHIVES_SUBDIRECTORY)
    }

    /// The unpacked source tree directory.
    pub fn source_directory(&self) -> PathBuf {
        self.directory.join(SOURCE_SUBDIRECTORY)
    }

    /// The out-of-tree build directory.
    pub fn build_directory(&self) -> PathBuf {
        self.directory.join(BUILD_SUBDIRECTORY)
    }

    /// The repository clone directory.
    pub fn git_directory(&self) -> PathBuf {
        self.directory.join(GIT_SUBDIRECTORY)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if !self.cleanup {
            return;
        }
        if let Err(error) = fs_extra::dir::remove(self.directory.as_path()) {
            eprintln!(
                "{} Temporary directory {:?} removing: {}",
                "Warning:".bright_yellow(),
                self.directory,
                error
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Session;

    #[test]
    fn skeleton_is_created() {
        let base = tempfile::tempdir().expect("Always valid");
        let session = Session::new(base.path()).expect("Always valid");

        assert!(session.archives_directory().is_dir());
        assert!(session.source_directory().is_dir());
        assert!(session.build_directory().is_dir());
        assert!(session.git_directory().is_dir());
    }

    #[test]
    fn tree_is_removed_on_drop() {
        let base = tempfile::tempdir().expect("Always valid");
        let session = Session::new(base.path()).expect("Always valid");
        let directory = session.directory().to_owned();

        drop(session);
        assert!(!directory.exists());
    }

    #[test]
    fn kept_tree_survives_the_drop() {
        let base = tempfile::tempdir().expect("Always valid");
        let mut session = Session::new(base.path()).expect("Always valid");
        let directory = session.directory().to_owned();

        session.keep();
        drop(session);
        assert!(directory.exists());
        assert!(directory.join(super::SOURCE_SUBDIRECTORY).is_dir());
    }
}
