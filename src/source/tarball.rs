//!
//! The release archive acquisition strategy.
//!

use std::process::Command;

use crate::build_config::BuildConfig;
use crate::session::Session;
use crate::utils;

use super::Source;

/// The release download URL base.
pub const RELEASE_URL_BASE: &str = "https://github.com/llvm/llvm-project/releases/download";

///
/// The release archive file name for the version identifier.
///
pub fn archive_file_name(identifier: &str) -> String {
    format!("llvm-project-{}.src.tar.xz", identifier)
}

///
/// The release archive download URL.
///
/// The release tag keeps the original version, while the file name uses the normalized
/// identifier.
///
pub fn archive_url(version: &str, identifier: &str) -> String {
    format!(
        "{}/llvmorg-{}/{}",
        RELEASE_URL_BASE,
        version,
        archive_file_name(identifier)
    )
}

///
/// Downloads the release archive and unpacks it into the session source directory.
///
pub fn fetch(config: &BuildConfig, session: &Session) -> anyhow::Result<Source> {
    let url = archive_url(config.version.as_str(), config.identifier.as_str());
    let archive_path = session
        .archives_directory()
        .join(archive_file_name(config.identifier.as_str()));
    let source_directory = session.source_directory();

    let mut download = Command::new("wget");
    download
        .arg("-O")
        .arg(archive_path.as_path())
        .arg(url.as_str());
    if config.debug > 0 {
        utils::echo(&download);
    }
    utils::command(&mut download, "Source archive downloading")?;

    // The archive wraps the tree into a single `llvm-project-<id>.src` directory;
    // stripping the first path component lands it directly under `src`.
    let mut unpack = Command::new("tar");
    unpack
        .arg("-xf")
        .arg(archive_path.as_path())
        .arg("-C")
        .arg(source_directory.as_path())
        .arg("--strip-components=1");
    if config.debug > 0 {
        utils::echo(&unpack);
    }
    utils::command(&mut unpack, "Source archive unpacking")?;

    Ok(Source {
        cmake_directory: source_directory.join(super::CMAKE_SUBDIRECTORY),
        tree_directory: source_directory,
        archive_path: Some(archive_path),
        commit: None,
    })
}

#[cfg(test)]
mod tests {
    #[test]
    fn release_url_is_computed() {
        assert_eq!(
            super::archive_url("14.0.0", "14.0.0"),
            "https://github.com/llvm/llvm-project/releases/download/llvmorg-14.0.0/llvm-project-14.0.0.src.tar.xz"
        );
    }

    #[test]
    fn release_candidate_url_keeps_the_tag_dash() {
        assert_eq!(
            super::archive_url("14.0.0-rc1", "14.0.0rc1"),
            "https://github.com/llvm/llvm-project/releases/download/llvmorg-14.0.0-rc1/llvm-project-14.0.0rc1.src.tar.xz"
        );
    }
}
