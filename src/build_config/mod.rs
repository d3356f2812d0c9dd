//!
//! The resolved build configuration.
//!

pub mod toggle;

use std::path::PathBuf;

use self::toggle::Toggle;

/// The environment variable overriding the default debug level.
pub const DEBUG_LEVEL_VARIABLE: &str = "CLANG_BUILDER_DEBUG";

/// The environment variable overriding the default stripped installation flag.
pub const INSTALL_STRIPPED_VARIABLE: &str = "CLANG_BUILDER_INSTALL_STRIPPED";

///
/// The resolved build configuration.
///
/// Built once by the option resolver and never mutated afterwards. The installation
/// directory is always absolute, and the version is never empty.
///
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// The absolute toolchain installation directory.
    pub install_directory: PathBuf,
    /// The version: a release tag, or any git reference in the repository mode.
    pub version: String,
    /// The version identifier used in the release archive name.
    pub identifier: String,
    /// Whether to build from the git repository instead of a release archive.
    pub from_repository: bool,
    /// The number of parallel build jobs.
    pub jobs: usize,
    /// Whether to remove the temporary working tree at the end of the run.
    pub cleanup: bool,
    /// The debug level.
    pub debug: u8,
    /// The CMake build type.
    pub build_type: String,
    /// The CMake generator.
    pub generator: String,
    /// The target architectures, empty meaning the build system default.
    pub targets: Vec<String>,
    /// The GCC installation directory the host compiler is taken from.
    pub gcc_directory: Option<PathBuf>,
    /// Whether to strip the binaries during the installation.
    pub install_stripped: bool,
    /// Whether to stop right after the source acquisition.
    pub fetch_only: bool,

    /// Whether to build `flang` and `mlir`.
    pub flang: bool,
    /// Whether to build `libc`.
    pub libc: bool,
    /// Whether to build `openmp`.
    pub openmp: bool,
    /// Whether to build `libclc`.
    pub libclc: bool,
    /// Whether to build `libcxx` and `libcxxabi`.
    pub libcxx: bool,
    /// Whether to build `lldb`.
    pub lldb: bool,
    /// Whether to build the test suite.
    pub test_suite: bool,
    /// Whether the optional projects are built via the runtimes path.
    pub as_runtimes: bool,

    /// The RTTI toggle.
    pub rtti: Toggle,
    /// The exception handling toggle.
    pub exception_handling: Toggle,
    /// The assertions toggle.
    pub assertions: Toggle,
    /// The ABI linker script toggle.
    pub abi_linker_script: Toggle,
    /// The shared libLLVM toggle.
    pub shared_libllvm: Toggle,
    /// The static C++ standard library linking toggle.
    pub static_libstdcxx: Toggle,
    /// The old host toolchain tolerance toggle.
    pub old_toolchain: Toggle,

    /// The extra CMake arguments appended to the configure call.
    pub extra_cmake_arguments: Vec<String>,
}

impl BuildConfig {
    ///
    /// Normalizes the version into the release archive identifier.
    ///
    /// Release candidate versions lose the dash (`14.0.0-rc1` becomes `14.0.0rc1`),
    /// matching the upstream archive naming. All other versions pass through
    /// unchanged.
    ///
    pub fn identifier(version: &str) -> String {
        let pattern = regex::Regex::new(r"^(.*)-rc(\d+)$").expect("Always valid");
        pattern.replace(version, "${1}rc${2}").to_string()
    }

    ///
    /// The debug level default taken from the environment.
    ///
    pub fn default_debug_level() -> u8 {
        std::env::var(DEBUG_LEVEL_VARIABLE)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(0)
    }

    ///
    /// The stripped installation default taken from the environment.
    ///
    pub fn default_install_stripped() -> bool {
        std::env::var(INSTALL_STRIPPED_VARIABLE)
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::BuildConfig;

    #[test]
    fn release_candidate_version_is_normalized() {
        assert_eq!(BuildConfig::identifier("14.0.0-rc1"), "14.0.0rc1");
        assert_eq!(BuildConfig::identifier("15.0.7-rc12"), "15.0.7rc12");
    }

    #[test]
    fn ordinary_version_is_passed_through() {
        assert_eq!(BuildConfig::identifier("14.0.0"), "14.0.0");
        assert_eq!(BuildConfig::identifier("main"), "main");
        assert_eq!(BuildConfig::identifier("release/14.x"), "release/14.x");
    }

    #[test]
    fn only_the_suffix_is_rewritten() {
        assert_eq!(BuildConfig::identifier("14.0.0-rc"), "14.0.0-rc");
        assert_eq!(BuildConfig::identifier("14.0.0-rc1-rc2"), "14.0.0-rc1rc2");
    }
}
