//!
//! The Clang builder arguments.
//!

use std::path::PathBuf;

use structopt::StructOpt;

use clang_builder::build_config::toggle::Toggle;
use clang_builder::build_config::BuildConfig;
use clang_builder::error::Error;
use clang_builder::utils;

///
/// The Clang builder arguments.
///
#[derive(Debug, StructOpt)]
#[structopt(
    name = "clang-builder",
    about = "The Clang/LLVM toolchain builder",
    setting = structopt::clap::AppSettings::DisableVersion
)]
pub struct Arguments {
    /// The toolchain installation directory.
    #[structopt(short = "i", long = "install-dir")]
    pub install_directory: Option<PathBuf>,

    /// The released version, or any git reference with `--repo`.
    #[structopt(short = "v", long = "version")]
    pub version: Option<String>,

    /// Build from the git repository instead of a release archive.
    #[structopt(short = "r", long = "repo")]
    pub repository: bool,

    /// The number of parallel build jobs. Defaults to the CPU count.
    #[structopt(short = "j", long = "jobs")]
    pub jobs: Option<usize>,

    /// The CMake build type.
    #[structopt(short = "t", long = "build-type", default_value = "Release")]
    pub build_type: String,

    /// The semicolon-separated target architectures to build.
    #[structopt(long = "targets")]
    pub targets: Option<String>,

    /// The CMake generator.
    #[structopt(short = "G", long = "generator", default_value = "Ninja")]
    pub generator: String,

    /// The debug level.
    #[structopt(short = "d", long = "debug")]
    pub debug: Option<u8>,

    /// Keep the temporary working tree after the run.
    #[structopt(short = "n", long = "no-cleanup")]
    pub no_cleanup: bool,

    /// Stop right after the source acquisition, keeping the working tree.
    #[structopt(long = "fetch-only")]
    pub fetch_only: bool,

    /// Print the commit hash the reference resolves to and exit. Requires `--repo`.
    #[structopt(long = "print-commit")]
    pub print_commit: bool,

    /// Strip the binaries during the installation.
    #[structopt(long = "install-stripped")]
    pub install_stripped: bool,

    /// The GCC installation directory to take the host compiler from.
    #[structopt(long = "gcc-dir")]
    pub gcc_directory: Option<PathBuf>,

    /// The extra CMake arguments appended to the configure call.
    #[structopt(long = "extra-cmake-arguments", allow_hyphen_values = true)]
    pub extra_cmake_arguments: Option<String>,

    /// Build `flang` along with `mlir` it depends on.
    #[structopt(long = "enable-flang")]
    pub enable_flang: bool,

    /// Build `libc`.
    #[structopt(long = "enable-libc")]
    pub enable_libc: bool,

    /// Do not build `openmp`, which is on by default.
    #[structopt(long = "disable-openmp")]
    pub disable_openmp: bool,

    /// Build `libclc`.
    #[structopt(long = "enable-libclc")]
    pub enable_libclc: bool,

    /// Build `libcxx` along with `libcxxabi`.
    #[structopt(long = "enable-libcxx")]
    pub enable_libcxx: bool,

    /// Build `lldb`.
    #[structopt(long = "enable-lldb")]
    pub enable_lldb: bool,

    /// Build the LLVM test suite.
    #[structopt(long = "enable-test-suite")]
    pub enable_test_suite: bool,

    /// Build the optional subprojects via the runtimes path.
    #[structopt(long = "as-runtimes")]
    pub as_runtimes: bool,

    /// Build with RTTI support.
    #[structopt(long = "enable-rtti")]
    pub enable_rtti: bool,

    /// Build without RTTI support.
    #[structopt(long = "disable-rtti")]
    pub disable_rtti: bool,

    /// Build with exception handling support.
    #[structopt(long = "enable-eh")]
    pub enable_eh: bool,

    /// Build without exception handling support.
    #[structopt(long = "disable-eh")]
    pub disable_eh: bool,

    /// Build with assertions.
    #[structopt(long = "enable-assertions")]
    pub enable_assertions: bool,

    /// Build without assertions.
    #[structopt(long = "disable-assertions")]
    pub disable_assertions: bool,

    /// Export the ABI through the linker script.
    #[structopt(long = "enable-abi-linker-script")]
    pub enable_abi_linker_script: bool,

    /// Do not export the ABI through the linker script.
    #[structopt(long = "disable-abi-linker-script")]
    pub disable_abi_linker_script: bool,

    /// Build the shared libLLVM library.
    #[structopt(long = "enable-shared-libllvm")]
    pub enable_shared_libllvm: bool,

    /// Do not build the shared libLLVM library.
    #[structopt(long = "disable-shared-libllvm")]
    pub disable_shared_libllvm: bool,

    /// Link the C++ standard library statically.
    #[structopt(long = "static-libstdcxx")]
    pub static_libstdcxx: bool,

    /// Do not link the C++ standard library statically.
    #[structopt(long = "no-static-libstdcxx")]
    pub no_static_libstdcxx: bool,

    /// Tolerate an old host toolchain.
    #[structopt(long = "allow-old-toolchain")]
    pub allow_old_toolchain: bool,

    /// Do not tolerate an old host toolchain.
    #[structopt(long = "no-allow-old-toolchain")]
    pub no_allow_old_toolchain: bool,
}

impl Arguments {
    ///
    /// A shortcut constructor.
    ///
    /// Maps the command line errors to the usage exit code; the help request
    /// terminates successfully.
    ///
    pub fn new() -> Self {
        match Self::from_iter_safe(std::env::args()) {
            Ok(arguments) => arguments,
            Err(error) if error.kind == structopt::clap::ErrorKind::HelpDisplayed => {
                println!("{}", error.message);
                std::process::exit(clang_builder::EXIT_CODE_SUCCESS);
            }
            Err(error) => {
                println!("{}", error.message);
                std::process::exit(clang_builder::EXIT_CODE_USAGE);
            }
        }
    }

    ///
    /// Prints the usage text to the standard output.
    ///
    pub fn print_usage() {
        let mut application = Self::clap();
        let mut buffer = Vec::new();
        application
            .write_long_help(&mut buffer)
            .expect("Always valid");
        println!("{}", String::from_utf8_lossy(buffer.as_slice()));
    }

    ///
    /// Extracts the remote reference for the commit printing mode, if requested.
    ///
    /// The mode needs no installation directory, since it never touches the
    /// filesystem.
    ///
    pub fn print_commit_reference(&self) -> anyhow::Result<Option<&str>> {
        if !self.print_commit {
            return Ok(None);
        }
        if !self.repository {
            anyhow::bail!(Error::InvalidCombination(
                "--print-commit only works together with --repo".to_owned()
            ));
        }
        let reference = self
            .version
            .as_deref()
            .ok_or(Error::MissingOption("version"))?;
        Ok(Some(reference))
    }

    ///
    /// Validates the arguments and resolves them into the build configuration.
    ///
    pub fn try_into_config(self) -> anyhow::Result<BuildConfig> {
        let install_directory = self
            .install_directory
            .ok_or(Error::MissingOption("install directory"))?;
        let version = self.version.ok_or(Error::MissingOption("version"))?;

        let identifier = BuildConfig::identifier(version.as_str());
        let extra_cmake_arguments = match self.extra_cmake_arguments {
            Some(arguments) => shell_words::split(arguments.as_str())
                .map_err(|error| anyhow::anyhow!("Extra CMake arguments parsing: {}", error))?,
            None => Vec::new(),
        };

        Ok(BuildConfig {
            install_directory: utils::absolute_path(install_directory)?,
            version,
            identifier,
            from_repository: self.repository,
            jobs: self.jobs.unwrap_or_else(num_cpus::get),
            cleanup: !self.no_cleanup && !self.fetch_only,
            debug: self.debug.unwrap_or_else(BuildConfig::default_debug_level),
            build_type: self.build_type,
            generator: self.generator,
            targets: self
                .targets
                .map(|targets| {
                    targets
                        .split(';')
                        .filter(|target| !target.is_empty())
                        .map(|target| target.to_owned())
                        .collect()
                })
                .unwrap_or_default(),
            gcc_directory: self.gcc_directory,
            install_stripped: self.install_stripped || BuildConfig::default_install_stripped(),
            fetch_only: self.fetch_only,
            flang: self.enable_flang,
            libc: self.enable_libc,
            openmp: !self.disable_openmp,
            libclc: self.enable_libclc,
            libcxx: self.enable_libcxx,
            lldb: self.enable_lldb,
            test_suite: self.enable_test_suite,
            as_runtimes: self.as_runtimes,
            rtti: Toggle::from_flags(self.enable_rtti, self.disable_rtti),
            exception_handling: Toggle::from_flags(self.enable_eh, self.disable_eh),
            assertions: Toggle::from_flags(self.enable_assertions, self.disable_assertions),
            abi_linker_script: Toggle::from_flags(
                self.enable_abi_linker_script,
                self.disable_abi_linker_script,
            ),
            shared_libllvm: Toggle::from_flags(
                self.enable_shared_libllvm,
                self.disable_shared_libllvm,
            ),
            static_libstdcxx: Toggle::from_flags(self.static_libstdcxx, self.no_static_libstdcxx),
            old_toolchain: Toggle::from_flags(
                self.allow_old_toolchain,
                self.no_allow_old_toolchain,
            ),
            extra_cmake_arguments,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use structopt::StructOpt;

    use clang_builder::Toggle;

    use super::Arguments;

    fn parse(arguments: &[&str]) -> Arguments {
        Arguments::from_iter_safe(arguments.iter().copied()).expect("Always valid")
    }

    #[test]
    fn missing_version_is_reported() {
        let error = parse(&["clang-builder", "--install-dir", "/opt/clang"])
            .try_into_config()
            .expect_err("Must fail");
        assert_eq!(error.to_string(), "no version specified");
    }

    #[test]
    fn missing_install_directory_is_reported() {
        let error = parse(&["clang-builder", "--version", "14.0.0"])
            .try_into_config()
            .expect_err("Must fail");
        assert_eq!(error.to_string(), "no install directory specified");
    }

    #[test]
    fn print_commit_requires_the_repository_mode() {
        let error = parse(&["clang-builder", "-v", "main", "--print-commit"])
            .print_commit_reference()
            .expect_err("Must fail");
        assert_eq!(
            error.to_string(),
            "--print-commit only works together with --repo"
        );
    }

    #[test]
    fn print_commit_needs_no_install_directory() {
        let arguments = parse(&["clang-builder", "-v", "main", "-r", "--print-commit"]);
        let reference = arguments
            .print_commit_reference()
            .expect("Always valid")
            .expect("Always exists");
        assert_eq!(reference, "main");
    }

    #[test]
    fn toggles_are_folded() {
        let config = parse(&[
            "clang-builder",
            "-i",
            "/opt/clang",
            "-v",
            "14.0.0",
            "--enable-rtti",
            "--disable-assertions",
        ])
        .try_into_config()
        .expect("Always valid");

        assert_eq!(config.rtti, Toggle::Enabled);
        assert_eq!(config.assertions, Toggle::Disabled);
        assert_eq!(config.exception_handling, Toggle::Unset);
        assert_eq!(config.shared_libllvm, Toggle::Unset);
    }

    #[test]
    fn version_is_normalized() {
        let config = parse(&["clang-builder", "-i", "/opt/clang", "-v", "14.0.0-rc1"])
            .try_into_config()
            .expect("Always valid");

        assert_eq!(config.version, "14.0.0-rc1");
        assert_eq!(config.identifier, "14.0.0rc1");
    }

    #[test]
    fn install_directory_is_absolute() {
        let config = parse(&["clang-builder", "-i", "/opt/clang", "-v", "14.0.0"])
            .try_into_config()
            .expect("Always valid");
        assert_eq!(config.install_directory, PathBuf::from("/opt/clang"));

        let config = parse(&["clang-builder", "-i", "clang", "-v", "14.0.0"])
            .try_into_config()
            .expect("Always valid");
        assert!(config.install_directory.is_absolute());
        assert!(config.install_directory.ends_with("clang"));
    }

    #[test]
    fn fetch_only_suppresses_the_cleanup() {
        let config = parse(&[
            "clang-builder",
            "-i",
            "/opt/clang",
            "-v",
            "14.0.0",
            "--fetch-only",
        ])
        .try_into_config()
        .expect("Always valid");
        assert!(!config.cleanup);
    }

    #[test]
    fn targets_are_split() {
        let config = parse(&[
            "clang-builder",
            "-i",
            "/opt/clang",
            "-v",
            "14.0.0",
            "--targets",
            "X86;AArch64",
        ])
        .try_into_config()
        .expect("Always valid");
        assert_eq!(config.targets, vec!["X86".to_owned(), "AArch64".to_owned()]);
    }

    #[test]
    fn extra_cmake_arguments_are_split() {
        let config = parse(&[
            "clang-builder",
            "-i",
            "/opt/clang",
            "-v",
            "14.0.0",
            "--extra-cmake-arguments",
            "-DLLVM_CCACHE_BUILD=On -DLLVM_ENABLE_ZLIB='Off'",
        ])
        .try_into_config()
        .expect("Always valid");
        assert_eq!(
            config.extra_cmake_arguments,
            vec![
                "-DLLVM_CCACHE_BUILD=On".to_owned(),
                "-DLLVM_ENABLE_ZLIB=Off".to_owned()
            ]
        );
    }
}
