//!
//! The CMake build driver.
//!

use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

use crate::build_config::BuildConfig;
use crate::project_set::ProjectSet;
use crate::source::Source;
use crate::utils;

///
/// The driver state.
///
/// Each transition is gated by a successful external call; the order is enforced and
/// never rolled back.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// The build directory has not been configured yet.
    Unconfigured,
    /// The configure step has succeeded.
    Configured,
    /// The build step has succeeded.
    Built,
    /// The install step has succeeded.
    Installed,
}

///
/// The CMake configure/build/install driver.
///
#[derive(Debug)]
pub struct Driver {
    /// The out-of-tree build directory.
    build_directory: PathBuf,
    /// The current state.
    state: State,
}

impl Driver {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(build_directory: PathBuf) -> Self {
        Self {
            build_directory,
            state: State::Unconfigured,
        }
    }

    /// The current state.
    pub fn state(&self) -> State {
        self.state
    }

    ///
    /// Runs the configure step.
    ///
    pub fn configure(
        &mut self,
        config: &BuildConfig,
        project_set: &ProjectSet,
        source: &Source,
    ) -> anyhow::Result<()> {
        self.expect_state(State::Unconfigured, "configure")?;

        let mut command = Command::new("cmake");
        command.args(configure_arguments(
            config,
            project_set,
            source,
            self.build_directory.as_path(),
        ));
        if config.debug > 0 {
            utils::echo(&command);
        }
        utils::command(&mut command, "CMake configuring")?;

        self.state = State::Configured;
        Ok(())
    }

    ///
    /// Runs the build step.
    ///
    pub fn build(&mut self, config: &BuildConfig) -> anyhow::Result<()> {
        self.expect_state(State::Configured, "build")?;

        let mut command = Command::new("cmake");
        command
            .arg("--build")
            .arg(self.build_directory.as_path())
            .arg("--parallel")
            .arg(config.jobs.to_string());
        if config.debug > 0 {
            utils::echo(&command);
        }
        utils::command(&mut command, "CMake building")?;

        self.state = State::Built;
        Ok(())
    }

    ///
    /// Runs the install step, optionally stripping the installed binaries.
    ///
    pub fn install(&mut self, config: &BuildConfig) -> anyhow::Result<()> {
        self.expect_state(State::Built, "install")?;

        let target = if config.install_stripped {
            "install/strip"
        } else {
            "install"
        };
        let mut command = Command::new("cmake");
        command
            .arg("--build")
            .arg(self.build_directory.as_path())
            .arg("--target")
            .arg(target);
        if config.debug > 0 {
            utils::echo(&command);
        }
        utils::command(&mut command, "CMake installing")?;

        self.state = State::Installed;
        Ok(())
    }

    ///
    /// Enforces the state transition order.
    ///
    fn expect_state(&self, expected: State, step: &str) -> anyhow::Result<()> {
        if self.state != expected {
            anyhow::bail!(
                "The {} step is not allowed in the {:?} state",
                step,
                self.state
            );
        }
        Ok(())
    }
}

///
/// Assembles the configure step argument list.
///
/// The tri-state options are emitted only when explicitly set, the shared libLLVM
/// option is always emitted, and the empty subproject lists are omitted entirely.
///
pub fn configure_arguments(
    config: &BuildConfig,
    project_set: &ProjectSet,
    source: &Source,
    build_directory: &Path,
) -> Vec<String> {
    let mut arguments = vec![
        "-S".to_owned(),
        source.cmake_directory.to_string_lossy().to_string(),
        "-B".to_owned(),
        build_directory.to_string_lossy().to_string(),
        "-G".to_owned(),
        config.generator.clone(),
        format!(
            "-DCMAKE_INSTALL_PREFIX={}",
            config.install_directory.to_string_lossy()
        ),
        format!("-DCMAKE_BUILD_TYPE={}", config.build_type),
        "-DCMAKE_VERBOSE_MAKEFILE=On".to_owned(),
    ];

    if let Some(projects) = project_set.projects_list() {
        arguments.push(format!("-DLLVM_ENABLE_PROJECTS={}", projects));
    }
    if let Some(runtimes) = project_set.runtimes_list() {
        arguments.push(format!("-DLLVM_ENABLE_RUNTIMES={}", runtimes));
    }
    if let Some(targets) = project_set.targets_list() {
        arguments.push(format!("-DLLVM_TARGETS_TO_BUILD={}", targets));
    }

    for (option, toggle) in [
        ("LLVM_ENABLE_RTTI", config.rtti),
        ("LLVM_ENABLE_EH", config.exception_handling),
        ("LLVM_ENABLE_ASSERTIONS", config.assertions),
        ("LLVM_ABI_LINKER_SCRIPT", config.abi_linker_script),
        ("LLVM_STATIC_LINK_CXX_STDLIB", config.static_libstdcxx),
        ("LLVM_TEMPORARILY_ALLOW_OLD_TOOLCHAIN", config.old_toolchain),
    ] {
        if let Some(value) = toggle.as_cmake_value() {
            arguments.push(format!("-D{}={}", option, value));
        }
    }

    arguments.push(format!(
        "-DLLVM_BUILD_LLVM_DYLIB={}",
        config.shared_libllvm.as_cmake_value_or_off()
    ));

    if let Some(gcc_directory) = config.gcc_directory.as_deref() {
        arguments.push(format!(
            "-DCMAKE_C_COMPILER={}",
            gcc_directory.join("bin").join("gcc").to_string_lossy()
        ));
        arguments.push(format!(
            "-DCMAKE_CXX_COMPILER={}",
            gcc_directory.join("bin").join("g++").to_string_lossy()
        ));
        arguments.push(format!(
            "-DGCC_INSTALL_PREFIX={}",
            gcc_directory.to_string_lossy()
        ));
    }

    arguments.extend(config.extra_cmake_arguments.iter().cloned());

    arguments
}
