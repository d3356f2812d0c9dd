//!
//! The subproject and runtime selection.
//!

use crate::build_config::BuildConfig;

///
/// The selected subprojects, runtimes, and targets.
///
/// Fully determined by the build configuration. The sequences preserve the insertion
/// order and contain no duplicates.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSet {
    /// The subprojects built as ordinary CMake projects.
    pub projects: Vec<&'static str>,
    /// The subprojects built via the runtimes bootstrapping path.
    pub runtimes: Vec<&'static str>,
    /// The target architectures.
    pub targets: Vec<String>,
}

impl ProjectSet {
    /// The subprojects included in every build.
    pub const BASE_PROJECTS: [&'static str; 5] =
        ["clang", "clang-tools-extra", "compiler-rt", "lld", "polly"];

    ///
    /// Selects the subproject set for the configuration.
    ///
    /// The optional subprojects are gathered separately and merged into either the
    /// runtimes or the ordinary projects as the last step.
    ///
    pub fn from_config(config: &BuildConfig) -> Self {
        let mut projects: Vec<&'static str> = Self::BASE_PROJECTS.to_vec();
        let mut runtimes: Vec<&'static str> = Vec::new();
        let mut optional: Vec<&'static str> = Vec::new();

        if config.flang {
            projects.push("flang");
            projects.push("mlir");
        }
        if config.lldb {
            projects.push("lldb");
        }
        if config.test_suite {
            projects.push("test-suite");
        }

        if config.libc {
            optional.push("libc");
        }
        if config.openmp {
            optional.push("openmp");
        }
        if config.libclc {
            optional.push("libclc");
        }

        if config.libcxx {
            runtimes.push("libcxx");
            runtimes.push("libcxxabi");
        }
        runtimes.push("libunwind");

        if config.as_runtimes {
            runtimes.extend(optional);
        } else {
            projects.extend(optional);
        }

        Self {
            projects,
            runtimes,
            targets: config.targets.clone(),
        }
    }

    ///
    /// Serializes the subprojects for the build system, unless empty.
    ///
    pub fn projects_list(&self) -> Option<String> {
        Self::join(self.projects.as_slice())
    }

    ///
    /// Serializes the runtimes for the build system, unless empty.
    ///
    pub fn runtimes_list(&self) -> Option<String> {
        Self::join(self.runtimes.as_slice())
    }

    ///
    /// Serializes the targets for the build system, unless empty.
    ///
    pub fn targets_list(&self) -> Option<String> {
        let targets: Vec<&str> = self.targets.iter().map(String::as_str).collect();
        Self::join(targets.as_slice())
    }

    ///
    /// Joins a sequence with the build system list separator, unless empty.
    ///
    fn join(values: &[&str]) -> Option<String> {
        if values.is_empty() {
            None
        } else {
            Some(values.join(";"))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::build_config::toggle::Toggle;
    use crate::build_config::BuildConfig;

    use super::ProjectSet;

    fn config() -> BuildConfig {
        BuildConfig {
            install_directory: PathBuf::from("/opt/clang"),
            version: "14.0.0".to_owned(),
            identifier: "14.0.0".to_owned(),
            from_repository: false,
            jobs: 1,
            cleanup: true,
            debug: 0,
            build_type: "Release".to_owned(),
            generator: "Ninja".to_owned(),
            targets: Vec::new(),
            gcc_directory: None,
            install_stripped: false,
            fetch_only: false,
            flang: false,
            libc: false,
            openmp: true,
            libclc: false,
            libcxx: false,
            lldb: false,
            test_suite: false,
            as_runtimes: false,
            rtti: Toggle::Unset,
            exception_handling: Toggle::Unset,
            assertions: Toggle::Unset,
            abi_linker_script: Toggle::Unset,
            shared_libllvm: Toggle::Unset,
            static_libstdcxx: Toggle::Unset,
            old_toolchain: Toggle::Unset,
            extra_cmake_arguments: Vec::new(),
        }
    }

    #[test]
    fn libcxx_and_lldb_selection() {
        let mut config = config();
        config.libcxx = true;
        config.lldb = true;

        let set = ProjectSet::from_config(&config);
        assert_eq!(
            set.projects,
            vec![
                "clang",
                "clang-tools-extra",
                "compiler-rt",
                "lld",
                "polly",
                "lldb",
                "openmp"
            ]
        );
        assert_eq!(set.runtimes, vec!["libcxx", "libcxxabi", "libunwind"]);
    }

    #[test]
    fn optional_subprojects_can_go_to_runtimes() {
        let mut config = config();
        config.libclc = true;
        config.as_runtimes = true;

        let set = ProjectSet::from_config(&config);
        assert_eq!(
            set.projects,
            vec!["clang", "clang-tools-extra", "compiler-rt", "lld", "polly"]
        );
        assert_eq!(set.runtimes, vec!["libunwind", "openmp", "libclc"]);
    }

    #[test]
    fn flang_brings_mlir() {
        let mut config = config();
        config.flang = true;

        let set = ProjectSet::from_config(&config);
        assert!(set.projects.contains(&"flang"));
        assert!(set.projects.contains(&"mlir"));
    }

    #[test]
    fn sequences_contain_no_duplicates() {
        let mut config = config();
        config.flang = true;
        config.libc = true;
        config.libclc = true;
        config.libcxx = true;
        config.lldb = true;
        config.test_suite = true;

        let set = ProjectSet::from_config(&config);
        for sequence in [set.projects.as_slice(), set.runtimes.as_slice()] {
            let mut deduplicated = sequence.to_vec();
            deduplicated.sort_unstable();
            deduplicated.dedup();
            assert_eq!(deduplicated.len(), sequence.len());
        }
    }

    #[test]
    fn empty_sequence_is_omitted() {
        let set = ProjectSet {
            projects: Vec::new(),
            runtimes: Vec::new(),
            targets: Vec::new(),
        };
        assert_eq!(set.projects_list(), None);
        assert_eq!(set.runtimes_list(), None);
        assert_eq!(set.targets_list(), None);
    }

    #[test]
    fn serialization_preserves_the_insertion_order() {
        let mut config = config();
        config.targets = vec!["X86".to_owned(), "AArch64".to_owned()];

        let set = ProjectSet::from_config(&config);
        assert_eq!(
            set.projects_list().expect("Always exists"),
            "clang;clang-tools-extra;compiler-rt;lld;polly;openmp"
        );
        assert_eq!(set.targets_list().expect("Always exists"), "X86;AArch64");
    }
}
