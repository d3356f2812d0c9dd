//!
//! The Clang/LLVM toolchain builder binary.
//!

pub mod arguments;

use colored::Colorize;

use self::arguments::Arguments;

///
/// The application entry point.
///
fn main() {
    std::process::exit(match main_inner() {
        Ok(()) => clang_builder::EXIT_CODE_SUCCESS,
        Err(error) if error.downcast_ref::<clang_builder::Error>().is_some() => {
            println!("{} {}", "Error:".bright_red().bold(), error);
            Arguments::print_usage();
            clang_builder::EXIT_CODE_USAGE
        }
        Err(error) => {
            eprintln!("{} {}", "Error:".bright_red().bold(), error);
            clang_builder::EXIT_CODE_FAILURE
        }
    })
}

///
/// The auxiliary `main` function to facilitate the `?` error conversion operator.
///
fn main_inner() -> anyhow::Result<()> {
    let arguments = Arguments::new();

    if let Some(reference) = arguments.print_commit_reference()? {
        let commit = clang_builder::source::repository::resolve_remote_commit(reference)?;
        println!("{}", commit);
        return Ok(());
    }

    let config = arguments.try_into_config()?;

    clang_builder::utils::check_presence("cmake")?;
    if config.from_repository {
        clang_builder::utils::check_presence("git")?;
    } else {
        clang_builder::utils::check_presence("wget")?;
        clang_builder::utils::check_presence("tar")?;
    }

    let mut reporter = clang_builder::Reporter::new();
    reporter.section("Configuration");
    println!(
        "Building {} {} into {:?}",
        if config.from_repository {
            "reference"
        } else {
            "version"
        },
        config.version,
        config.install_directory
    );

    let mut session = clang_builder::Session::new(std::env::temp_dir().as_path())?;
    if !config.cleanup {
        session.keep();
    }
    if config.debug > 0 {
        println!("Working tree: {:?}", session.directory());
    }

    reporter.section("Source");
    reporter.enter(clang_builder::Stage::Download);
    let source = clang_builder::Source::acquire(&config, &session)?;

    if config.fetch_only {
        println!("The source tree is left at {:?}", source.tree_directory);
        reporter.summary();
        return Ok(());
    }

    let project_set = clang_builder::ProjectSet::from_config(&config);
    let mut driver = clang_builder::Driver::new(session.build_directory());

    reporter.section("Configure");
    reporter.enter(clang_builder::Stage::Configure);
    driver.configure(&config, &project_set, &source)?;

    reporter.section("Build");
    reporter.enter(clang_builder::Stage::Build);
    driver.build(&config)?;

    reporter.section("Install");
    reporter.enter(clang_builder::Stage::Install);
    driver.install(&config)?;

    source.write_commit_marker(config.install_directory.as_path())?;

    reporter.summary();

    Ok(())
}
