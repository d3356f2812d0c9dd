//!
//! The Clang builder utilities.
//!

use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

///
/// The subprocess runner.
///
/// Checks the exit status and reports the failed call with its description.
///
pub fn command(command: &mut Command, description: &str) -> anyhow::Result<()> {
    let status = command
        .status()
        .map_err(|error| anyhow::anyhow!("{} process: {}", description, error))?;
    if !status.success() {
        anyhow::bail!("{} failed", description);
    }
    Ok(())
}

///
/// The subprocess runner returning the captured `stdout`.
///
pub fn output(command: &mut Command, description: &str) -> anyhow::Result<String> {
    let output = command
        .output()
        .map_err(|error| anyhow::anyhow!("{} process: {}", description, error))?;
    if !output.status.success() {
        anyhow::bail!(
            "{} failed: {}",
            description,
            String::from_utf8_lossy(output.stderr.as_slice()).trim()
        );
    }
    Ok(String::from_utf8_lossy(output.stdout.as_slice()).to_string())
}

///
/// Checks whether the tool is callable in the current environment.
///
pub fn check_presence(name: &str) -> anyhow::Result<()> {
    let status = Command::new("which")
        .arg(name)
        .stdout(std::process::Stdio::null())
        .status()
        .map_err(|error| anyhow::anyhow!("`which {}` process: {}", name, error))?;
    if !status.success() {
        anyhow::bail!("The `{}` executable not found in ${{PATH}}", name);
    }
    Ok(())
}

///
/// Resolves the path against the current working directory.
///
/// A path is absolute iff it starts with the root separator. Relative paths are
/// prefixed with the current directory without touching the filesystem, since the
/// target may not exist yet.
///
pub fn absolute_path<P: AsRef<Path>>(path: P) -> anyhow::Result<PathBuf> {
    let path = path.as_ref();
    if path.is_absolute() {
        return Ok(path.to_owned());
    }
    let mut absolute = std::env::current_dir()
        .map_err(|error| anyhow::anyhow!("Current directory reading: {}", error))?;
    absolute.push(path);
    Ok(absolute)
}

///
/// Prints the command line before it is run.
///
pub fn echo(command: &Command) {
    println!("+ {:?}", command);
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::path::PathBuf;

    #[test]
    fn absolute_path_is_passed_through() {
        assert_eq!(
            super::absolute_path("/opt/clang").expect("Always valid"),
            PathBuf::from("/opt/clang")
        );
    }

    #[test]
    fn relative_path_is_resolved_against_the_current_directory() {
        let resolved = super::absolute_path("install").expect("Always valid");
        let current = std::env::current_dir().expect("Always valid");
        assert_eq!(resolved, current.join("install"));
        assert!(resolved.starts_with(Path::new("/")));
    }
}
