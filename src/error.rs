//!
//! The command line usage error.
//!

///
/// The command line usage error.
///
/// Reported together with the usage text and the dedicated exit code, unlike the
/// fatal pipeline errors which terminate the process with the generic failure code.
///
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A mandatory option has not been provided.
    #[error("no {0} specified")]
    MissingOption(&'static str),
    /// An option has been used outside of its valid combination.
    #[error("{0}")]
    InvalidCombination(String),
}
