//!
//! The Clang/LLVM toolchain builder library.
//!

pub mod build_config;
pub mod cmake;
pub mod error;
pub mod project_set;
pub mod reporter;
pub mod session;
pub mod source;
pub mod utils;

pub use self::build_config::toggle::Toggle;
pub use self::build_config::BuildConfig;
pub use self::cmake::Driver;
pub use self::error::Error;
pub use self::project_set::ProjectSet;
pub use self::reporter::stage::Stage;
pub use self::reporter::Reporter;
pub use self::session::Session;
pub use self::source::Source;

/// The process exit code of a successfully finished run.
pub const EXIT_CODE_SUCCESS: i32 = 0;

/// The process exit code of a fatally failed run.
pub const EXIT_CODE_FAILURE: i32 = 1;

/// The process exit code of a command line usage error.
pub const EXIT_CODE_USAGE: i32 = 2;
