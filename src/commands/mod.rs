//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and the loaded configuration.

pub mod apply;
pub mod config;
pub mod show;

// Re-export execute functions for convenience
pub use apply::execute as apply;
pub use config::execute as config;
pub use show::execute as show;

use crate::collection::{FileCollection, paths_from_args};
use crate::report::ErrorReporter;

/// Build a collection from command-line file arguments.
///
/// Paths that cannot be added are reported as one aggregated message; the rest of
/// the collection is still returned.
pub(crate) fn collect_files(
    files: &[String],
    reporter: &ErrorReporter,
    surface_errors: bool,
) -> FileCollection {
    let own_exe = std::env::current_exe().ok();
    let paths = paths_from_args(files, own_exe.as_deref());

    let mut collection = FileCollection::new();
    let report = collection.add_many(&paths);
    if let Some(failure) = report.failure() {
        reporter.report(failure, surface_errors);
    }
    collection
}
