//! Error handling utilities

use tracing::error;

/// Report a fatal error and exit with its status code.
///
/// Errors from the library carry their own exit code; anything else exits
/// with 1. With `verbose >= 1` the full context chain is printed.
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {:#}", error);
    eprintln!("Error: {error:#}");

    if verbose >= 1 {
        eprintln!("\nError chain:");
        for (i, cause) in error.chain().enumerate() {
            eprintln!("  {}: {}", i, cause);
        }
    }

    std::process::exit(exit_code(&error))
}

/// Exit code for an error, looking through context layers.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<crate::error::Error>())
        .map(|e| e.exit_code())
        .unwrap_or(1)
}
