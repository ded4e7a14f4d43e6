//! Command implementation modules
//!
//! Each command is implemented as a separate module.

pub mod category;
pub mod category_report;
pub mod degree;
pub mod histogram;

// Re-export command execution functions
pub use category::run_category_command;
pub use category_report::run_category_report_command;
pub use degree::run_degree_command;
pub use histogram::run_histogram_command;
