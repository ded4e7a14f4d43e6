//! Category report command implementation

use crate::category::CategoryReport;
use anyhow::{Context, Result};
use std::path::Path;

/// Execute the category-report command
pub fn run_category_report_command(path: &Path, top: Option<usize>) -> Result<()> {
    let mut report = CategoryReport::from_path(path)
        .with_context(|| format!("Failed to build category report from {}", path.display()))?;
    if let Some(n) = top {
        report.truncate(n);
    }
    print!("{report}");
    Ok(())
}
