//! Application configuration
//!
//! Process-wide settings that are not part of any job.

/// Environment variable holding a full tracing filter directive.
pub const LOG_ENV: &str = "RELGRAPH_LOG";

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Filter directive that replaces the verbosity-derived one
    pub log_filter: Option<String>,
}

impl AppConfig {
    pub fn new(verbose: u8) -> Self {
        Self {
            verbose,
            log_filter: std::env::var(LOG_ENV).ok().filter(|f| !f.trim().is_empty()),
        }
    }

    /// Get the log filter based on verbosity, unless overridden
    pub fn log_level(&self) -> String {
        if let Some(filter) = &self.log_filter {
            return filter.clone();
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
        .to_string()
    }
}
