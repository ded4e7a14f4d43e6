//! # relgraph
//!
//! Structural statistics over directed graphs stored as tab-separated
//! relation records: per-node in-degree and out-degree with global summary
//! statistics, and the frequency distribution of a categorical column.
//!
//! ## Usage
//!
//! ```bash
//! relgraph degree <INPUT> <OUTPUT> [-r reducers] [--summary merged|per-partition]
//! relgraph category <INPUT> <OUTPUT> [--column N]
//! relgraph histogram <OUTPUT>
//! relgraph category-report <OUTPUT> [--top N]
//! ```
//!
//! ## Modules
//!
//! - `app` - Logging setup and fatal error reporting for the binary
//! - `category` - Category frequency job and its ranked report
//! - `cli` - Argument parsing and command handlers
//! - `config` - TOML and environment configuration
//! - `degree` - Degree job: records, emitter, aggregator, statistics
//! - `engine` - Local map, shuffle and reduce execution
//! - `histogram` - Text histograms of degree output
//! - `output` - Job output directory layout
pub mod app;
pub mod category;
pub mod cli;
pub mod config;
pub mod degree;
pub mod engine;
pub mod error;
pub mod histogram;
pub mod output;

pub use error::{DecodeError, Error, Result};
