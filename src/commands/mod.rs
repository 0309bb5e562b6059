//! CLI command implementations.
//!
//! - **analyze**: score a file or directory tree and write a report
//! - **init**: write a default `.qualmap.toml`

pub mod analyze;
pub mod init;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use init::init_config;
