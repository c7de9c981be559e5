//! Infrastructure layer for kbsearch-mcp
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP backends, tool providers, and
//! configuration file loading.

pub mod backends;
pub mod config;
pub mod tools;

// Re-export commonly used types
pub use backends::{ClientBuildError, HttpNl2SqlBackend, HttpRetrievalBackend, JsonClient};
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use tools::{CicdToolProvider, JsonSchemaToolConverter, RetrievalToolProvider, ToolRegistry};
