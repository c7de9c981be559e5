//! Tool providers exposed to the hosting protocol server
//!
//! ## Providers
//!
//! Tools are organized into providers, one per backend:
//! - `retrieval`: knowledge base search and feedback
//! - `cicd`: the two-phase CI/CD query tools and cache introspection
//!
//! The [`ToolRegistry`] merges them into a single tool surface.

pub mod cicd;
pub mod retrieval;

mod registry;
mod schema;

pub use cicd::CicdToolProvider;
pub use registry::{RegistryStats, ToolRegistry};
pub use retrieval::RetrievalToolProvider;
pub use schema::JsonSchemaToolConverter;
