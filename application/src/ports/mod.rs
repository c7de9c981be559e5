//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod backend;
pub mod nl2sql_service;
pub mod retrieval_service;
pub mod tool_executor;
pub mod tool_schema;
