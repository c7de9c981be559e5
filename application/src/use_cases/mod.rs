//! Application use cases
//!
//! One use case per adapter operation. Each validates its arguments, calls
//! one backend port, and turns every failure into an agent-facing error.

pub mod cache_inspection;
pub mod query_cicd;
pub mod search_knowledge_base;
pub(crate) mod shared;
pub mod submit_feedback;

#[cfg(test)]
pub(crate) mod mocks;
