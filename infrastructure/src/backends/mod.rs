//! HTTP adapters for the external backends
//!
//! | Adapter | Port | Endpoints |
//! |---------|------|-----------|
//! | [`HttpRetrievalBackend`] | `RetrievalService` | search, feedback |
//! | [`HttpNl2SqlBackend`] | `Nl2SqlService` | prepare, execute, `/cache/stats`, `/cache/list` |

pub mod http;
mod nl2sql;
mod retrieval;

pub use http::{ClientBuildError, JsonClient};
pub use nl2sql::HttpNl2SqlBackend;
pub use retrieval::HttpRetrievalBackend;
