//! CI/CD data queries over the NL2SQL backend
//!
//! - [`protocol`]: request/response bodies and the parsed [`BackendStatus`]
//! - [`rows`]: classification of result rows into a [`ResultSet`]
//! - [`summary`]: aggregate counts and rates
//! - [`format`]: text rendering for the agent
//! - [`response`]: the [`QueryResponse`] payload returned by both phases
//! - [`ui`]: optional rich-UI component tree
//! - [`cache`]: cache introspection

pub mod cache;
pub mod format;
pub mod protocol;
pub mod response;
pub mod rows;
pub mod summary;
pub mod ui;

pub use cache::{CacheEntry, CacheList, CacheReport, CacheSnapshot, CacheStats, TopQuery};
pub use format::{NO_RESULTS, format_results};
pub use protocol::{BackendStatus, ExecuteRequest, ExecuteResponse, PrepareRequest, PrepareResponse, Row};
pub use response::{ActionRequired, QueryFailure, QueryResponse, QuerySuccess};
pub use rows::{DeploymentRow, ResultKind, ResultSet, TestRow};
pub use summary::{DeploymentSummary, GenericSummary, ResultSummary, TestSummary};
pub use ui::{UiComponent, Variant};
