//! Cache Inspection use case.
//!
//! Read-only views of the NL2SQL backend's query cache.

use crate::ports::nl2sql_service::Nl2SqlService;
use crate::use_cases::shared::{CACHE_LIST, CACHE_STATS, translate};
use kbsearch_domain::cicd::{CacheReport, QueryFailure};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct CacheInspectionUseCase {
    service: Arc<dyn Nl2SqlService>,
    default_limit: i64,
    rich_ui: bool,
}

impl CacheInspectionUseCase {
    pub fn new(service: Arc<dyn Nl2SqlService>) -> Self {
        Self {
            service,
            default_limit: 50,
            rich_ui: false,
        }
    }

    pub fn with_default_limit(mut self, limit: i64) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn with_rich_ui(mut self, enabled: bool) -> Self {
        self.rich_ui = enabled;
        self
    }

    pub async fn stats(&self) -> CacheReport {
        match self.service.cache_stats().await {
            Ok(body) => {
                debug!("Fetched cache stats");
                CacheReport::stats(body, self.rich_ui)
            }
            Err(e) => {
                warn!(error = %e, "Cache stats request failed");
                CacheReport::Error(QueryFailure::from(translate(&e, CACHE_STATS)))
            }
        }
    }

    /// List cache entries. The limit is passed to the backend unvalidated.
    pub async fn list(&self, limit: Option<i64>) -> CacheReport {
        let limit = limit.unwrap_or(self.default_limit);
        match self.service.cache_list(limit).await {
            Ok(body) => {
                debug!(limit, "Fetched cache list");
                CacheReport::list(body, self.rich_ui)
            }
            Err(e) => {
                warn!(error = %e, limit, "Cache list request failed");
                CacheReport::Error(QueryFailure::from(translate(&e, CACHE_LIST)))
            }
        }
    }
}
