//! Repository layer for visitor storage

pub mod memory;
pub mod visitors;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::visitor::{NewVisitor, PageRequest, Sort, Visitor, VisitorFilter},
};

/// Persistent collection of visitor records.
///
/// Implementations must return plain copies; nothing handed out by `find`
/// is tied to the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitorStore: Send + Sync {
    /// Insert one record and return it with its store-assigned fields
    async fn insert(&self, visitor: &NewVisitor) -> AppResult<Visitor>;

    /// Matching records in `sort` order (insertion order when `None`), windowed by `page`
    async fn find(
        &self,
        filter: &VisitorFilter,
        sort: Option<Sort>,
        page: PageRequest,
    ) -> AppResult<Vec<Visitor>>;

    /// Number of records matching `filter`
    async fn count(&self, filter: &VisitorFilter) -> AppResult<i64>;

    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;

    /// Release the underlying connections
    async fn close(&self);
}

/// Main repository struct holding the storage handles
#[derive(Clone)]
pub struct Repository {
    pub visitors: Arc<dyn VisitorStore>,
}

impl Repository {
    pub fn new(visitors: Arc<dyn VisitorStore>) -> Self {
        Self { visitors }
    }

    /// Create a repository backed by PostgreSQL
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self::new(Arc::new(visitors::VisitorsRepository::new(pool)))
    }

    /// Create a repository backed by process memory
    pub fn in_memory() -> Self {
        Self::new(Arc::new(memory::MemoryVisitorStore::new()))
    }

    pub async fn close(&self) {
        self.visitors.close().await;
    }
}
