//! In-process visitor store for tests and local development

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    models::visitor::{NewVisitor, PageRequest, Sort, Visitor, VisitorFilter},
};

use super::VisitorStore;

#[derive(Default)]
struct State {
    next_id: i64,
    rows: Vec<Visitor>,
}

/// Visitor store kept in insertion order behind an async lock
#[derive(Default)]
pub struct MemoryVisitorStore {
    state: RwLock<State>,
}

impl MemoryVisitorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VisitorStore for MemoryVisitorStore {
    async fn insert(&self, visitor: &NewVisitor) -> AppResult<Visitor> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let now = Utc::now();

        let row = Visitor {
            id: state.next_id,
            name: visitor.name.clone(),
            contact_no: visitor.contact_no,
            block: visitor.block.clone(),
            room_no: visitor.room_no,
            date: visitor.date.clone(),
            time: visitor.time.clone(),
            purpose: visitor.purpose.clone(),
            created_at: now,
            updated_at: now,
        };
        state.rows.push(row.clone());
        Ok(row)
    }

    async fn find(
        &self,
        filter: &VisitorFilter,
        sort: Option<Sort>,
        page: PageRequest,
    ) -> AppResult<Vec<Visitor>> {
        let state = self.state.read().await;
        let mut rows: Vec<Visitor> = state
            .rows
            .iter()
            .filter(|v| filter.matches(v))
            .cloned()
            .collect();

        // Stable sort keeps insertion order between equal keys
        if let Some(sort) = sort {
            rows.sort_by(|a, b| sort.compare(a, b));
        }

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);
        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self, filter: &VisitorFilter) -> AppResult<i64> {
        let state = self.state.read().await;
        let total = state.rows.iter().filter(|v| filter.matches(v)).count();
        Ok(total as i64)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn close(&self) {}
}
