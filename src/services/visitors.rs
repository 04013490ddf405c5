//! Visitor query engine: filtered, sorted and paginated reads over the visitor log

use crate::{
    config::VisitorsConfig,
    error::{AppError, AppResult},
    models::visitor::{
        is_valid_date, normalize_block, NewVisitor, PageRequest, Sort, SortField, SortOrder,
        SubmitVisitor, Visitor, VisitorFilter, VisitorListQuery, VisitorPage,
        DATE_FORMAT_MESSAGE,
    },
    repository::Repository,
};

/// Default page size for most listings
pub const DEFAULT_LIMIT: i64 = 20;
/// Default page size for time-range listings
pub const DEFAULT_TIME_RANGE_LIMIT: i64 = 30;

#[derive(Clone)]
pub struct VisitorsService {
    repository: Repository,
    max_limit: i64,
}

impl VisitorsService {
    pub fn new(repository: Repository, config: VisitorsConfig) -> Self {
        Self {
            repository,
            max_limit: config.max_limit.max(1),
        }
    }

    /// Validate and store a new visitor
    pub async fn submit(&self, data: SubmitVisitor) -> AppResult<Visitor> {
        let visitor = NewVisitor::try_from(data)?;

        let created = self
            .repository
            .visitors
            .insert(&visitor)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    operation = "submit",
                    block = %visitor.block,
                    room_no = visitor.room_no,
                    date = %visitor.date,
                    "Storage failure: {}",
                    e
                )
            })?;

        tracing::info!(id = created.id, block = %created.block, room_no = created.room_no, "Visitor submitted");
        Ok(created)
    }

    /// Every visitor
    pub async fn list_all(&self, query: &VisitorListQuery) -> AppResult<VisitorPage> {
        let (sort, page) = self.resolve(query, DEFAULT_LIMIT)?;
        self.fetch("list_all", VisitorFilter::default(), sort, page, "No visitors found")
            .await
    }

    /// Visitors on one date (DD-MM-YYYY)
    pub async fn list_by_date(&self, date: &str, query: &VisitorListQuery) -> AppResult<VisitorPage> {
        let date = require_date(date)?;
        let (sort, page) = self.resolve(query, DEFAULT_LIMIT)?;
        let filter = VisitorFilter {
            date: Some(date),
            ..Default::default()
        };
        self.fetch("list_by_date", filter, sort, page, "No visitors found for this date")
            .await
    }

    /// Visitors on one date whose time lies in `[from, to]`, compared as strings
    pub async fn list_by_time_range(
        &self,
        date: &str,
        from: &str,
        to: &str,
        query: &VisitorListQuery,
    ) -> AppResult<VisitorPage> {
        let date = require_date(date)?;
        let from = require(from, "Start time is required")?;
        let to = require(to, "End time is required")?;
        let (sort, page) = self.resolve(query, DEFAULT_TIME_RANGE_LIMIT)?;
        let filter = VisitorFilter {
            date: Some(date),
            time_range: Some((from, to)),
            ..Default::default()
        };
        self.fetch(
            "list_by_time_range",
            filter,
            sort,
            page,
            "No visitors found in this time range",
        )
        .await
    }

    /// Visitors to one block; the block is matched case-insensitively
    pub async fn list_by_block(&self, block: &str, query: &VisitorListQuery) -> AppResult<VisitorPage> {
        let block = require_block(block)?;
        let (sort, page) = self.resolve(query, DEFAULT_LIMIT)?;
        let filter = VisitorFilter {
            block: Some(block),
            ..Default::default()
        };
        self.fetch("list_by_block", filter, sort, page, "No visitors found for this block")
            .await
    }

    /// Visitors to one room number, optionally narrowed to a block
    pub async fn list_by_room(
        &self,
        room_no: i32,
        block: Option<&str>,
        query: &VisitorListQuery,
    ) -> AppResult<VisitorPage> {
        let block = block.map(require_block).transpose()?;
        let (sort, page) = self.resolve(query, DEFAULT_LIMIT)?;
        let filter = VisitorFilter {
            block,
            room_no: Some(room_no),
            ..Default::default()
        };
        self.fetch("list_by_room", filter, sort, page, "No visitors found for this room")
            .await
    }

    /// Turn raw query parameters into a sort and a page window
    fn resolve(&self, query: &VisitorListQuery, default_limit: i64) -> AppResult<(Option<Sort>, PageRequest)> {
        let sort = match query.sort_by.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(field) => Some(Sort {
                field: field.parse::<SortField>()?,
                order: SortOrder::parse(query.sort_order.as_deref()),
            }),
            None => None,
        };

        let page = query.page.unwrap_or(1);
        if page < 1 {
            return Err(AppError::Validation("page must be a positive integer".to_string()));
        }
        let limit = query.limit.unwrap_or(default_limit);
        if limit < 1 {
            return Err(AppError::Validation("limit must be a positive integer".to_string()));
        }
        if limit > self.max_limit {
            tracing::debug!("Clamping limit {} to {}", limit, self.max_limit);
        }

        let page = PageRequest::checked(page, limit.min(self.max_limit))
            .ok_or_else(|| AppError::Validation("page is out of range".to_string()))?;

        Ok((sort, page))
    }

    async fn fetch(
        &self,
        operation: &'static str,
        filter: VisitorFilter,
        sort: Option<Sort>,
        page: PageRequest,
        not_found: &str,
    ) -> AppResult<VisitorPage> {
        let store = &self.repository.visitors;
        let log_failure = |e: &AppError| {
            tracing::error!(
                operation,
                filter = %filter,
                page = page.page,
                limit = page.limit,
                "Storage failure: {}",
                e
            )
        };

        let visitors = store
            .find(&filter, sort, page)
            .await
            .inspect_err(log_failure)?;

        if visitors.is_empty() {
            tracing::debug!(operation, filter = %filter, page = page.page, "Empty page");
            return Err(AppError::NotFound(not_found.to_string()));
        }

        let total = store.count(&filter).await.inspect_err(log_failure)?;

        Ok(VisitorPage {
            visitors,
            total,
            page: page.page,
            limit: page.limit,
        })
    }
}

fn require(value: &str, message: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(value.to_string())
}

fn require_date(date: &str) -> AppResult<String> {
    if !is_valid_date(date) {
        return Err(AppError::Validation(DATE_FORMAT_MESSAGE.to_string()));
    }
    Ok(date.to_string())
}

fn require_block(block: &str) -> AppResult<String> {
    let block = normalize_block(block);
    if block.is_empty() {
        return Err(AppError::Validation("Block number is required".to_string()));
    }
    Ok(block)
}
