//! Visitors repository (PostgreSQL)

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::visitor::{NewVisitor, PageRequest, Sort, Visitor, VisitorFilter},
};

use super::VisitorStore;

const COLUMNS: &str =
    "id, name, contact_no, block, room_no, visit_date, visit_time, purpose, created_at, updated_at";

#[derive(Clone)]
pub struct VisitorsRepository {
    pool: Pool<Postgres>,
}

impl VisitorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Build the WHERE clause; placeholders are numbered in the order `bind_filter!` binds them
    fn where_clause(filter: &VisitorFilter) -> String {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if filter.date.is_some() {
            conditions.push(format!("visit_date = ${}", idx));
            idx += 1;
        }
        if filter.time_range.is_some() {
            conditions.push(format!("visit_time >= ${} AND visit_time <= ${}", idx, idx + 1));
            idx += 2;
        }
        if filter.block.is_some() {
            conditions.push(format!("block = ${}", idx));
            idx += 1;
        }
        if filter.room_no.is_some() {
            conditions.push(format!("room_no = ${}", idx));
        }

        if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        }
    }

    fn order_clause(sort: Option<Sort>) -> String {
        match sort {
            Some(sort) => format!(
                "ORDER BY {} {}, id ASC",
                sort.field.column(),
                sort.order.keyword()
            ),
            None => "ORDER BY id ASC".to_string(),
        }
    }
}

macro_rules! bind_filter {
    ($builder:expr, $filter:expr) => {{
        let mut builder = $builder;
        if let Some(date) = &$filter.date {
            builder = builder.bind(date);
        }
        if let Some((from, to)) = &$filter.time_range {
            builder = builder.bind(from).bind(to);
        }
        if let Some(block) = &$filter.block {
            builder = builder.bind(block);
        }
        if let Some(room_no) = $filter.room_no {
            builder = builder.bind(room_no);
        }
        builder
    }};
}

#[async_trait]
impl VisitorStore for VisitorsRepository {
    async fn insert(&self, visitor: &NewVisitor) -> AppResult<Visitor> {
        let row = sqlx::query_as::<_, Visitor>(&format!(
            r#"
            INSERT INTO visitors (name, contact_no, block, room_no, visit_date, visit_time, purpose)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&visitor.name)
        .bind(visitor.contact_no)
        .bind(&visitor.block)
        .bind(visitor.room_no)
        .bind(&visitor.date)
        .bind(&visitor.time)
        .bind(&visitor.purpose)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find(
        &self,
        filter: &VisitorFilter,
        sort: Option<Sort>,
        page: PageRequest,
    ) -> AppResult<Vec<Visitor>> {
        let query = format!(
            "SELECT {} FROM visitors {} {} LIMIT {} OFFSET {}",
            COLUMNS,
            Self::where_clause(filter),
            Self::order_clause(sort),
            page.limit,
            page.offset()
        );

        let builder = bind_filter!(sqlx::query_as::<_, Visitor>(&query), filter);
        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn count(&self, filter: &VisitorFilter) -> AppResult<i64> {
        let query = format!("SELECT COUNT(*) FROM visitors {}", Self::where_clause(filter));

        let builder = bind_filter!(sqlx::query_scalar::<_, i64>(&query), filter);
        let total = builder.fetch_one(&self.pool).await?;
        Ok(total)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::visitor::{SortField, SortOrder};

    #[test]
    fn test_where_clause_empty() {
        assert_eq!(VisitorsRepository::where_clause(&VisitorFilter::default()), "");
    }

    #[test]
    fn test_where_clause_placeholders() {
        let filter = VisitorFilter {
            date: Some("01-01-2025".into()),
            time_range: Some(("09:00".into(), "11:00".into())),
            block: Some("B1".into()),
            room_no: Some(101),
        };
        assert_eq!(
            VisitorsRepository::where_clause(&filter),
            "WHERE visit_date = $1 AND visit_time >= $2 AND visit_time <= $3 AND block = $4 AND room_no = $5"
        );

        let filter = VisitorFilter {
            block: Some("B1".into()),
            room_no: Some(101),
            ..Default::default()
        };
        assert_eq!(
            VisitorsRepository::where_clause(&filter),
            "WHERE block = $1 AND room_no = $2"
        );
    }

    #[test]
    fn test_order_clause() {
        assert_eq!(VisitorsRepository::order_clause(None), "ORDER BY id ASC");
        let sort = Sort {
            field: SortField::Date,
            order: SortOrder::Desc,
        };
        assert_eq!(
            VisitorsRepository::order_clause(Some(sort)),
            "ORDER BY visit_date DESC, id ASC"
        );
    }
}
