//! Visitor record model, submission payload and query types

use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Visit dates are stored as DD-MM-YYYY text
pub static DATE_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}-[0-9]{2}-[0-9]{4}$").expect("valid date pattern"));

pub const DATE_FORMAT_MESSAGE: &str = "Invalid date format. Use DD-MM-YYYY.";

/// Returns true when `value` is a DD-MM-YYYY date string
pub fn is_valid_date(value: &str) -> bool {
    DATE_FORMAT.is_match(value)
}

/// Canonical form of a block identifier, used both when storing and when filtering
pub fn normalize_block(block: &str) -> String {
    block.trim().to_uppercase()
}

/// Visitor log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Visitor {
    pub id: i64,
    /// Visitor name
    pub name: String,
    /// Visitor phone number
    pub contact_no: i64,
    /// Block (building wing) being visited, upper-cased
    pub block: String,
    /// Flat number within the block
    pub room_no: i32,
    /// Visit date (DD-MM-YYYY)
    #[sqlx(rename = "visit_date")]
    pub date: String,
    /// Visit time (HH:MM)
    #[sqlx(rename = "visit_time")]
    pub time: String,
    /// Reason for the visit
    pub purpose: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Integer field that front-desk clients send either as a JSON number or as a numeric string
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum IntegerInput {
    Number(i64),
    Text(String),
}

impl IntegerInput {
    fn parse(&self) -> Option<i64> {
        match self {
            IntegerInput::Number(n) => Some(*n),
            IntegerInput::Text(s) => s.trim().parse().ok(),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, IntegerInput::Text(s) if s.trim().is_empty())
    }
}

/// Submit visitor request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitVisitor {
    pub name: Option<String>,
    pub contact_no: Option<IntegerInput>,
    pub block: Option<String>,
    pub room_no: Option<IntegerInput>,
    /// Visit date (DD-MM-YYYY)
    pub date: Option<String>,
    /// Visit time (HH:MM)
    pub time: Option<String>,
    pub purpose: Option<String>,
}

/// Validated visitor ready to be stored
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewVisitor {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(range(min = 0, message = "Contact number must not be negative"))]
    pub contact_no: i64,
    #[validate(length(min = 1, message = "Block is required"))]
    pub block: String,
    #[validate(range(min = 0, message = "Room number must not be negative"))]
    pub room_no: i32,
    #[validate(regex(path = *DATE_FORMAT, message = "Invalid date format. Use DD-MM-YYYY."))]
    pub date: String,
    #[validate(length(min = 1, message = "Time is required"))]
    pub time: String,
    #[validate(length(min = 1, message = "Purpose is required"))]
    pub purpose: String,
}

impl TryFrom<SubmitVisitor> for NewVisitor {
    type Error = AppError;

    fn try_from(data: SubmitVisitor) -> AppResult<Self> {
        fn text(value: Option<String>) -> Option<String> {
            value
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        }

        let name = text(data.name);
        let block = text(data.block);
        let date = text(data.date);
        let time = text(data.time);
        let purpose = text(data.purpose);
        let contact_no = data.contact_no.filter(|v| !v.is_blank());
        let room_no = data.room_no.filter(|v| !v.is_blank());

        let (
            Some(name),
            Some(contact_no),
            Some(block),
            Some(room_no),
            Some(date),
            Some(time),
            Some(purpose),
        ) = (name, contact_no, block, room_no, date, time, purpose)
        else {
            return Err(AppError::Validation("All fields are required.".to_string()));
        };

        let numeric_error =
            || AppError::Validation("Contact and room number must be valid numbers.".to_string());
        let contact_no = contact_no.parse().ok_or_else(numeric_error)?;
        let room_no = room_no
            .parse()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(numeric_error)?;

        let visitor = NewVisitor {
            name,
            contact_no,
            block: normalize_block(&block),
            room_no,
            date,
            time,
            purpose,
        };
        visitor
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        Ok(visitor)
    }
}

/// Fields a visitor listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    ContactNo,
    Block,
    RoomNo,
    Date,
    Time,
    Purpose,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Column name in the `visitors` table
    pub fn column(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::ContactNo => "contact_no",
            SortField::Block => "block",
            SortField::RoomNo => "room_no",
            SortField::Date => "visit_date",
            SortField::Time => "visit_time",
            SortField::Purpose => "purpose",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }

    /// Compare two records on this field
    pub fn compare(self, a: &Visitor, b: &Visitor) -> Ordering {
        match self {
            SortField::Name => a.name.cmp(&b.name),
            SortField::ContactNo => a.contact_no.cmp(&b.contact_no),
            SortField::Block => a.block.cmp(&b.block),
            SortField::RoomNo => a.room_no.cmp(&b.room_no),
            SortField::Date => a.date.cmp(&b.date),
            SortField::Time => a.time.cmp(&b.time),
            SortField::Purpose => a.purpose.cmp(&b.purpose),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

impl FromStr for SortField {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "name" => Ok(SortField::Name),
            "contact_no" | "contactNo" => Ok(SortField::ContactNo),
            "block" => Ok(SortField::Block),
            "room_no" | "roomNo" => Ok(SortField::RoomNo),
            "date" => Ok(SortField::Date),
            "time" => Ok(SortField::Time),
            "purpose" => Ok(SortField::Purpose),
            "created_at" | "createdAt" => Ok(SortField::CreatedAt),
            "updated_at" | "updatedAt" => Ok(SortField::UpdatedAt),
            other => Err(AppError::Validation(format!("Cannot sort by '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Anything other than "desc" sorts ascending
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Single-field ordering; `None` at call sites means insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Sort {
    pub fn compare(&self, a: &Visitor, b: &Visitor) -> Ordering {
        let ordering = self.field.compare(a, b);
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Offset pagination window, both values at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Window for `page`, or `None` when its offset does not fit in an i64
    pub fn checked(page: i64, limit: i64) -> Option<Self> {
        (page - 1).checked_mul(limit)?;
        Some(Self { page, limit })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Conjunction of equality / range predicates over visitor fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitorFilter {
    pub date: Option<String>,
    /// Inclusive `(from, to)` bounds on the time field
    pub time_range: Option<(String, String)>,
    pub block: Option<String>,
    pub room_no: Option<i32>,
}

impl VisitorFilter {
    pub fn matches(&self, visitor: &Visitor) -> bool {
        if let Some(date) = &self.date {
            if &visitor.date != date {
                return false;
            }
        }
        if let Some((from, to)) = &self.time_range {
            if visitor.time.as_str() < from.as_str() || visitor.time.as_str() > to.as_str() {
                return false;
            }
        }
        if let Some(block) = &self.block {
            if &visitor.block != block {
                return false;
            }
        }
        if let Some(room_no) = self.room_no {
            if visitor.room_no != room_no {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for VisitorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(date) = &self.date {
            parts.push(format!("date={}", date));
        }
        if let Some((from, to)) = &self.time_range {
            parts.push(format!("time={}..={}", from, to));
        }
        if let Some(block) = &self.block {
            parts.push(format!("block={}", block));
        }
        if let Some(room_no) = self.room_no {
            parts.push(format!("room_no={}", room_no));
        }
        if parts.is_empty() {
            write!(f, "<all>")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

/// Sorting and pagination query parameters shared by every listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct VisitorListQuery {
    /// Field to sort by (name, contact_no, block, room_no, date, time, purpose, created_at, updated_at)
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    /// "asc" (default) or "desc"
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Records per page
    pub limit: Option<i64>,
}

/// Optional block qualifier for room lookups
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct RoomQuery {
    pub block: Option<String>,
}

/// One page of visitors
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VisitorPage {
    pub visitors: Vec<Visitor>,
    /// Number of visitors matching the filter across all pages
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}
