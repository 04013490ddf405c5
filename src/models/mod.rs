//! Data models for the visitor server

pub mod visitor;

// Re-export commonly used types
pub use visitor::{
    NewVisitor, PageRequest, Sort, SortField, SortOrder, SubmitVisitor, Visitor, VisitorFilter,
    VisitorListQuery, VisitorPage,
};
