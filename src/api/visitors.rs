//! Visitor log endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::visitor::{RoomQuery, SubmitVisitor, Visitor, VisitorListQuery, VisitorPage},
};

type ListQuery = WithRejection<Query<VisitorListQuery>, AppError>;

/// Submit visitor response
#[derive(Serialize, ToSchema)]
pub struct SubmitResponse {
    pub message: String,
    pub visitor: Visitor,
}

/// Log a visitor
#[utoipa::path(
    post,
    path = "/visitor/submit",
    tag = "visitors",
    request_body = SubmitVisitor,
    responses(
        (status = 200, description = "Visitor stored", body = SubmitResponse),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn submit_visitor(
    State(state): State<crate::AppState>,
    WithRejection(Json(data), _): WithRejection<Json<SubmitVisitor>, AppError>,
) -> AppResult<Json<SubmitResponse>> {
    let visitor = state.services.visitors.submit(data).await?;
    Ok(Json(SubmitResponse {
        message: "Visitor submitted successfully!".to_string(),
        visitor,
    }))
}

/// List all visitors
#[utoipa::path(
    get,
    path = "/visitor/all",
    tag = "visitors",
    params(VisitorListQuery),
    responses(
        (status = 200, description = "Page of visitors", body = VisitorPage),
        (status = 404, description = "Page is empty", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_visitors(
    State(state): State<crate::AppState>,
    WithRejection(Query(query), _): ListQuery,
) -> AppResult<Json<VisitorPage>> {
    let page = state.services.visitors.list_all(&query).await?;
    Ok(Json(page))
}

/// List visitors on a date
#[utoipa::path(
    get,
    path = "/visitor/dates/{date}",
    tag = "visitors",
    params(
        ("date" = String, Path, description = "Visit date (DD-MM-YYYY)"),
        VisitorListQuery
    ),
    responses(
        (status = 200, description = "Page of visitors", body = VisitorPage),
        (status = 400, description = "Invalid date format", body = crate::error::ErrorResponse),
        (status = 404, description = "Page is empty", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_visitors_by_date(
    State(state): State<crate::AppState>,
    WithRejection(Path(date), _): WithRejection<Path<String>, AppError>,
    WithRejection(Query(query), _): ListQuery,
) -> AppResult<Json<VisitorPage>> {
    let page = state.services.visitors.list_by_date(&date, &query).await?;
    Ok(Json(page))
}

/// List visitors on a date within an inclusive time range
#[utoipa::path(
    get,
    path = "/visitor/time/{date}/{from}/{to}",
    tag = "visitors",
    params(
        ("date" = String, Path, description = "Visit date (DD-MM-YYYY)"),
        ("from" = String, Path, description = "Earliest time, zero-padded (HH:MM)"),
        ("to" = String, Path, description = "Latest time, zero-padded (HH:MM)"),
        VisitorListQuery
    ),
    responses(
        (status = 200, description = "Page of visitors", body = VisitorPage),
        (status = 400, description = "Invalid date format", body = crate::error::ErrorResponse),
        (status = 404, description = "Page is empty", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_visitors_by_time(
    State(state): State<crate::AppState>,
    WithRejection(Path((date, from, to)), _): WithRejection<Path<(String, String, String)>, AppError>,
    WithRejection(Query(query), _): ListQuery,
) -> AppResult<Json<VisitorPage>> {
    let page = state
        .services
        .visitors
        .list_by_time_range(&date, &from, &to, &query)
        .await?;
    Ok(Json(page))
}

/// List visitors to a block
#[utoipa::path(
    get,
    path = "/visitor/block/{block}",
    tag = "visitors",
    params(
        ("block" = String, Path, description = "Block identifier (case-insensitive)"),
        VisitorListQuery
    ),
    responses(
        (status = 200, description = "Page of visitors", body = VisitorPage),
        (status = 404, description = "Page is empty", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_visitors_by_block(
    State(state): State<crate::AppState>,
    WithRejection(Path(block), _): WithRejection<Path<String>, AppError>,
    WithRejection(Query(query), _): ListQuery,
) -> AppResult<Json<VisitorPage>> {
    let page = state.services.visitors.list_by_block(&block, &query).await?;
    Ok(Json(page))
}

/// List visitors to a room number, optionally within one block
#[utoipa::path(
    get,
    path = "/visitor/room/{room_no}",
    tag = "visitors",
    params(
        ("room_no" = i32, Path, description = "Room number"),
        RoomQuery,
        VisitorListQuery
    ),
    responses(
        (status = 200, description = "Page of visitors", body = VisitorPage),
        (status = 400, description = "Room number is not numeric", body = crate::error::ErrorResponse),
        (status = 404, description = "Page is empty", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_visitors_by_room(
    State(state): State<crate::AppState>,
    WithRejection(Path(room_no), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Query(room), _): WithRejection<Query<RoomQuery>, AppError>,
    WithRejection(Query(query), _): ListQuery,
) -> AppResult<Json<VisitorPage>> {
    let page = state
        .services
        .visitors
        .list_by_room(room_no, room.block.as_deref(), &query)
        .await?;
    Ok(Json(page))
}

/// List visitors to one room of one block
#[utoipa::path(
    get,
    path = "/visitor/block/{block}/room/{room_no}",
    tag = "visitors",
    params(
        ("block" = String, Path, description = "Block identifier (case-insensitive)"),
        ("room_no" = i32, Path, description = "Room number"),
        VisitorListQuery
    ),
    responses(
        (status = 200, description = "Page of visitors", body = VisitorPage),
        (status = 400, description = "Room number is not numeric", body = crate::error::ErrorResponse),
        (status = 404, description = "Page is empty", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_visitors_by_block_room(
    State(state): State<crate::AppState>,
    WithRejection(Path((block, room_no)), _): WithRejection<Path<(String, i32)>, AppError>,
    WithRejection(Query(query), _): ListQuery,
) -> AppResult<Json<VisitorPage>> {
    let page = state
        .services
        .visitors
        .list_by_room(room_no, Some(&block), &query)
        .await?;
    Ok(Json(page))
}
