use std::collections::HashMap;

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::db::DbPool;
use crate::errors::AppError;
use crate::handlers::parse_id;
use crate::models::booking::{self, BookingPatch};
use crate::models::room::{self, NewRoom, RoomPatch};

/// GET /admin/bookings?page=&limit= - paged admin view over the ledger.
///
/// Absent or non-numeric params fall back to page 1, limit 10; a numeric
/// but non-positive value is rejected with 400.
pub async fn list_bookings(
    pool: web::Data<DbPool>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let page = query
        .get("page")
        .and_then(|p| p.parse::<i64>().ok())
        .unwrap_or(1);
    let limit = query
        .get("limit")
        .and_then(|l| l.parse::<i64>().ok())
        .unwrap_or(10);

    let conn = pool.get()?;
    let result = booking::find_paginated(&conn, page, limit)?;
    Ok(HttpResponse::Ok().json(result))
}

/// PATCH /admin/bookings/{id} - moderate a booking. Status changes go
/// through the transition guard; other patchable fields merge in place.
pub async fn update_booking(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<BookingPatch>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;
    let conn = pool.get()?;
    let matched = booking::update(&conn, id, &body)?;
    if matched > 0 {
        if let Some(status) = body.status {
            log::info!("Booking {id} status set to {}", status.as_str());
        }
    }
    Ok(HttpResponse::Ok().json(json!({ "matchedCount": matched })))
}

/// POST /admin/rooms - add a room to the catalog.
pub async fn add_room(
    pool: web::Data<DbPool>,
    body: web::Json<NewRoom>,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let id = room::create(&conn, &body)?;
    log::info!("Room {id} ({}) added", body.name);
    Ok(HttpResponse::Created().json(json!({ "id": id })))
}

/// PUT /admin/rooms/{id} - merge a partial update into a room. Updating a
/// nonexistent room reports zero matched, not an error.
pub async fn update_room(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<RoomPatch>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;
    let conn = pool.get()?;
    let matched = room::update(&conn, id, &body)?;
    Ok(HttpResponse::Ok().json(json!({ "matchedCount": matched })))
}

/// DELETE /admin/rooms/{id} - remove a room. Bookings referencing it are
/// left untouched; deleting a nonexistent room is a no-op.
pub async fn delete_room(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;
    let conn = pool.get()?;
    let deleted = room::delete(&conn, id)?;
    Ok(HttpResponse::Ok().json(json!({ "deletedCount": deleted })))
}
