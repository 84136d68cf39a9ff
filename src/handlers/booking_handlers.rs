use std::collections::HashMap;

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::db::DbPool;
use crate::errors::AppError;
use crate::handlers::parse_id;
use crate::models::booking::{self, NewBooking};

/// GET /bookings?email= - list the caller's bookings.
///
/// The email filter is applied literally: an absent or empty email matches
/// nothing in practice, it does not fall back to listing everything.
pub async fn list_own(
    pool: web::Data<DbPool>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let email = query.get("email").map(String::as_str).unwrap_or("");
    let conn = pool.get()?;
    let bookings = booking::find_by_user(&conn, email)?;
    Ok(HttpResponse::Ok().json(bookings))
}

/// POST /bookings - record a reservation request. Always starts pending.
pub async fn create(
    pool: web::Data<DbPool>,
    body: web::Json<NewBooking>,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let id = booking::create(&conn, &body)?;
    log::info!("Booking {id} created for {}", body.user_email);
    Ok(HttpResponse::Created().json(json!({ "id": id })))
}

/// DELETE /bookings/{id}?email= - self-service cancellation.
///
/// Deletes only when both id and the stored requester email match; a
/// wrong owner gets a zero deletedCount, not an authorization error.
pub async fn delete_own(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;
    let email = query.get("email").map(String::as_str).unwrap_or("");
    let conn = pool.get()?;
    let deleted = booking::delete_own(&conn, id, email)?;
    Ok(HttpResponse::Ok().json(json!({ "deletedCount": deleted })))
}
