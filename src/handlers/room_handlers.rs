use actix_web::{web, HttpResponse};

use crate::db::DbPool;
use crate::errors::AppError;
use crate::handlers::parse_id;
use crate::models::room;

/// GET /rooms - list all rooms, unfiltered.
pub async fn list(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let rooms = room::find_all(&conn)?;
    Ok(HttpResponse::Ok().json(rooms))
}

/// GET /rooms/{id} - single room detail.
pub async fn detail(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;
    let conn = pool.get()?;
    let room = room::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(room))
}
