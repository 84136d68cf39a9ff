use actix_web::{web, HttpResponse};

use crate::errors::AppError;

pub mod admin_handlers;
pub mod booking_handlers;
pub mod room_handlers;

/// Parse a path segment as a numeric id, distinguishing a malformed id
/// (400) from a genuinely absent record (404).
pub(crate) fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::InvalidId(raw.to_string()))
}

async fn greeting() -> HttpResponse {
    HttpResponse::Ok().body("Hello from meeting room booking server")
}

/// Register the full route surface. Shared by `main` and the HTTP tests.
/// The `/admin` prefix is namespace convention only; authorization is the
/// deployment boundary's job, not this crate's.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(greeting))
        // Public room catalog
        .route("/rooms", web::get().to(room_handlers::list))
        .route("/rooms/{id}", web::get().to(room_handlers::detail))
        // User bookings
        .route("/bookings", web::get().to(booking_handlers::list_own))
        .route("/bookings", web::post().to(booking_handlers::create))
        .route("/bookings/{id}", web::delete().to(booking_handlers::delete_own))
        // Admin moderation
        .route("/admin/bookings", web::get().to(admin_handlers::list_bookings))
        .route("/admin/bookings/{id}", web::patch().to(admin_handlers::update_booking))
        .route("/admin/rooms", web::post().to(admin_handlers::add_room))
        .route("/admin/rooms/{id}", web::put().to(admin_handlers::update_room))
        .route("/admin/rooms/{id}", web::delete().to(admin_handlers::delete_room));
}
