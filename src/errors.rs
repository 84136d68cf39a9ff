use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Db(rusqlite::Error),
    Pool(r2d2::Error),
    InvalidId(String),
    InvalidArgument(String),
    InvalidTransition { from: String, to: String },
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Pool(e) => write!(f, "Pool error: {e}"),
            AppError::InvalidId(id) => write!(f, "Invalid identifier: {id}"),
            AppError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            AppError::InvalidTransition { from, to } => {
                write!(f, "Invalid status transition: {from} -> {to}")
            }
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::InvalidId(id) => HttpResponse::BadRequest().json(json!({
                "error": "Invalid identifier",
                "details": id,
            })),
            AppError::InvalidArgument(msg) => HttpResponse::BadRequest().json(json!({
                "error": "Invalid argument",
                "details": msg,
            })),
            AppError::InvalidTransition { from, to } => HttpResponse::Conflict().json(json!({
                "error": "Invalid status transition",
                "details": format!("{from} -> {to}"),
            })),
            AppError::NotFound => HttpResponse::NotFound().json(json!({
                "error": "Not found",
            })),
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error",
                }))
            }
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<r2d2::Error> for AppError {
    fn from(e: r2d2::Error) -> Self {
        AppError::Pool(e)
    }
}
