//! Meeting room booking backend.
//!
//! Room catalog + booking ledger over SQLite, with an admin moderation
//! surface (paged booking review, room CRUD) exposed as a JSON API.

pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
