//! Booking ledger: reservation records keyed to a room and a requesting
//! user, plus the paged admin view over them.
//!
//! Ownership is enforced structurally: user-initiated deletion filters on
//! both id and the stored requester email, so a mismatched owner is a
//! zero-count no-op rather than an authorization error.

use chrono::Utc;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Closed booking status set. Every booking starts as `Pending`; the only
/// allowed transitions are from `Pending` to one of the terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "approved" => Some(BookingStatus::Approved),
            "rejected" => Some(BookingStatus::Rejected),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    /// A transition is allowed only out of `Pending`, and never back to it.
    pub fn can_transition(self, to: BookingStatus) -> bool {
        self == BookingStatus::Pending && to != BookingStatus::Pending
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub room_id: i64,
    pub user_email: String,
    pub status: BookingStatus,
    pub booking_date: String,
    pub start_time: String,
    pub end_time: String,
    pub purpose: String,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewBooking {
    pub room_id: i64,
    pub user_email: String,
    /// Accepted for wire compatibility with clients that send an initial
    /// status; ignored — every booking is stored as pending.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub booking_date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub purpose: String,
}

/// Partial update over the closed Booking field set. The requester email
/// and room reference are set once at creation and are not patchable.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BookingPatch {
    pub status: Option<BookingStatus>,
    pub booking_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub purpose: Option<String>,
}

/// One page of the admin booking view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPage {
    pub bookings: Vec<Booking>,
    pub total_pages: i64,
    pub current_page: i64,
}

fn row_to_booking(row: &rusqlite::Row) -> rusqlite::Result<Booking> {
    let status_raw: String = row.get("status")?;
    let status = BookingStatus::parse(&status_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            format!("unknown booking status: {status_raw}").into(),
        )
    })?;
    Ok(Booking {
        id: row.get("id")?,
        room_id: row.get("room_id")?,
        user_email: row.get("user_email")?,
        status,
        booking_date: row.get("booking_date")?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        purpose: row.get("purpose")?,
        created_at: row.get("created_at")?,
    })
}

const SELECT_BOOKING: &str = "SELECT id, room_id, user_email, status, booking_date, \
     start_time, end_time, purpose, created_at FROM bookings";

/// Find all bookings whose requester email equals `email` exactly.
/// The filter is literal: no normalization, case-sensitive, and an empty
/// email matches only bookings stored with an empty email.
pub fn find_by_user(conn: &Connection, email: &str) -> rusqlite::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!("{SELECT_BOOKING} WHERE user_email = ?1 ORDER BY id"))?;
    let rows = stmt
        .query_map(params![email], row_to_booking)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Find all bookings, id order.
pub fn find_all(conn: &Connection) -> rusqlite::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!("{SELECT_BOOKING} ORDER BY id"))?;
    let rows = stmt
        .query_map([], row_to_booking)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Find a single booking by id.
pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Booking>> {
    let mut stmt = conn.prepare(&format!("{SELECT_BOOKING} WHERE id = ?1"))?;
    let mut rows = stmt.query_map(params![id], row_to_booking)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// Record a new booking, returning its id. Always stored as pending; the
/// referenced room is not checked to exist and no overlap check is made
/// against other bookings for the same room and slot.
pub fn create(conn: &Connection, booking: &NewBooking) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO bookings (room_id, user_email, status, booking_date, start_time, \
         end_time, purpose, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            booking.room_id,
            booking.user_email,
            BookingStatus::Pending.as_str(),
            booking.booking_date,
            booking.start_time,
            booking.end_time,
            booking.purpose,
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Delete the booking matching BOTH `id` and requester `email`. A wrong
/// owner matches zero rows and is reported as a no-op.
pub fn delete_own(conn: &Connection, id: i64, email: &str) -> rusqlite::Result<usize> {
    conn.execute(
        "DELETE FROM bookings WHERE id = ?1 AND user_email = ?2",
        params![id, email],
    )
}

/// Merge a patch into the booking at `id`. A status change must pass the
/// transition guard. Returns rows affected; a nonexistent id is a
/// zero-count no-op.
pub fn update(conn: &Connection, id: i64, patch: &BookingPatch) -> Result<usize, AppError> {
    let existing = match find_by_id(conn, id)? {
        Some(b) => b,
        None => return Ok(0),
    };

    let status = match patch.status {
        Some(to) => {
            if !existing.status.can_transition(to) {
                return Err(AppError::InvalidTransition {
                    from: existing.status.as_str().to_string(),
                    to: to.as_str().to_string(),
                });
            }
            to
        }
        None => existing.status,
    };

    let booking_date = patch.booking_date.as_deref().unwrap_or(&existing.booking_date);
    let start_time = patch.start_time.as_deref().unwrap_or(&existing.start_time);
    let end_time = patch.end_time.as_deref().unwrap_or(&existing.end_time);
    let purpose = patch.purpose.as_deref().unwrap_or(&existing.purpose);

    let affected = conn.execute(
        "UPDATE bookings SET status = ?1, booking_date = ?2, start_time = ?3, \
         end_time = ?4, purpose = ?5 WHERE id = ?6",
        params![status.as_str(), booking_date, start_time, end_time, purpose, id],
    )?;
    Ok(affected)
}

/// Count all bookings.
pub fn count(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM bookings", [], |row| row.get(0))
}

/// One page of bookings for the admin view. `page` and `limit` must both
/// be at least 1; `total_pages = ceil(count / limit)`.
pub fn find_paginated(conn: &Connection, page: i64, limit: i64) -> Result<BookingPage, AppError> {
    if page < 1 {
        return Err(AppError::InvalidArgument(format!("page must be >= 1, got {page}")));
    }
    if limit < 1 {
        return Err(AppError::InvalidArgument(format!("limit must be >= 1, got {limit}")));
    }

    let total = count(conn)?;
    // limit >= 1 here, so limit - 1 cannot underflow; the add and mul can
    // still overflow for huge page/limit values and are checked.
    let total_pages = total
        .checked_add(limit - 1)
        .map(|n| n / limit)
        .ok_or_else(|| AppError::InvalidArgument(format!("limit {limit} is out of range")))?;
    let offset = (page - 1)
        .checked_mul(limit)
        .ok_or_else(|| AppError::InvalidArgument(format!("page {page} is out of range")))?;

    let mut stmt = conn.prepare(&format!("{SELECT_BOOKING} ORDER BY id LIMIT ?1 OFFSET ?2"))?;
    let bookings = stmt
        .query_map(params![limit, offset], row_to_booking)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(BookingPage {
        bookings,
        total_pages,
        current_page: page,
    })
}
