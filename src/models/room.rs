use chrono::Utc;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub capacity: i64,
    pub location: String,
    pub amenities: String,
    pub description: String,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewRoom {
    pub name: String,
    #[serde(default)]
    pub capacity: i64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub amenities: String,
    #[serde(default)]
    pub description: String,
}

/// Partial update over the closed Room field set. Unknown fields are
/// rejected at deserialization; absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RoomPatch {
    pub name: Option<String>,
    pub capacity: Option<i64>,
    pub location: Option<String>,
    pub amenities: Option<String>,
    pub description: Option<String>,
}

fn row_to_room(row: &rusqlite::Row) -> rusqlite::Result<Room> {
    Ok(Room {
        id: row.get("id")?,
        name: row.get("name")?,
        capacity: row.get("capacity")?,
        location: row.get("location")?,
        amenities: row.get("amenities")?,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
    })
}

const SELECT_ROOM: &str =
    "SELECT id, name, capacity, location, amenities, description, created_at FROM rooms";

/// Find all rooms, id order. No pagination.
pub fn find_all(conn: &Connection) -> rusqlite::Result<Vec<Room>> {
    let mut stmt = conn.prepare(&format!("{SELECT_ROOM} ORDER BY id"))?;
    let rows = stmt
        .query_map([], row_to_room)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Find a single room by id.
pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Room>> {
    let mut stmt = conn.prepare(&format!("{SELECT_ROOM} WHERE id = ?1"))?;
    let mut rows = stmt.query_map(params![id], row_to_room)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// Create a new room, returning its id.
pub fn create(conn: &Connection, room: &NewRoom) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO rooms (name, capacity, location, amenities, description, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            room.name,
            room.capacity,
            room.location,
            room.amenities,
            room.description,
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Merge a patch into the room at `id`. Returns the number of rows
/// affected; a nonexistent id is a zero-count no-op, not an error.
pub fn update(conn: &Connection, id: i64, patch: &RoomPatch) -> rusqlite::Result<usize> {
    let existing = match find_by_id(conn, id)? {
        Some(r) => r,
        None => return Ok(0),
    };

    let name = patch.name.as_deref().unwrap_or(&existing.name);
    let capacity = patch.capacity.unwrap_or(existing.capacity);
    let location = patch.location.as_deref().unwrap_or(&existing.location);
    let amenities = patch.amenities.as_deref().unwrap_or(&existing.amenities);
    let description = patch.description.as_deref().unwrap_or(&existing.description);

    conn.execute(
        "UPDATE rooms SET name = ?1, capacity = ?2, location = ?3, amenities = ?4, \
         description = ?5 WHERE id = ?6",
        params![name, capacity, location, amenities, description, id],
    )
}

/// Delete the room at `id` if present. Bookings referencing the room are
/// left in place (soft reference). Nonexistent id is a no-op.
pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM rooms WHERE id = ?1", params![id])
}

/// Count all rooms.
pub fn count(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM rooms", [], |row| row.get(0))
}
