use roombook::errors::AppError;
use roombook::models::booking::{self, BookingPatch, BookingStatus, NewBooking};
use roombook::models::room::{self, NewRoom};

mod common;
use common::setup_test_db;

fn sample_booking(room_id: i64, email: &str) -> NewBooking {
    NewBooking {
        room_id,
        user_email: email.to_string(),
        status: None,
        booking_date: "2026-09-01".to_string(),
        start_time: "09:00".to_string(),
        end_time: "10:00".to_string(),
        purpose: "Standup".to_string(),
    }
}

#[test]
fn test_create_booking_starts_pending() {
    let (_dir, conn) = setup_test_db();

    let id = booking::create(&conn, &sample_booking(1, "a@x.com")).expect("create");
    assert!(id > 0);

    let found = booking::find_by_id(&conn, id).unwrap().unwrap();
    assert_eq!(found.status, BookingStatus::Pending);
    assert_eq!(found.room_id, 1);
    assert_eq!(found.user_email, "a@x.com");
    assert_eq!(found.booking_date, "2026-09-01");
}

#[test]
fn test_create_ignores_client_supplied_status() {
    let (_dir, conn) = setup_test_db();

    let mut new = sample_booking(1, "a@x.com");
    new.status = Some("approved".to_string());
    let id = booking::create(&conn, &new).expect("create");

    let found = booking::find_by_id(&conn, id).unwrap().unwrap();
    assert_eq!(found.status, BookingStatus::Pending);
}

#[test]
fn test_create_does_not_require_room_to_exist() {
    let (_dir, conn) = setup_test_db();

    // Soft reference: room 999 does not exist, insert still succeeds
    let id = booking::create(&conn, &sample_booking(999, "a@x.com")).expect("create");
    assert!(booking::find_by_id(&conn, id).unwrap().is_some());
}

#[test]
fn test_find_by_user_is_exact_and_case_sensitive() {
    let (_dir, conn) = setup_test_db();

    let a = booking::create(&conn, &sample_booking(1, "a@x.com")).unwrap();
    booking::create(&conn, &sample_booking(1, "b@x.com")).unwrap();
    booking::create(&conn, &sample_booking(2, "A@x.com")).unwrap();

    let mine = booking::find_by_user(&conn, "a@x.com").expect("query");
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, a);

    // No normalization: different case is a different identity
    assert_eq!(booking::find_by_user(&conn, "A@X.COM").unwrap().len(), 0);
}

#[test]
fn test_find_by_user_empty_email_matches_nothing() {
    let (_dir, conn) = setup_test_db();

    booking::create(&conn, &sample_booking(1, "a@x.com")).unwrap();
    let result = booking::find_by_user(&conn, "").expect("query");
    assert!(result.is_empty());
}

#[test]
fn test_delete_own_requires_matching_email() {
    let (_dir, conn) = setup_test_db();

    let id = booking::create(&conn, &sample_booking(1, "a@x.com")).unwrap();

    // Wrong owner: no-op, record left intact
    let deleted = booking::delete_own(&conn, id, "b@x.com").expect("delete");
    assert_eq!(deleted, 0);
    assert!(booking::find_by_id(&conn, id).unwrap().is_some());

    // Matching owner removes the record
    let deleted = booking::delete_own(&conn, id, "a@x.com").expect("delete");
    assert_eq!(deleted, 1);
    assert!(booking::find_by_id(&conn, id).unwrap().is_none());
}

#[test]
fn test_update_status_changes_only_status() {
    let (_dir, conn) = setup_test_db();

    let id = booking::create(&conn, &sample_booking(1, "a@x.com")).unwrap();
    let before = booking::find_by_id(&conn, id).unwrap().unwrap();

    let patch = BookingPatch {
        status: Some(BookingStatus::Approved),
        ..BookingPatch::default()
    };
    let matched = booking::update(&conn, id, &patch).expect("update");
    assert_eq!(matched, 1);

    let after = booking::find_by_id(&conn, id).unwrap().unwrap();
    assert_eq!(after.status, BookingStatus::Approved);
    assert_eq!(after.room_id, before.room_id);
    assert_eq!(after.user_email, before.user_email);
    assert_eq!(after.booking_date, before.booking_date);
    assert_eq!(after.start_time, before.start_time);
    assert_eq!(after.end_time, before.end_time);
    assert_eq!(after.purpose, before.purpose);
    assert_eq!(after.created_at, before.created_at);
}

#[test]
fn test_update_merges_non_status_fields() {
    let (_dir, conn) = setup_test_db();

    let id = booking::create(&conn, &sample_booking(1, "a@x.com")).unwrap();
    let patch = BookingPatch {
        purpose: Some("Retro".to_string()),
        ..BookingPatch::default()
    };
    booking::update(&conn, id, &patch).expect("update");

    let after = booking::find_by_id(&conn, id).unwrap().unwrap();
    assert_eq!(after.purpose, "Retro");
    assert_eq!(after.status, BookingStatus::Pending);
    assert_eq!(after.start_time, "09:00");
}

#[test]
fn test_update_nonexistent_booking_is_noop() {
    let (_dir, conn) = setup_test_db();

    let patch = BookingPatch {
        status: Some(BookingStatus::Approved),
        ..BookingPatch::default()
    };
    let matched = booking::update(&conn, 42, &patch).expect("update");
    assert_eq!(matched, 0);
}

#[test]
fn test_transition_out_of_terminal_state_rejected() {
    let (_dir, conn) = setup_test_db();

    let id = booking::create(&conn, &sample_booking(1, "a@x.com")).unwrap();
    let approve = BookingPatch {
        status: Some(BookingStatus::Approved),
        ..BookingPatch::default()
    };
    booking::update(&conn, id, &approve).expect("approve");

    let reject = BookingPatch {
        status: Some(BookingStatus::Rejected),
        ..BookingPatch::default()
    };
    let err = booking::update(&conn, id, &reject);
    assert!(matches!(err, Err(AppError::InvalidTransition { .. })));

    // State unchanged after the rejected transition
    let after = booking::find_by_id(&conn, id).unwrap().unwrap();
    assert_eq!(after.status, BookingStatus::Approved);
}

#[test]
fn test_transition_back_to_pending_rejected() {
    let (_dir, conn) = setup_test_db();

    let id = booking::create(&conn, &sample_booking(1, "a@x.com")).unwrap();
    let patch = BookingPatch {
        status: Some(BookingStatus::Pending),
        ..BookingPatch::default()
    };
    let err = booking::update(&conn, id, &patch);
    assert!(matches!(err, Err(AppError::InvalidTransition { .. })));
}

#[test]
fn test_transition_guard_table() {
    assert!(BookingStatus::Pending.can_transition(BookingStatus::Approved));
    assert!(BookingStatus::Pending.can_transition(BookingStatus::Rejected));
    assert!(BookingStatus::Pending.can_transition(BookingStatus::Cancelled));
    assert!(!BookingStatus::Pending.can_transition(BookingStatus::Pending));
    assert!(!BookingStatus::Approved.can_transition(BookingStatus::Rejected));
    assert!(!BookingStatus::Rejected.can_transition(BookingStatus::Approved));
    assert!(!BookingStatus::Cancelled.can_transition(BookingStatus::Pending));
}

#[test]
fn test_booking_patch_rejects_unknown_and_identity_fields() {
    // Unknown field
    assert!(serde_json::from_value::<BookingPatch>(serde_json::json!({
        "priority": "high"
    }))
    .is_err());
    // Identity fields are not patchable
    assert!(serde_json::from_value::<BookingPatch>(serde_json::json!({
        "userEmail": "evil@x.com"
    }))
    .is_err());
    assert!(serde_json::from_value::<BookingPatch>(serde_json::json!({
        "roomId": 7
    }))
    .is_err());
}

#[test]
fn test_unknown_stored_status_is_a_decode_error() {
    let (_dir, conn) = setup_test_db();

    let id = booking::create(&conn, &sample_booking(1, "a@x.com")).unwrap();
    conn.execute("UPDATE bookings SET status = 'archived' WHERE id = ?1", [id])
        .expect("corrupt status");

    // A corrupted status must surface, not silently decode as pending
    // (which would re-arm the transition guard for the row).
    let result = booking::find_by_id(&conn, id);
    assert!(result.is_err());
}

#[test]
fn test_deleting_room_leaves_bookings() {
    let (_dir, conn) = setup_test_db();

    let room_id = room::create(
        &conn,
        &NewRoom {
            name: "Alpha".to_string(),
            capacity: 4,
            location: String::new(),
            amenities: String::new(),
            description: String::new(),
        },
    )
    .unwrap();
    let booking_id = booking::create(&conn, &sample_booking(room_id, "a@x.com")).unwrap();

    room::delete(&conn, room_id).expect("delete room");

    // Soft reference: the booking survives its room
    let orphan = booking::find_by_id(&conn, booking_id).unwrap().unwrap();
    assert_eq!(orphan.room_id, room_id);
}
