// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leadflow_domain::UserRole;

use super::helpers::{fresh_db, seed_user};
use crate::data_models::SessionData;
use crate::{Persistence, PersistenceError};

#[test]
fn test_create_and_fetch_session() {
    let mut db: Persistence = fresh_db();
    let user_id: i64 = seed_user(&mut db, "u@example.com", UserRole::Counselor);

    db.create_session("token-abc", user_id, "2099-01-01 00:00:00")
        .unwrap();

    let session: SessionData = db.get_session_by_token("token-abc").unwrap().unwrap();
    assert_eq!(session.user_id, user_id);
    assert_eq!(session.expires_at, "2099-01-01 00:00:00");
    assert!(!session.created_at.is_empty());

    assert!(db.get_session_by_token("no-such-token").unwrap().is_none());
}

#[test]
fn test_duplicate_token_is_rejected() {
    let mut db: Persistence = fresh_db();
    let user_id: i64 = seed_user(&mut db, "u@example.com", UserRole::Counselor);

    db.create_session("token-abc", user_id, "2099-01-01 00:00:00")
        .unwrap();
    assert!(
        db.create_session("token-abc", user_id, "2099-01-01 00:00:00")
            .is_err()
    );
}

#[test]
fn test_delete_session() {
    let mut db: Persistence = fresh_db();
    let user_id: i64 = seed_user(&mut db, "u@example.com", UserRole::Counselor);
    db.create_session("token-abc", user_id, "2099-01-01 00:00:00")
        .unwrap();

    db.delete_session("token-abc").unwrap();
    assert!(db.get_session_by_token("token-abc").unwrap().is_none());

    let result = db.delete_session("token-abc");
    assert!(matches!(result, Err(PersistenceError::SessionNotFound(_))));
}

#[test]
fn test_delete_sessions_for_user() {
    let mut db: Persistence = fresh_db();
    let u1: i64 = seed_user(&mut db, "u1@example.com", UserRole::Counselor);
    let u2: i64 = seed_user(&mut db, "u2@example.com", UserRole::Counselor);
    db.create_session("t1", u1, "2099-01-01 00:00:00").unwrap();
    db.create_session("t2", u1, "2099-01-01 00:00:00").unwrap();
    db.create_session("t3", u2, "2099-01-01 00:00:00").unwrap();

    let deleted: usize = db.delete_sessions_for_user(u1).unwrap();
    assert_eq!(deleted, 2);
    assert!(db.sessions_for_user(u1).unwrap().is_empty());
    assert_eq!(db.sessions_for_user(u2).unwrap().len(), 1);
}

#[test]
fn test_delete_expired_sessions() {
    let mut db: Persistence = fresh_db();
    let user_id: i64 = seed_user(&mut db, "u@example.com", UserRole::Counselor);
    db.create_session("old", user_id, "2020-01-01 00:00:00").unwrap();
    db.create_session("live", user_id, "2099-01-01 00:00:00").unwrap();

    let deleted: usize = db.delete_expired_sessions("2026-01-01 00:00:00").unwrap();
    assert_eq!(deleted, 1);
    assert!(db.get_session_by_token("old").unwrap().is_none());
    assert!(db.get_session_by_token("live").unwrap().is_some());
}
