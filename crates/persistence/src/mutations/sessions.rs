// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session write operations.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::sessions;
use crate::error::PersistenceError;

/// Creates a new session for a user.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    user_id: i64,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::user_id.eq(user_id),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = get_last_insert_rowid(conn)?;
    info!("Created session {} for user {}", session_id, user_id);
    Ok(session_id)
}

/// Refreshes a session's last-activity timestamp.
///
/// # Errors
///
/// Returns `SessionNotFound` if no session carries the given token.
pub fn touch_session(conn: &mut SqliteConnection, token: &str) -> Result<(), PersistenceError> {
    let rows_affected: usize =
        diesel::update(sessions::table.filter(sessions::session_token.eq(token)))
            .set(sessions::last_activity_at.eq(sql::<Text>("CURRENT_TIMESTAMP")))
            .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::SessionNotFound(token.to_string()));
    }
    Ok(())
}

/// Deletes a session by its token.
///
/// # Errors
///
/// Returns `SessionNotFound` if no session carries the given token.
pub fn delete_session(conn: &mut SqliteConnection, token: &str) -> Result<(), PersistenceError> {
    let rows_affected: usize =
        diesel::delete(sessions::table.filter(sessions::session_token.eq(token))).execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::SessionNotFound(token.to_string()));
    }
    debug!("Deleted session");
    Ok(())
}

/// Deletes every session belonging to a user.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_sessions_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize =
        diesel::delete(sessions::table.filter(sessions::user_id.eq(user_id))).execute(conn)?;
    debug!("Deleted {} sessions for user {}", rows_affected, user_id);
    Ok(rows_affected)
}

/// Deletes sessions that expired before the given timestamp.
///
/// Timestamps are ISO 8601 text, so lexicographic comparison matches
/// chronological order.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_expired_sessions(
    conn: &mut SqliteConnection,
    now: &str,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize =
        diesel::delete(sessions::table.filter(sessions::expires_at.lt(now))).execute(conn)?;
    if rows_affected > 0 {
        info!("Deleted {} expired sessions", rows_affected);
    }
    Ok(rows_affected)
}
