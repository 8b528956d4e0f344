// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session lookup queries.

use diesel::prelude::*;

use crate::data_models::{SessionData, SessionRow};
use crate::diesel_schema::sessions;
use crate::error::PersistenceError;

/// Fetches a session by its token.
///
/// Returns `None` when no session carries the given token. Expiry is
/// checked by the caller against `expires_at`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_session_by_token(
    conn: &mut SqliteConnection,
    token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    let row: Result<SessionRow, diesel::result::Error> = sessions::table
        .filter(sessions::session_token.eq(token))
        .select(SessionRow::as_select())
        .first(conn);

    match row {
        Ok(row) => Ok(Some(row.into_session())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Lists the sessions belonging to a user.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn sessions_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<SessionData>, PersistenceError> {
    let rows: Vec<SessionRow> = sessions::table
        .filter(sessions::user_id.eq(user_id))
        .order(sessions::session_id.asc())
        .select(SessionRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(SessionRow::into_session).collect())
}
