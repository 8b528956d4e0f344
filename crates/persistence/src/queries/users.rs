// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User lookup queries.

use diesel::prelude::*;
use leadflow_domain::{User, UserRole};

use crate::data_models::{UserCredentials, UserRow};
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Fetches a user by identifier.
///
/// # Errors
///
/// Returns `NotFound` if no user exists with the given identifier.
pub fn get_user(conn: &mut SqliteConnection, user_id: i64) -> Result<User, PersistenceError> {
    let row: UserRow = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn)?;
    row.into_user()
}

/// Fetches a user with their stored password hash, by email.
///
/// Returns `None` when no user has the given email, so callers can
/// treat unknown accounts and bad passwords identically.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is corrupt.
pub fn get_user_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<UserCredentials>, PersistenceError> {
    let row: Result<UserRow, diesel::result::Error> = users::table
        .filter(users::email.eq(email))
        .select(UserRow::as_select())
        .first(conn);

    match row {
        Ok(row) => Ok(Some(row.into_credentials()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Lists all users with the given role, ordered by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_users_by_role(
    conn: &mut SqliteConnection,
    role: UserRole,
) -> Result<Vec<User>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .filter(users::role.eq(role.as_str()))
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)?;
    rows.into_iter().map(UserRow::into_user).collect()
}

/// Lists the members of a team, ordered by identifier.
///
/// The ordering is stable so roster-based assignment is deterministic.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn team_members(
    conn: &mut SqliteConnection,
    team_id: i64,
) -> Result<Vec<User>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .filter(users::team_id.eq(team_id))
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)?;
    rows.into_iter().map(UserRow::into_user).collect()
}

/// Lists telemarketers who do not belong to any team.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn unassigned_telemarketers(
    conn: &mut SqliteConnection,
) -> Result<Vec<User>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .filter(users::role.eq(UserRole::Telemarketer.as_str()))
        .filter(users::team_id.is_null())
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)?;
    rows.into_iter().map(UserRow::into_user).collect()
}

/// Lists every user, ordered by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_users(conn: &mut SqliteConnection) -> Result<Vec<User>, PersistenceError> {
    let rows: Vec<UserRow> = users::table
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)?;
    rows.into_iter().map(UserRow::into_user).collect()
}
