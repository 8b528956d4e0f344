// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User write operations, including the denormalized lead counters.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use leadflow_domain::{LeadStatus, User};
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Creates a new user with the given password hash.
///
/// Counters and timestamps take their schema defaults.
///
/// # Errors
///
/// Returns an error if the insert fails (including a duplicate email).
pub fn create_user(
    conn: &mut SqliteConnection,
    user: &User,
    password_hash: &str,
) -> Result<i64, PersistenceError> {
    let assigned_leads_json: String = serde_json::to_string(&user.assigned_leads)?;

    diesel::insert_into(users::table)
        .values((
            users::email.eq(&user.email),
            users::name.eq(&user.name),
            users::role.eq(user.role.as_str()),
            users::team_id.eq(user.team_id),
            users::password_hash.eq(password_hash),
            users::assigned_leads_json.eq(&assigned_leads_json),
            users::daily_quota.eq(user.daily_quota),
        ))
        .execute(conn)?;

    let user_id: i64 = get_last_insert_rowid(conn)?;
    info!("Created user {} with id {}", user.email, user_id);
    Ok(user_id)
}

/// Sets or clears a user's team assignment.
///
/// # Errors
///
/// Returns `NotFound` if no user exists with the given identifier.
pub fn set_user_team(
    conn: &mut SqliteConnection,
    user_id: i64,
    team_id: Option<i64>,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(users::table.filter(users::user_id.eq(user_id)))
        .set((
            users::team_id.eq(team_id),
            users::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "User {user_id} not found"
        )));
    }
    debug!("Set team of user {} to {:?}", user_id, team_id);
    Ok(())
}

/// Records that a lead was assigned to a user.
///
/// Appends the lead to the user's assigned list and bumps `lead_count`
/// and `leads_in_progress`. The list update is a read-modify-write; the
/// single-connection lock in the facade keeps it race free.
///
/// # Errors
///
/// Returns `NotFound` if no user exists with the given identifier.
pub fn record_lead_assignment(
    conn: &mut SqliteConnection,
    user_id: i64,
    lead_id: i64,
) -> Result<(), PersistenceError> {
    let stored: String = users::table
        .filter(users::user_id.eq(user_id))
        .select(users::assigned_leads_json)
        .first(conn)?;

    let mut assigned: Vec<i64> = serde_json::from_str(&stored)?;
    if !assigned.contains(&lead_id) {
        assigned.push(lead_id);
    }
    let assigned_leads_json: String = serde_json::to_string(&assigned)?;

    diesel::update(users::table.filter(users::user_id.eq(user_id)))
        .set((
            users::assigned_leads_json.eq(&assigned_leads_json),
            users::lead_count.eq(users::lead_count + 1),
            users::leads_in_progress.eq(users::leads_in_progress + 1),
            users::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    debug!("Recorded assignment of lead {} to user {}", lead_id, user_id);
    Ok(())
}

/// Records that a lead was taken away from a user.
///
/// Removes the lead from the user's assigned list and decrements
/// `lead_count`, plus `leads_in_progress` when the lead was still open.
///
/// # Errors
///
/// Returns `NotFound` if no user exists with the given identifier.
pub fn remove_lead_assignment(
    conn: &mut SqliteConnection,
    user_id: i64,
    lead_id: i64,
    was_open: bool,
) -> Result<(), PersistenceError> {
    let stored: String = users::table
        .filter(users::user_id.eq(user_id))
        .select(users::assigned_leads_json)
        .first(conn)?;

    let mut assigned: Vec<i64> = serde_json::from_str(&stored)?;
    assigned.retain(|id| *id != lead_id);
    let assigned_leads_json: String = serde_json::to_string(&assigned)?;

    let in_progress_delta: i64 = if was_open { 1 } else { 0 };
    diesel::update(users::table.filter(users::user_id.eq(user_id)))
        .set((
            users::assigned_leads_json.eq(&assigned_leads_json),
            users::lead_count.eq(users::lead_count - 1),
            users::leads_in_progress.eq(users::leads_in_progress - in_progress_delta),
            users::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    debug!("Removed assignment of lead {} from user {}", lead_id, user_id);
    Ok(())
}

/// Applies the counter deltas for a lead status transition.
///
/// `leads_in_progress` tracks open statuses; `leads_qualified` and
/// `leads_not_interested` track their terminal statuses. A transition
/// that does not cross any of those boundaries is a no-op.
///
/// # Errors
///
/// Returns `NotFound` if no user exists with the given identifier.
pub fn apply_status_counters(
    conn: &mut SqliteConnection,
    user_id: i64,
    old_status: LeadStatus,
    new_status: LeadStatus,
) -> Result<(), PersistenceError> {
    let in_progress_delta: i64 = i64::from(new_status.is_open()) - i64::from(old_status.is_open());
    let qualified_delta: i64 = i64::from(new_status == LeadStatus::Qualified)
        - i64::from(old_status == LeadStatus::Qualified);
    let not_interested_delta: i64 = i64::from(new_status == LeadStatus::NotInterested)
        - i64::from(old_status == LeadStatus::NotInterested);

    if in_progress_delta == 0 && qualified_delta == 0 && not_interested_delta == 0 {
        return Ok(());
    }

    let rows_affected: usize = diesel::update(users::table.filter(users::user_id.eq(user_id)))
        .set((
            users::leads_in_progress.eq(users::leads_in_progress + in_progress_delta),
            users::leads_qualified.eq(users::leads_qualified + qualified_delta),
            users::leads_not_interested.eq(users::leads_not_interested + not_interested_delta),
            users::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "User {user_id} not found"
        )));
    }
    debug!(
        "Applied status counters for user {}: {} -> {}",
        user_id, old_status, new_status
    );
    Ok(())
}
