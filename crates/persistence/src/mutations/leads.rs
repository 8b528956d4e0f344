// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lead write operations.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use leadflow_domain::{Lead, LeadStatus};
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::leads;
use crate::error::PersistenceError;

/// Creates a new lead.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_lead(conn: &mut SqliteConnection, lead: &Lead) -> Result<i64, PersistenceError> {
    let notes_json: String = serde_json::to_string(&lead.notes)?;

    diesel::insert_into(leads::table)
        .values((
            leads::name.eq(&lead.name),
            leads::email.eq(&lead.email),
            leads::phone.eq(&lead.phone),
            leads::status.eq(lead.status.as_str()),
            leads::team_id.eq(lead.team_id),
            leads::assigned_to.eq(lead.assigned_to),
            leads::source.eq(&lead.source),
            leads::interested_country.eq(&lead.interested_country),
            leads::course.eq(&lead.course),
            leads::notes_json.eq(&notes_json),
            leads::created_by.eq(lead.created_by),
        ))
        .execute(conn)?;

    let lead_id: i64 = get_last_insert_rowid(conn)?;
    debug!("Created lead {} with id {}", lead.email, lead_id);
    Ok(lead_id)
}

/// Updates a lead's pipeline status.
///
/// # Errors
///
/// Returns `NotFound` if no lead exists with the given identifier.
pub fn update_lead_status(
    conn: &mut SqliteConnection,
    lead_id: i64,
    status: LeadStatus,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(leads::table.filter(leads::lead_id.eq(lead_id)))
        .set((
            leads::status.eq(status.as_str()),
            leads::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Lead {lead_id} not found"
        )));
    }
    info!("Updated lead {} status to {}", lead_id, status);
    Ok(())
}

/// Sets or clears a lead's assignee and team.
///
/// # Errors
///
/// Returns `NotFound` if no lead exists with the given identifier.
pub fn set_lead_assignee(
    conn: &mut SqliteConnection,
    lead_id: i64,
    assigned_to: Option<i64>,
    team_id: Option<i64>,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(leads::table.filter(leads::lead_id.eq(lead_id)))
        .set((
            leads::assigned_to.eq(assigned_to),
            leads::team_id.eq(team_id),
            leads::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Lead {lead_id} not found"
        )));
    }
    debug!("Assigned lead {} to {:?}", lead_id, assigned_to);
    Ok(())
}

/// Appends a note to a lead's note list.
///
/// The list update is a read-modify-write; the single-connection lock
/// in the facade keeps it race free.
///
/// # Errors
///
/// Returns `NotFound` if no lead exists with the given identifier.
pub fn append_lead_note(
    conn: &mut SqliteConnection,
    lead_id: i64,
    note: &str,
) -> Result<(), PersistenceError> {
    let stored: String = leads::table
        .filter(leads::lead_id.eq(lead_id))
        .select(leads::notes_json)
        .first(conn)?;

    let mut notes: Vec<String> = serde_json::from_str(&stored)?;
    notes.push(note.to_string());
    let notes_json: String = serde_json::to_string(&notes)?;

    diesel::update(leads::table.filter(leads::lead_id.eq(lead_id)))
        .set((
            leads::notes_json.eq(&notes_json),
            leads::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    debug!("Appended note to lead {}", lead_id);
    Ok(())
}

/// Clears the team reference on every lead of a team.
///
/// Used when a team is deleted so its leads survive as unowned records.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn clear_team_from_leads(
    conn: &mut SqliteConnection,
    team_id: i64,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::update(leads::table.filter(leads::team_id.eq(team_id)))
        .set((
            leads::team_id.eq(None::<i64>),
            leads::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;
    debug!("Cleared team {} from {} leads", team_id, rows_affected);
    Ok(rows_affected)
}
