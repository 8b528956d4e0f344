// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lead lookup queries.

use diesel::prelude::*;
use leadflow_domain::{Lead, LeadStatus};

use crate::data_models::LeadRow;
use crate::diesel_schema::leads;
use crate::error::PersistenceError;

/// Fetches a lead by identifier.
///
/// # Errors
///
/// Returns `NotFound` if no lead exists with the given identifier.
pub fn get_lead(conn: &mut SqliteConnection, lead_id: i64) -> Result<Lead, PersistenceError> {
    let row: LeadRow = leads::table
        .filter(leads::lead_id.eq(lead_id))
        .select(LeadRow::as_select())
        .first(conn)?;
    row.into_lead()
}

/// Lists every lead, ordered by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_leads(conn: &mut SqliteConnection) -> Result<Vec<Lead>, PersistenceError> {
    let rows: Vec<LeadRow> = leads::table
        .order(leads::lead_id.asc())
        .select(LeadRow::as_select())
        .load(conn)?;
    rows.into_iter().map(LeadRow::into_lead).collect()
}

/// Lists the leads assigned to a user, ordered by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn leads_by_assignee(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<Lead>, PersistenceError> {
    let rows: Vec<LeadRow> = leads::table
        .filter(leads::assigned_to.eq(user_id))
        .order(leads::lead_id.asc())
        .select(LeadRow::as_select())
        .load(conn)?;
    rows.into_iter().map(LeadRow::into_lead).collect()
}

/// Lists the leads with the given status, ordered by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn leads_by_status(
    conn: &mut SqliteConnection,
    status: LeadStatus,
) -> Result<Vec<Lead>, PersistenceError> {
    let rows: Vec<LeadRow> = leads::table
        .filter(leads::status.eq(status.as_str()))
        .order(leads::lead_id.asc())
        .select(LeadRow::as_select())
        .load(conn)?;
    rows.into_iter().map(LeadRow::into_lead).collect()
}

/// Lists the leads belonging to a team, ordered by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn leads_by_team(
    conn: &mut SqliteConnection,
    team_id: i64,
) -> Result<Vec<Lead>, PersistenceError> {
    let rows: Vec<LeadRow> = leads::table
        .filter(leads::team_id.eq(team_id))
        .order(leads::lead_id.asc())
        .select(LeadRow::as_select())
        .load(conn)?;
    rows.into_iter().map(LeadRow::into_lead).collect()
}

/// Lists leads that have not been assigned to anyone, ordered by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn unassigned_leads(conn: &mut SqliteConnection) -> Result<Vec<Lead>, PersistenceError> {
    let rows: Vec<LeadRow> = leads::table
        .filter(leads::assigned_to.is_null())
        .order(leads::lead_id.asc())
        .select(LeadRow::as_select())
        .load(conn)?;
    rows.into_iter().map(LeadRow::into_lead).collect()
}

/// Lists the most recently created leads, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn recent_leads(
    conn: &mut SqliteConnection,
    limit: i64,
) -> Result<Vec<Lead>, PersistenceError> {
    let rows: Vec<LeadRow> = leads::table
        .order(leads::lead_id.desc())
        .limit(limit)
        .select(LeadRow::as_select())
        .load(conn)?;
    rows.into_iter().map(LeadRow::into_lead).collect()
}
