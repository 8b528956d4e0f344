// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Team lookup queries.

use diesel::prelude::*;
use leadflow_domain::Team;

use crate::data_models::TeamRow;
use crate::diesel_schema::teams;
use crate::error::PersistenceError;

/// Fetches a team by identifier.
///
/// # Errors
///
/// Returns `NotFound` if no team exists with the given identifier.
pub fn get_team(conn: &mut SqliteConnection, team_id: i64) -> Result<Team, PersistenceError> {
    let row: TeamRow = teams::table
        .filter(teams::team_id.eq(team_id))
        .select(TeamRow::as_select())
        .first(conn)?;
    row.into_team()
}

/// Lists every team, ordered by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_teams(conn: &mut SqliteConnection) -> Result<Vec<Team>, PersistenceError> {
    let rows: Vec<TeamRow> = teams::table
        .order(teams::team_id.asc())
        .select(TeamRow::as_select())
        .load(conn)?;
    rows.into_iter().map(TeamRow::into_team).collect()
}

/// Lists the teams owned by a manager, ordered by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn teams_by_manager(
    conn: &mut SqliteConnection,
    manager_id: i64,
) -> Result<Vec<Team>, PersistenceError> {
    let rows: Vec<TeamRow> = teams::table
        .filter(teams::manager_id.eq(manager_id))
        .order(teams::team_id.asc())
        .select(TeamRow::as_select())
        .load(conn)?;
    rows.into_iter().map(TeamRow::into_team).collect()
}
