// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Team write operations, including the denormalized team counters.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use leadflow_domain::{Team, TeamStatus};
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::teams;
use crate::error::PersistenceError;

/// Creates a new team.
///
/// Counters and timestamps take their schema defaults.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_team(conn: &mut SqliteConnection, team: &Team) -> Result<i64, PersistenceError> {
    diesel::insert_into(teams::table)
        .values((
            teams::name.eq(&team.name),
            teams::manager_id.eq(team.manager_id),
            teams::manager_name.eq(&team.manager_name),
            teams::region.eq(&team.region),
            teams::program.eq(&team.program),
            teams::status.eq(team.status.as_str()),
        ))
        .execute(conn)?;

    let team_id: i64 = get_last_insert_rowid(conn)?;
    info!("Created team {} with id {}", team.name, team_id);
    Ok(team_id)
}

/// Updates a team's editable fields.
///
/// Counters are never written here; they move through the dedicated
/// adjustment functions only.
///
/// # Errors
///
/// Returns `NotFound` if no team exists with the given identifier.
#[allow(clippy::too_many_arguments)]
pub fn update_team(
    conn: &mut SqliteConnection,
    team_id: i64,
    name: &str,
    manager_id: i64,
    manager_name: &str,
    region: &str,
    program: &str,
    status: TeamStatus,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(teams::table.filter(teams::team_id.eq(team_id)))
        .set((
            teams::name.eq(name),
            teams::manager_id.eq(manager_id),
            teams::manager_name.eq(manager_name),
            teams::region.eq(region),
            teams::program.eq(program),
            teams::status.eq(status.as_str()),
            teams::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Team {team_id} not found"
        )));
    }
    info!("Updated team {}", team_id);
    Ok(())
}

/// Deletes a team.
///
/// Callers must clear member and lead references first; foreign key
/// enforcement rejects the delete otherwise.
///
/// # Errors
///
/// Returns `NotFound` if no team exists with the given identifier.
pub fn delete_team(conn: &mut SqliteConnection, team_id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize =
        diesel::delete(teams::table.filter(teams::team_id.eq(team_id))).execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Team {team_id} not found"
        )));
    }
    info!("Deleted team {}", team_id);
    Ok(())
}

/// Adjusts a team's denormalized member count.
///
/// # Errors
///
/// Returns `NotFound` if no team exists with the given identifier.
pub fn adjust_member_count(
    conn: &mut SqliteConnection,
    team_id: i64,
    delta: i64,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(teams::table.filter(teams::team_id.eq(team_id)))
        .set((
            teams::member_count.eq(teams::member_count + delta),
            teams::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Team {team_id} not found"
        )));
    }
    debug!("Adjusted member count of team {} by {}", team_id, delta);
    Ok(())
}

/// Adjusts a team's denormalized total lead counter.
///
/// # Errors
///
/// Returns `NotFound` if no team exists with the given identifier.
pub fn adjust_total_leads(
    conn: &mut SqliteConnection,
    team_id: i64,
    delta: i64,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(teams::table.filter(teams::team_id.eq(team_id)))
        .set((
            teams::total_leads.eq(teams::total_leads + delta),
            teams::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Team {team_id} not found"
        )));
    }
    debug!("Adjusted total leads of team {} by {}", team_id, delta);
    Ok(())
}

/// Adjusts a team's denormalized converted lead counter.
///
/// # Errors
///
/// Returns `NotFound` if no team exists with the given identifier.
pub fn adjust_converted_leads(
    conn: &mut SqliteConnection,
    team_id: i64,
    delta: i64,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(teams::table.filter(teams::team_id.eq(team_id)))
        .set((
            teams::converted_leads.eq(teams::converted_leads + delta),
            teams::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Team {team_id} not found"
        )));
    }
    debug!("Adjusted converted leads of team {} by {}", team_id, delta);
    Ok(())
}
