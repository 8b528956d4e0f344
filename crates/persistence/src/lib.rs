// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the LeadFlow CRM.
//!
//! Backed by `SQLite` through Diesel. The [`Persistence`] facade owns a
//! single connection and exposes typed operations over users, teams,
//! leads, sessions, and the audit trail. Callers wrap it in a mutex;
//! every method takes `&mut self` so the borrow checker enforces
//! exclusive access.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

use std::sync::atomic::{AtomicU64, Ordering};

use diesel::SqliteConnection;
use leadflow_audit::AuditEvent;
use leadflow_domain::{Lead, LeadStatus, Team, TeamStatus, User, UserRole};

pub mod backend;
pub mod data_models;
mod diesel_schema;
pub mod error;
pub mod mutations;
pub mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{AuditEventData, SessionData, UserCredentials};
pub use error::PersistenceError;

/// Counter for unique in-memory database names.
///
/// Each in-memory instance needs its own name so parallel tests do not
/// share state through `SQLite`'s shared cache.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The persistence facade.
///
/// Owns one `SQLite` connection with foreign key enforcement on and
/// migrations applied.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new in-memory database instance.
    ///
    /// Each call gets a uniquely named database, isolated from every
    /// other instance.
    ///
    /// # Errors
    ///
    /// Returns an error if initialization or migration fails.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let database_url: String = format!("file:memdb_leadflow_{id}?mode=memory&cache=shared");
        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&database_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;
        Ok(Self { conn })
    }

    /// Opens (or creates) a file-backed database at the given path.
    ///
    /// WAL mode is enabled for better read concurrency.
    ///
    /// # Errors
    ///
    /// Returns an error if initialization or migration fails.
    pub fn new_with_file(path: &str) -> Result<Self, PersistenceError> {
        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;
        Ok(Self { conn })
    }

    // ----- users -----

    /// Creates a user with the given password hash and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including duplicate email).
    pub fn create_user(
        &mut self,
        user: &User,
        password_hash: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, user, password_hash)
    }

    /// Fetches a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist.
    pub fn get_user(&mut self, user_id: i64) -> Result<User, PersistenceError> {
        queries::users::get_user(&mut self.conn, user_id)
    }

    /// Fetches a user with their password hash by email, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<UserCredentials>, PersistenceError> {
        queries::users::get_user_by_email(&mut self.conn, email)
    }

    /// Lists all users with the given role.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_users_by_role(&mut self, role: UserRole) -> Result<Vec<User>, PersistenceError> {
        queries::users::list_users_by_role(&mut self.conn, role)
    }

    /// Lists every user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_users(&mut self) -> Result<Vec<User>, PersistenceError> {
        queries::users::list_users(&mut self.conn)
    }

    /// Lists the members of a team in stable identifier order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn team_members(&mut self, team_id: i64) -> Result<Vec<User>, PersistenceError> {
        queries::users::team_members(&mut self.conn, team_id)
    }

    /// Lists telemarketers without a team.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn unassigned_telemarketers(&mut self) -> Result<Vec<User>, PersistenceError> {
        queries::users::unassigned_telemarketers(&mut self.conn)
    }

    /// Sets or clears a user's team assignment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist.
    pub fn set_user_team(
        &mut self,
        user_id: i64,
        team_id: Option<i64>,
    ) -> Result<(), PersistenceError> {
        mutations::users::set_user_team(&mut self.conn, user_id, team_id)
    }

    /// Records that a lead was assigned to a user.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist.
    pub fn record_lead_assignment(
        &mut self,
        user_id: i64,
        lead_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::users::record_lead_assignment(&mut self.conn, user_id, lead_id)
    }

    /// Records that a lead was taken away from a user.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist.
    pub fn remove_lead_assignment(
        &mut self,
        user_id: i64,
        lead_id: i64,
        was_open: bool,
    ) -> Result<(), PersistenceError> {
        mutations::users::remove_lead_assignment(&mut self.conn, user_id, lead_id, was_open)
    }

    /// Applies the counter deltas for a lead status transition.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist.
    pub fn apply_status_counters(
        &mut self,
        user_id: i64,
        old_status: LeadStatus,
        new_status: LeadStatus,
    ) -> Result<(), PersistenceError> {
        mutations::users::apply_status_counters(&mut self.conn, user_id, old_status, new_status)
    }

    // ----- teams -----

    /// Creates a team and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_team(&mut self, team: &Team) -> Result<i64, PersistenceError> {
        mutations::teams::create_team(&mut self.conn, team)
    }

    /// Fetches a team by identifier.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the team does not exist.
    pub fn get_team(&mut self, team_id: i64) -> Result<Team, PersistenceError> {
        queries::teams::get_team(&mut self.conn, team_id)
    }

    /// Lists every team.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_teams(&mut self) -> Result<Vec<Team>, PersistenceError> {
        queries::teams::list_teams(&mut self.conn)
    }

    /// Lists the teams owned by a manager.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn teams_by_manager(&mut self, manager_id: i64) -> Result<Vec<Team>, PersistenceError> {
        queries::teams::teams_by_manager(&mut self.conn, manager_id)
    }

    /// Updates a team's editable fields.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the team does not exist.
    #[allow(clippy::too_many_arguments)]
    pub fn update_team(
        &mut self,
        team_id: i64,
        name: &str,
        manager_id: i64,
        manager_name: &str,
        region: &str,
        program: &str,
        status: TeamStatus,
    ) -> Result<(), PersistenceError> {
        mutations::teams::update_team(
            &mut self.conn,
            team_id,
            name,
            manager_id,
            manager_name,
            region,
            program,
            status,
        )
    }

    /// Deletes a team. References must be cleared first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the team does not exist.
    pub fn delete_team(&mut self, team_id: i64) -> Result<(), PersistenceError> {
        mutations::teams::delete_team(&mut self.conn, team_id)
    }

    /// Adjusts a team's denormalized member count.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the team does not exist.
    pub fn adjust_member_count(
        &mut self,
        team_id: i64,
        delta: i64,
    ) -> Result<(), PersistenceError> {
        mutations::teams::adjust_member_count(&mut self.conn, team_id, delta)
    }

    /// Adjusts a team's denormalized total lead counter.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the team does not exist.
    pub fn adjust_total_leads(
        &mut self,
        team_id: i64,
        delta: i64,
    ) -> Result<(), PersistenceError> {
        mutations::teams::adjust_total_leads(&mut self.conn, team_id, delta)
    }

    /// Adjusts a team's denormalized converted lead counter.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the team does not exist.
    pub fn adjust_converted_leads(
        &mut self,
        team_id: i64,
        delta: i64,
    ) -> Result<(), PersistenceError> {
        mutations::teams::adjust_converted_leads(&mut self.conn, team_id, delta)
    }

    // ----- leads -----

    /// Creates a lead and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_lead(&mut self, lead: &Lead) -> Result<i64, PersistenceError> {
        mutations::leads::create_lead(&mut self.conn, lead)
    }

    /// Fetches a lead by identifier.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the lead does not exist.
    pub fn get_lead(&mut self, lead_id: i64) -> Result<Lead, PersistenceError> {
        queries::leads::get_lead(&mut self.conn, lead_id)
    }

    /// Lists every lead.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_leads(&mut self) -> Result<Vec<Lead>, PersistenceError> {
        queries::leads::list_leads(&mut self.conn)
    }

    /// Lists the leads assigned to a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn leads_by_assignee(&mut self, user_id: i64) -> Result<Vec<Lead>, PersistenceError> {
        queries::leads::leads_by_assignee(&mut self.conn, user_id)
    }

    /// Lists the leads with the given status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn leads_by_status(&mut self, status: LeadStatus) -> Result<Vec<Lead>, PersistenceError> {
        queries::leads::leads_by_status(&mut self.conn, status)
    }

    /// Lists the leads belonging to a team.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn leads_by_team(&mut self, team_id: i64) -> Result<Vec<Lead>, PersistenceError> {
        queries::leads::leads_by_team(&mut self.conn, team_id)
    }

    /// Lists leads without an assignee.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn unassigned_leads(&mut self) -> Result<Vec<Lead>, PersistenceError> {
        queries::leads::unassigned_leads(&mut self.conn)
    }

    /// Lists the most recently created leads, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn recent_leads(&mut self, limit: i64) -> Result<Vec<Lead>, PersistenceError> {
        queries::leads::recent_leads(&mut self.conn, limit)
    }

    /// Updates a lead's pipeline status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the lead does not exist.
    pub fn update_lead_status(
        &mut self,
        lead_id: i64,
        status: LeadStatus,
    ) -> Result<(), PersistenceError> {
        mutations::leads::update_lead_status(&mut self.conn, lead_id, status)
    }

    /// Sets or clears a lead's assignee and team.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the lead does not exist.
    pub fn set_lead_assignee(
        &mut self,
        lead_id: i64,
        assigned_to: Option<i64>,
        team_id: Option<i64>,
    ) -> Result<(), PersistenceError> {
        mutations::leads::set_lead_assignee(&mut self.conn, lead_id, assigned_to, team_id)
    }

    /// Appends a note to a lead.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the lead does not exist.
    pub fn append_lead_note(&mut self, lead_id: i64, note: &str) -> Result<(), PersistenceError> {
        mutations::leads::append_lead_note(&mut self.conn, lead_id, note)
    }

    /// Clears the team reference on every lead of a team.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn clear_team_from_leads(&mut self, team_id: i64) -> Result<usize, PersistenceError> {
        mutations::leads::clear_team_from_leads(&mut self.conn, team_id)
    }

    // ----- sessions -----

    /// Creates a session and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::sessions::create_session(&mut self.conn, session_token, user_id, expires_at)
    }

    /// Fetches a session by its token, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_session_by_token(
        &mut self,
        token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::sessions::get_session_by_token(&mut self.conn, token)
    }

    /// Lists the sessions belonging to a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn sessions_for_user(&mut self, user_id: i64) -> Result<Vec<SessionData>, PersistenceError> {
        queries::sessions::sessions_for_user(&mut self.conn, user_id)
    }

    /// Refreshes a session's last-activity timestamp.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` if the token is unknown.
    pub fn touch_session(&mut self, token: &str) -> Result<(), PersistenceError> {
        mutations::sessions::touch_session(&mut self.conn, token)
    }

    /// Deletes a session by its token.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` if the token is unknown.
    pub fn delete_session(&mut self, token: &str) -> Result<(), PersistenceError> {
        mutations::sessions::delete_session(&mut self.conn, token)
    }

    /// Deletes every session belonging to a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_sessions_for_user(&mut self, user_id: i64) -> Result<usize, PersistenceError> {
        mutations::sessions::delete_sessions_for_user(&mut self.conn, user_id)
    }

    /// Deletes sessions that expired before the given timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        mutations::sessions::delete_expired_sessions(&mut self.conn, now)
    }

    // ----- audit -----

    /// Records an audit event and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn record_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::audit::record_event(&mut self.conn, event)
    }

    /// Lists the most recently recorded audit events, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn recent_audit_events(
        &mut self,
        limit: i64,
    ) -> Result<Vec<AuditEventData>, PersistenceError> {
        queries::audit::recent_events(&mut self.conn, limit)
    }

    /// Lists the audit events recorded against a subject, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn audit_events_for_subject(
        &mut self,
        subject: &str,
    ) -> Result<Vec<AuditEventData>, PersistenceError> {
        queries::audit::events_for_subject(&mut self.conn, subject)
    }
}
