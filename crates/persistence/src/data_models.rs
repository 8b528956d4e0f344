// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Data transfer structs returned by the persistence layer.
//!
//! Row structs used internally by queries and mutations live here as
//! `pub(crate)` types. Conversions back to domain types happen in one
//! place so stored strings are parsed consistently.

use std::str::FromStr;

use diesel::prelude::*;
use leadflow_domain::{Lead, LeadStatus, Team, TeamStatus, User, UserRole};

use crate::error::PersistenceError;

/// A user row joined with its stored password hash.
///
/// Returned by credential lookups so the authentication layer can verify
/// a password without the hash ever appearing on the `User` domain type.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    /// The user record.
    pub user: User,
    /// The bcrypt password hash stored for the user.
    pub password_hash: String,
}

/// A stored session row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    /// Database identifier of the session.
    pub session_id: i64,
    /// Opaque session token presented by clients.
    pub session_token: String,
    /// The user the session belongs to.
    pub user_id: i64,
    /// When the session was created.
    pub created_at: String,
    /// When the session was last used.
    pub last_activity_at: String,
    /// When the session expires.
    pub expires_at: String,
}

/// A stored audit event row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEventData {
    /// Database identifier of the event.
    pub event_id: i64,
    /// The acting user, if any.
    pub actor_user_id: Option<i64>,
    /// The acting user's role at the time of the event.
    pub actor_role: String,
    /// Correlation identifier for the triggering request.
    pub cause_id: String,
    /// Human-readable description of the cause.
    pub cause_description: String,
    /// The action that occurred.
    pub action: String,
    /// The subject the action applied to, e.g. `lead:42`.
    pub subject: String,
    /// Optional JSON details payload.
    pub details: Option<String>,
    /// When the event was recorded.
    pub created_at: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = crate::diesel_schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub user_id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
    pub team_id: Option<i64>,
    pub password_hash: String,
    pub lead_count: i64,
    pub leads_in_progress: i64,
    pub leads_qualified: i64,
    pub leads_not_interested: i64,
    pub assigned_leads_json: String,
    pub daily_quota: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, PersistenceError> {
        let role: UserRole = UserRole::from_str(&self.role)?;
        let assigned_leads: Vec<i64> = serde_json::from_str(&self.assigned_leads_json)?;
        Ok(User::with_id(
            self.user_id,
            self.email,
            self.name,
            role,
            self.team_id,
            self.lead_count,
            self.leads_in_progress,
            self.leads_qualified,
            self.leads_not_interested,
            assigned_leads,
            self.daily_quota,
            self.created_at,
            self.updated_at,
        ))
    }

    pub(crate) fn into_credentials(self) -> Result<UserCredentials, PersistenceError> {
        let password_hash: String = self.password_hash.clone();
        Ok(UserCredentials {
            user: self.into_user()?,
            password_hash,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = crate::diesel_schema::teams)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct TeamRow {
    pub team_id: i64,
    pub name: String,
    pub manager_id: i64,
    pub manager_name: String,
    pub member_count: i64,
    pub region: String,
    pub program: String,
    pub status: String,
    pub total_leads: i64,
    pub converted_leads: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl TeamRow {
    pub(crate) fn into_team(self) -> Result<Team, PersistenceError> {
        let status: TeamStatus = TeamStatus::from_str(&self.status)?;
        Ok(Team::with_id(
            self.team_id,
            self.name,
            self.manager_id,
            self.manager_name,
            self.member_count,
            self.region,
            self.program,
            status,
            self.total_leads,
            self.converted_leads,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = crate::diesel_schema::leads)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct LeadRow {
    pub lead_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: String,
    pub team_id: Option<i64>,
    pub assigned_to: Option<i64>,
    pub source: Option<String>,
    pub interested_country: Option<String>,
    pub course: Option<String>,
    pub notes_json: String,
    pub created_by: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl LeadRow {
    pub(crate) fn into_lead(self) -> Result<Lead, PersistenceError> {
        let status: LeadStatus = LeadStatus::from_str(&self.status)?;
        let notes: Vec<String> = serde_json::from_str(&self.notes_json)?;
        Ok(Lead::with_id(
            self.lead_id,
            self.name,
            self.email,
            self.phone,
            status,
            self.team_id,
            self.assigned_to,
            self.source,
            self.interested_country,
            self.course,
            notes,
            self.created_by,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = crate::diesel_schema::sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct SessionRow {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

impl SessionRow {
    pub(crate) fn into_session(self) -> SessionData {
        SessionData {
            session_id: self.session_id,
            session_token: self.session_token,
            user_id: self.user_id,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
            expires_at: self.expires_at,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = crate::diesel_schema::audit_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct AuditEventRow {
    pub event_id: i64,
    pub actor_user_id: Option<i64>,
    pub actor_role: String,
    pub cause_id: String,
    pub cause_description: String,
    pub action: String,
    pub subject: String,
    pub details_json: Option<String>,
    pub created_at: String,
}

impl AuditEventRow {
    pub(crate) fn into_event(self) -> AuditEventData {
        AuditEventData {
            event_id: self.event_id,
            actor_user_id: self.actor_user_id,
            actor_role: self.actor_role,
            cause_id: self.cause_id,
            cause_description: self.cause_description,
            action: self.action,
            subject: self.subject,
            details: self.details_json,
            created_at: self.created_at,
        }
    }
}
