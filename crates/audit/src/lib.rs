// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use leadflow_domain::UserRole;

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change:
/// an authenticated user or the system itself (e.g. during bootstrap).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The acting user's identifier, or `None` for system actions.
    pub user_id: Option<i64>,
    /// The acting user's role at the time of the action.
    pub role: UserRole,
}

impl Actor {
    /// Creates an actor for an authenticated user.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The acting user's identifier
    /// * `role` - The acting user's role
    #[must_use]
    pub const fn user(user_id: i64, role: UserRole) -> Self {
        Self {
            user_id: Some(user_id),
            role,
        }
    }

    /// Creates an actor for a system-initiated action.
    #[must_use]
    pub const fn system() -> Self {
        Self {
            user_id: None,
            role: UserRole::Admin,
        }
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID, batch ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// The closed set of auditable workflow actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    /// A lead was created (manually or via import).
    LeadCreated,
    /// A lead was assigned to a telemarketer.
    LeadAssigned,
    /// A lead was moved from one telemarketer to another.
    LeadReassigned,
    /// A lead's status changed.
    LeadStatusChanged,
    /// A note was appended to a lead.
    LeadNoteAdded,
    /// A CSV batch was imported and distributed.
    LeadsDistributed,
    /// A team was created.
    TeamCreated,
    /// A team's fields were updated.
    TeamUpdated,
    /// A team was deleted (members unassigned, not deleted).
    TeamDeleted,
    /// A telemarketer was added to a team.
    TeamMemberAdded,
    /// A telemarketer was removed from a team.
    TeamMemberRemoved,
    /// A user account was created.
    UserCreated,
}

impl AuditAction {
    /// Converts this action to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LeadCreated => "LeadCreated",
            Self::LeadAssigned => "LeadAssigned",
            Self::LeadReassigned => "LeadReassigned",
            Self::LeadStatusChanged => "LeadStatusChanged",
            Self::LeadNoteAdded => "LeadNoteAdded",
            Self::LeadsDistributed => "LeadsDistributed",
            Self::TeamCreated => "TeamCreated",
            Self::TeamUpdated => "TeamUpdated",
            Self::TeamDeleted => "TeamDeleted",
            Self::TeamMemberAdded => "TeamMemberAdded",
            Self::TeamMemberRemoved => "TeamMemberRemoved",
            Self::UserCreated => "UserCreated",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable audit event recording one workflow mutation.
///
/// Every successful mutating operation must produce exactly one audit
/// event. Events capture who (actor), why (cause), what (action), the
/// entity acted upon, and an optional JSON detail payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The actor who initiated this change.
    pub actor: Actor,
    /// The cause or reason for this change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: AuditAction,
    /// The entity acted upon, as `kind:id` (e.g. `lead:42`, `team:7`).
    pub subject: String,
    /// Optional JSON payload with action-specific detail.
    pub details: Option<String>,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `subject` - The entity acted upon, as `kind:id`
    /// * `details` - Optional JSON payload
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: AuditAction,
        subject: String,
        details: Option<String>,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            subject,
            details,
        }
    }

    /// Builds the `kind:id` subject reference for a lead.
    #[must_use]
    pub fn lead_subject(lead_id: i64) -> String {
        format!("lead:{lead_id}")
    }

    /// Builds the `kind:id` subject reference for a team.
    #[must_use]
    pub fn team_subject(team_id: i64) -> String {
        format!("team:{team_id}")
    }

    /// Builds the `kind:id` subject reference for a user.
    #[must_use]
    pub fn user_subject(user_id: i64) -> String {
        format!("user:{user_id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_user_carries_identity() {
        let actor: Actor = Actor::user(3, UserRole::SalesManager);

        assert_eq!(actor.user_id, Some(3));
        assert_eq!(actor.role, UserRole::SalesManager);
    }

    #[test]
    fn test_actor_system_has_no_user() {
        let actor: Actor = Actor::system();
        assert_eq!(actor.user_id, None);
    }

    #[test]
    fn test_cause_creation_requires_all_fields() {
        let cause: Cause = Cause::new(String::from("batch-456"), String::from("CSV import"));

        assert_eq!(cause.id, "batch-456");
        assert_eq!(cause.description, "CSV import");
    }

    #[test]
    fn test_action_string_forms() {
        assert_eq!(AuditAction::LeadAssigned.as_str(), "LeadAssigned");
        assert_eq!(AuditAction::TeamMemberRemoved.to_string(), "TeamMemberRemoved");
    }

    #[test]
    fn test_subject_references() {
        assert_eq!(AuditEvent::lead_subject(42), "lead:42");
        assert_eq!(AuditEvent::team_subject(7), "team:7");
        assert_eq!(AuditEvent::user_subject(1), "user:1");
    }

    #[test]
    fn test_audit_event_creation_requires_all_fields() {
        let actor: Actor = Actor::user(3, UserRole::SalesManager);
        let cause: Cause = Cause::new(String::from("req-1"), String::from("Manual entry"));

        let event: AuditEvent = AuditEvent::new(
            actor.clone(),
            cause.clone(),
            AuditAction::LeadCreated,
            AuditEvent::lead_subject(42),
            None,
        );

        assert_eq!(event.actor, actor);
        assert_eq!(event.cause, cause);
        assert_eq!(event.action, AuditAction::LeadCreated);
        assert_eq!(event.subject, "lead:42");
        assert_eq!(event.details, None);
    }

    #[test]
    fn test_audit_event_equality() {
        let make = || {
            AuditEvent::new(
                Actor::user(3, UserRole::Admin),
                Cause::new(String::from("req-1"), String::from("Team deletion")),
                AuditAction::TeamDeleted,
                AuditEvent::team_subject(7),
                Some(String::from("{\"members_unassigned\":4}")),
            )
        };

        assert_eq!(make(), make());
    }
}
