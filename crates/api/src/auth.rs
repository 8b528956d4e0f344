// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization services.

use leadflow::permissions_for_role;
use leadflow_audit::Actor;
use leadflow_domain::{Permission, User, UserRole};
use leadflow_persistence::{Persistence, PersistenceError, SessionData, UserCredentials};
use time::{Duration, OffsetDateTime};

use crate::error::AuthError;

/// An authenticated user with their role.
///
/// This represents a user whose session token has been validated. The
/// role drives every authorization decision for the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The user's identifier.
    pub user_id: i64,
    /// The user's role.
    pub role: UserRole,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's identifier
    /// * `role` - The user's role
    #[must_use]
    pub const fn new(user_id: i64, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// Converts this authenticated user into an audit `Actor`.
    ///
    /// Used when recording audit events to attribute actions to the
    /// authenticated user.
    #[must_use]
    pub const fn to_audit_actor(&self) -> Actor {
        Actor::user(self.user_id, self.role)
    }
}

/// Authorization service for enforcing role-based access control.
///
/// Every mutating operation is gated on a single required permission
/// from the static role table in the core crate.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the actor holds the given permission.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated user
    /// * `permission` - The permission the action requires
    /// * `action` - The action name, used in the error message
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` if the actor's role does not
    /// grant the permission.
    pub fn require(
        actor: &AuthenticatedUser,
        permission: Permission,
        action: &str,
    ) -> Result<(), AuthError> {
        if permissions_for_role(actor.role).contains(&permission) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from(action),
                required_permission: String::from(permission.as_str()),
            })
        }
    }

    /// Checks if an actor may import leads from CSV.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor lacks `upload:leads`.
    pub fn authorize_upload_leads(actor: &AuthenticatedUser) -> Result<(), AuthError> {
        Self::require(actor, Permission::UploadLeads, "upload_leads")
    }

    /// Checks if an actor may distribute or reassign leads.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor lacks `assign:leads`.
    pub fn authorize_assign_leads(actor: &AuthenticatedUser) -> Result<(), AuthError> {
        Self::require(actor, Permission::AssignLeads, "assign_leads")
    }

    /// Checks if an actor may create, update, or delete teams.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor lacks `manage:teams`.
    pub fn authorize_manage_teams(actor: &AuthenticatedUser) -> Result<(), AuthError> {
        Self::require(actor, Permission::ManageTeams, "manage_teams")
    }

    /// Checks if an actor may add or remove team members.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor lacks `manage:team_members`.
    pub fn authorize_manage_team_members(actor: &AuthenticatedUser) -> Result<(), AuthError> {
        Self::require(actor, Permission::ManageTeamMembers, "manage_team_members")
    }

    /// Checks if an actor may move a lead through the status pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor lacks `update:lead_status`.
    pub fn authorize_update_lead_status(actor: &AuthenticatedUser) -> Result<(), AuthError> {
        Self::require(actor, Permission::UpdateLeadStatus, "update_lead_status")
    }

    /// Checks if an actor may create user accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor lacks `manage:users`.
    pub fn authorize_manage_users(actor: &AuthenticatedUser) -> Result<(), AuthError> {
        Self::require(actor, Permission::ManageUsers, "manage_users")
    }

    /// Checks if an actor may view team roll-up statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor lacks `view:team_performance`.
    pub fn authorize_view_team_performance(actor: &AuthenticatedUser) -> Result<(), AuthError> {
        Self::require(actor, Permission::ViewTeamPerformance, "view_team_performance")
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Authenticates a user by email and password and creates a session.
    ///
    /// Unknown accounts and wrong passwords produce the same error so
    /// the response does not reveal which accounts exist.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `email` - The account email
    /// * `password` - The plaintext password to verify
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_user`, `user`)
    ///
    /// # Errors
    ///
    /// Returns an error if authentication fails.
    pub fn login(
        persistence: &mut Persistence,
        email: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedUser, User), AuthError> {
        let credentials: UserCredentials = persistence
            .get_user_by_email(email)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid email or password"),
            })?;

        let password_matches: bool = bcrypt::verify(password, &credentials.password_hash)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Password verification failed: {e}"),
            })?;

        if !password_matches {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid email or password"),
            });
        }

        let user: User = credentials.user;
        let user_id: i64 = user.user_id.ok_or_else(|| AuthError::AuthenticationFailed {
            reason: String::from("Stored user has no identifier"),
        })?;

        let session_token: String = Self::generate_session_token();

        let expires_at: OffsetDateTime =
            OffsetDateTime::now_utc() + Self::DEFAULT_SESSION_EXPIRATION;
        let expires_at_str: String = expires_at
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format expiration time: {e}"),
            })?;

        persistence
            .create_session(&session_token, user_id, &expires_at_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        let authenticated: AuthenticatedUser = AuthenticatedUser::new(user_id, user.role);
        Ok((session_token, authenticated, user))
    }

    /// Validates a session token and returns the authenticated user.
    ///
    /// Expired sessions are removed as a side effect.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to validate
    ///
    /// # Returns
    ///
    /// A tuple of (`authenticated_user`, `user`)
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or expired.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(AuthenticatedUser, User), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(
            &session.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Failed to parse session expiration: {e}"),
        })?;

        if OffsetDateTime::now_utc() > expires_at {
            // Best effort removal; the session is rejected either way.
            let _ = persistence.delete_session(session_token);
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let user: User = persistence
            .get_user(session.user_id)
            .map_err(Self::map_persistence_error)?;
        let user_id: i64 = user.user_id.ok_or_else(|| AuthError::AuthenticationFailed {
            reason: String::from("Stored user has no identifier"),
        })?;

        persistence
            .touch_session(session_token)
            .map_err(Self::map_persistence_error)?;

        let authenticated: AuthenticatedUser = AuthenticatedUser::new(user_id, user.role);
        Ok((authenticated, user))
    }

    /// Logs out by deleting the session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to delete
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;
        Ok(())
    }

    /// Generates a random session token.
    fn generate_session_token() -> String {
        let high: u64 = rand::random();
        let low: u64 = rand::random();
        format!("session_{high:016x}{low:016x}")
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::SessionNotFound(msg) | PersistenceError::NotFound(msg) => {
                AuthError::AuthenticationFailed { reason: msg }
            }
            _ => AuthError::AuthenticationFailed {
                reason: format!("Database error: {err}"),
            },
        }
    }
}
