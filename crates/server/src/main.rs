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
#![allow(clippy::multiple_crate_versions)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use leadflow_api::request_response::{
    AddLeadNoteRequest, CreateLeadRequest, CreateLeadResponse, CreateTeamRequest,
    CreateTeamResponse, CreateUserRequest, CreateUserResponse, ImportLeadsRequest,
    ImportLeadsResponse, LeadInfo, LeadStatisticsResponse, ListLeadsResponse, ListTeamsResponse,
    ListUsersResponse, LoginRequest, LoginResponse, ManagerOverviewResponse, PreviewCsvRequest,
    PreviewCsvResponse, ReassignLeadRequest, TeamMemberRequest, TeamPerformanceResponse,
    UpdateLeadStatusRequest, UpdateTeamRequest,
};
use leadflow_api::{ApiError, AuthorizationService, handlers};
use leadflow_audit::Cause;
use leadflow_domain::{User, UserRole};
use leadflow_persistence::{AuditEventData, Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{error, info};

mod session;

use session::{SessionUser, bearer_token};

/// LeadFlow Server - HTTP server for the LeadFlow CRM backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Email for the bootstrap admin account, created at startup if missing
    #[arg(long, requires = "admin_password")]
    admin_email: Option<String>,

    /// Password for the bootstrap admin account
    #[arg(long, requires = "admin_email")]
    admin_password: Option<String>,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer for all records and sessions.
    persistence: Arc<Mutex<Persistence>>,
}

/// Monotonic counter used to correlate audit causes with requests.
static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Default number of events returned by the audit listing.
const DEFAULT_AUDIT_EVENTS: i64 = 50;

/// Builds an audit cause for one handled request.
fn request_cause(endpoint: &str) -> Cause {
    let request_number: u64 = REQUEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    Cause::new(
        format!("http-{request_number}"),
        format!("HTTP {endpoint} request"),
    )
}

/// Query parameters for the recent leads listing.
#[derive(Debug, Deserialize)]
struct RecentLeadsQuery {
    /// Maximum number of leads to return.
    limit: Option<i64>,
}

/// Query parameters for the recent audit events listing.
#[derive(Debug, Deserialize)]
struct RecentAuditQuery {
    /// Maximum number of events to return.
    limit: Option<i64>,
}

/// API response for write operations with no payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WriteResponse {
    /// Success indicator.
    success: bool,
    /// Optional message.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Serializable representation of an audit event for JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AuditEventResponse {
    /// The event ID.
    event_id: i64,
    /// The acting user, if any.
    actor_user_id: Option<i64>,
    /// The acting user's role at the time of the event.
    actor_role: String,
    /// The cause ID.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The action name.
    action: String,
    /// The subject the action applied to, e.g. `lead:42`.
    subject: String,
    /// Optional JSON details payload.
    details: Option<String>,
    /// When the event was recorded.
    created_at: String,
}

impl AuditEventResponse {
    fn from_data(event: AuditEventData) -> Self {
        Self {
            event_id: event.event_id,
            actor_user_id: event.actor_user_id,
            actor_role: event.actor_role,
            cause_id: event.cause_id,
            cause_description: event.cause_description,
            action: event.action,
            subject: event.subject,
            details: event.details,
            created_at: event.created_at,
        }
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. }
            | ApiError::NoEligibleAssignees
            | ApiError::PasswordPolicyViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. }
            | ApiError::InvalidCsvFormat { .. }
            | ApiError::MappingIncomplete { .. }
            | ApiError::DistributionNotImplemented { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        if let PersistenceError::NotFound(message) = err {
            return Self {
                status: StatusCode::NOT_FOUND,
                message,
            };
        }
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

/// Handler for POST /login endpoint.
///
/// Authenticates by email and password and opens a session.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(email = %req.email, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = handlers::login(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST /logout endpoint.
///
/// Deletes the session named by the bearer token.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<WriteResponse>, HttpError> {
    let token: String = String::from(bearer_token(&headers).map_err(|_| HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: String::from("Missing or malformed Authorization header"),
    })?);

    let mut persistence = app_state.persistence.lock().await;
    handlers::logout(&mut persistence, &token)?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(String::from("Logged out")),
    }))
}

/// Handler for POST /users endpoint.
///
/// Creates a user account.
async fn handle_create_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<CreateUserResponse>, HttpError> {
    info!(
        actor_id = actor.user_id,
        email = %req.email,
        role = %req.role,
        "Handling create_user request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateUserResponse =
        handlers::create_user(&mut persistence, &req, &actor, request_cause("create_user"))?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET /users endpoint.
async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
) -> Result<Json<ListUsersResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListUsersResponse = handlers::list_users(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST /leads/preview endpoint.
///
/// Parses an uploaded CSV and returns sample rows with an inferred
/// column mapping for confirmation.
async fn handle_preview_csv(
    SessionUser(actor, _user): SessionUser,
    Json(req): Json<PreviewCsvRequest>,
) -> Result<Json<PreviewCsvResponse>, HttpError> {
    info!(actor_id = actor.user_id, "Handling preview_csv request");

    let response: PreviewCsvResponse = handlers::preview_csv(&req, &actor)?;
    Ok(Json(response))
}

/// Handler for POST /leads/import endpoint.
///
/// Imports a CSV batch and distributes it across the target team.
async fn handle_import_leads(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Json(req): Json<ImportLeadsRequest>,
) -> Result<Json<ImportLeadsResponse>, HttpError> {
    info!(
        actor_id = actor.user_id,
        team_id = req.team_id,
        method = %req.method,
        "Handling import_leads request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ImportLeadsResponse = handlers::import_leads(
        &mut persistence,
        &req,
        &actor,
        request_cause("import_leads"),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST /leads endpoint.
///
/// Creates a single lead, assigning it when a team is given.
async fn handle_create_lead(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Json(req): Json<CreateLeadRequest>,
) -> Result<Json<CreateLeadResponse>, HttpError> {
    info!(
        actor_id = actor.user_id,
        email = %req.email,
        "Handling create_lead request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateLeadResponse =
        handlers::create_lead(&mut persistence, &req, &actor, request_cause("create_lead"))?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/leads/{lead_id}` endpoint.
async fn handle_get_lead(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_actor, _user): SessionUser,
    Path(lead_id): Path<i64>,
) -> Result<Json<LeadInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let lead: LeadInfo = handlers::get_lead(&mut persistence, lead_id)?;
    drop(persistence);

    Ok(Json(lead))
}

/// Handler for GET /leads/assigned endpoint.
///
/// Lists the leads assigned to the calling user.
async fn handle_assigned_leads(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
) -> Result<Json<ListLeadsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListLeadsResponse =
        handlers::list_assigned_leads(&mut persistence, actor.user_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET /leads/recent endpoint.
async fn handle_recent_leads(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_actor, _user): SessionUser,
    Query(query): Query<RecentLeadsQuery>,
) -> Result<Json<ListLeadsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListLeadsResponse = handlers::recent_leads(&mut persistence, query.limit)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET /leads/statistics endpoint.
async fn handle_lead_statistics(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
) -> Result<Json<LeadStatisticsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LeadStatisticsResponse =
        handlers::lead_statistics_report(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/leads/{lead_id}/status` endpoint.
async fn handle_update_lead_status(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(lead_id): Path<i64>,
    Json(req): Json<UpdateLeadStatusRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = actor.user_id,
        lead_id = lead_id,
        status = %req.status,
        "Handling update_lead_status request"
    );

    let mut persistence = app_state.persistence.lock().await;
    handlers::update_lead_status(
        &mut persistence,
        lead_id,
        &req,
        &actor,
        request_cause("update_lead_status"),
    )?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Lead {lead_id} moved to '{}'", req.status)),
    }))
}

/// Handler for POST `/leads/{lead_id}/notes` endpoint.
async fn handle_add_lead_note(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(lead_id): Path<i64>,
    Json(req): Json<AddLeadNoteRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    handlers::add_lead_note(
        &mut persistence,
        lead_id,
        &req,
        &actor,
        request_cause("add_lead_note"),
    )?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Note added to lead {lead_id}")),
    }))
}

/// Handler for POST `/leads/{lead_id}/reassign` endpoint.
async fn handle_reassign_lead(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(lead_id): Path<i64>,
    Json(req): Json<ReassignLeadRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = actor.user_id,
        lead_id = lead_id,
        assigned_to = req.assigned_to,
        "Handling reassign_lead request"
    );

    let mut persistence = app_state.persistence.lock().await;
    handlers::reassign_lead(
        &mut persistence,
        lead_id,
        &req,
        &actor,
        request_cause("reassign_lead"),
    )?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!(
            "Lead {lead_id} reassigned to user {}",
            req.assigned_to
        )),
    }))
}

/// Handler for POST /teams endpoint.
async fn handle_create_team(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Json(req): Json<CreateTeamRequest>,
) -> Result<Json<CreateTeamResponse>, HttpError> {
    info!(
        actor_id = actor.user_id,
        team_name = %req.name,
        manager_id = req.manager_id,
        "Handling create_team request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateTeamResponse =
        handlers::create_team(&mut persistence, &req, &actor, request_cause("create_team"))?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET /teams endpoint.
async fn handle_list_teams(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_actor, _user): SessionUser,
) -> Result<Json<ListTeamsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListTeamsResponse = handlers::list_teams(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/teams/{team_id}` endpoint.
async fn handle_update_team(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(team_id): Path<i64>,
    Json(req): Json<UpdateTeamRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = actor.user_id,
        team_id = team_id,
        "Handling update_team request"
    );

    let mut persistence = app_state.persistence.lock().await;
    handlers::update_team(
        &mut persistence,
        team_id,
        &req,
        &actor,
        request_cause("update_team"),
    )?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Team {team_id} updated")),
    }))
}

/// Handler for DELETE `/teams/{team_id}` endpoint.
async fn handle_delete_team(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(team_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = actor.user_id,
        team_id = team_id,
        "Handling delete_team request"
    );

    let mut persistence = app_state.persistence.lock().await;
    handlers::delete_team(
        &mut persistence,
        team_id,
        &actor,
        request_cause("delete_team"),
    )?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Team {team_id} deleted")),
    }))
}

/// Handler for POST `/teams/{team_id}/members` endpoint.
async fn handle_add_team_member(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(team_id): Path<i64>,
    Json(req): Json<TeamMemberRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = actor.user_id,
        team_id = team_id,
        user_id = req.user_id,
        "Handling add_team_member request"
    );

    let mut persistence = app_state.persistence.lock().await;
    handlers::add_team_member(
        &mut persistence,
        team_id,
        &req,
        &actor,
        request_cause("add_team_member"),
    )?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("User {} added to team {team_id}", req.user_id)),
    }))
}

/// Handler for DELETE `/teams/{team_id}/members` endpoint.
async fn handle_remove_team_member(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(team_id): Path<i64>,
    Json(req): Json<TeamMemberRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        actor_id = actor.user_id,
        team_id = team_id,
        user_id = req.user_id,
        "Handling remove_team_member request"
    );

    let mut persistence = app_state.persistence.lock().await;
    handlers::remove_team_member(
        &mut persistence,
        team_id,
        &req,
        &actor,
        request_cause("remove_team_member"),
    )?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("User {} removed from team {team_id}", req.user_id)),
    }))
}

/// Handler for GET `/teams/{team_id}/performance` endpoint.
async fn handle_team_performance(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(team_id): Path<i64>,
) -> Result<Json<TeamPerformanceResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: TeamPerformanceResponse =
        handlers::team_performance(&mut persistence, team_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/managers/{manager_id}/overview` endpoint.
async fn handle_manager_overview(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(manager_id): Path<i64>,
) -> Result<Json<ManagerOverviewResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ManagerOverviewResponse =
        handlers::manager_overview(&mut persistence, manager_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET /audit/recent endpoint.
///
/// Returns the most recent audit events, newest first.
async fn handle_recent_audit_events(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Query(query): Query<RecentAuditQuery>,
) -> Result<Json<Vec<AuditEventResponse>>, HttpError> {
    AuthorizationService::authorize_manage_users(&actor).map_err(ApiError::from)?;

    let mut persistence = app_state.persistence.lock().await;
    let events: Vec<AuditEventData> =
        persistence.recent_audit_events(query.limit.unwrap_or(DEFAULT_AUDIT_EVENTS))?;
    drop(persistence);

    let response: Vec<AuditEventResponse> = events
        .into_iter()
        .map(AuditEventResponse::from_data)
        .collect();
    Ok(Json(response))
}

/// Handler for GET `/audit/subject/{kind}/{id}` endpoint.
///
/// Returns the audit history of one record, e.g. `/audit/subject/lead/42`.
async fn handle_audit_events_for_subject(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path((kind, id)): Path<(String, i64)>,
) -> Result<Json<Vec<AuditEventResponse>>, HttpError> {
    AuthorizationService::authorize_manage_users(&actor).map_err(ApiError::from)?;

    let subject: String = format!("{kind}:{id}");
    let mut persistence = app_state.persistence.lock().await;
    let events: Vec<AuditEventData> = persistence.audit_events_for_subject(&subject)?;
    drop(persistence);

    let response: Vec<AuditEventResponse> = events
        .into_iter()
        .map(AuditEventResponse::from_data)
        .collect();
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/users", post(handle_create_user))
        .route("/users", get(handle_list_users))
        .route("/leads", post(handle_create_lead))
        .route("/leads/preview", post(handle_preview_csv))
        .route("/leads/import", post(handle_import_leads))
        .route("/leads/assigned", get(handle_assigned_leads))
        .route("/leads/recent", get(handle_recent_leads))
        .route("/leads/statistics", get(handle_lead_statistics))
        .route("/leads/{lead_id}", get(handle_get_lead))
        .route("/leads/{lead_id}/status", post(handle_update_lead_status))
        .route("/leads/{lead_id}/notes", post(handle_add_lead_note))
        .route("/leads/{lead_id}/reassign", post(handle_reassign_lead))
        .route("/teams", post(handle_create_team))
        .route("/teams", get(handle_list_teams))
        .route("/teams/{team_id}", put(handle_update_team))
        .route("/teams/{team_id}", delete(handle_delete_team))
        .route("/teams/{team_id}/members", post(handle_add_team_member))
        .route(
            "/teams/{team_id}/members",
            delete(handle_remove_team_member),
        )
        .route(
            "/teams/{team_id}/performance",
            get(handle_team_performance),
        )
        .route(
            "/managers/{manager_id}/overview",
            get(handle_manager_overview),
        )
        .route("/audit/recent", get(handle_recent_audit_events))
        .route(
            "/audit/subject/{kind}/{id}",
            get(handle_audit_events_for_subject),
        )
        .with_state(app_state)
}

/// Creates the bootstrap admin account if no account uses the email yet.
fn ensure_admin_account(
    persistence: &mut Persistence,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if persistence.get_user_by_email(email)?.is_some() {
        info!("Admin account {} already exists", email);
        return Ok(());
    }

    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
    let admin: User = User::new(
        String::from(email),
        String::from("Administrator"),
        UserRole::Admin,
        None,
    );
    let user_id: i64 = persistence.create_user(&admin, &password_hash)?;
    info!("Created bootstrap admin account {} ({})", user_id, email);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing LeadFlow Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let (Some(email), Some(password)) = (&args.admin_email, &args.admin_password) {
        ensure_admin_account(&mut persistence, email, password)?;
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use leadflow_api::csv_import::LeadField;
    use tower::ServiceExt;

    const PASSWORD: &str = "S3rver-test-passw0rd";

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
        }
    }

    /// Seeds a login-capable account directly in the store.
    async fn seed_user(app_state: &AppState, email: &str, role: UserRole) -> i64 {
        let password_hash: String = bcrypt::hash(PASSWORD, 4).unwrap();
        let user: User = User::new(String::from(email), format!("User {email}"), role, None);
        let mut persistence = app_state.persistence.lock().await;
        persistence.create_user(&user, &password_hash).unwrap()
    }

    /// Builds a request with an optional bearer token and JSON body.
    fn build_request(
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    /// Logs in over HTTP and returns the session token.
    async fn login(app: &Router, email: &str) -> String {
        let login_req: LoginRequest = LoginRequest {
            email: String::from(email),
            password: String::from(PASSWORD),
        };
        let response = app
            .clone()
            .oneshot(build_request(
                "POST",
                "/login",
                None,
                Some(serde_json::to_string(&login_req).unwrap()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let login_response: LoginResponse = serde_json::from_slice(&body_bytes).unwrap();
        login_response.session_token
    }

    #[tokio::test]
    async fn test_login_then_list_teams() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        seed_user(&app_state, "admin@example.com", UserRole::Admin).await;

        let token: String = login(&app, "admin@example.com").await;

        let response = app
            .oneshot(build_request("GET", "/teams", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let teams: ListTeamsResponse = serde_json::from_slice(&body_bytes).unwrap();
        assert!(teams.teams.is_empty());
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = app
            .oneshot(build_request("GET", "/teams", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        seed_user(&app_state, "admin@example.com", UserRole::Admin).await;

        let login_req: LoginRequest = LoginRequest {
            email: String::from("admin@example.com"),
            password: String::from("wrong password"),
        };
        let response = app
            .oneshot(build_request(
                "POST",
                "/login",
                None,
                Some(serde_json::to_string(&login_req).unwrap()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_invalidates_session() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        seed_user(&app_state, "admin@example.com", UserRole::Admin).await;

        let token: String = login(&app, "admin@example.com").await;

        let response = app
            .clone()
            .oneshot(build_request("POST", "/logout", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = app
            .oneshot(build_request("GET", "/teams", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_telemarketer_cannot_create_team() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        seed_user(&app_state, "caller@example.com", UserRole::Telemarketer).await;
        let manager_id: i64 =
            seed_user(&app_state, "manager@example.com", UserRole::SalesManager).await;

        let token: String = login(&app, "caller@example.com").await;

        let create_req: CreateTeamRequest = CreateTeamRequest {
            name: String::from("alpha"),
            manager_id,
            region: String::from("south"),
            program: String::from("engineering"),
            initial_members: Vec::new(),
        };
        let response = app
            .oneshot(build_request(
                "POST",
                "/teams",
                Some(&token),
                Some(serde_json::to_string(&create_req).unwrap()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_creates_team_and_lists_it() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        seed_user(&app_state, "admin@example.com", UserRole::Admin).await;
        let manager_id: i64 =
            seed_user(&app_state, "manager@example.com", UserRole::SalesManager).await;

        let token: String = login(&app, "admin@example.com").await;

        let create_req: CreateTeamRequest = CreateTeamRequest {
            name: String::from("alpha"),
            manager_id,
            region: String::from("south"),
            program: String::from("engineering"),
            initial_members: Vec::new(),
        };
        let response = app
            .clone()
            .oneshot(build_request(
                "POST",
                "/teams",
                Some(&token),
                Some(serde_json::to_string(&create_req).unwrap()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = app
            .oneshot(build_request("GET", "/teams", Some(&token), None))
            .await
            .unwrap();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let teams: ListTeamsResponse = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(teams.teams.len(), 1);
        assert_eq!(teams.teams[0].name, "alpha");
    }

    #[tokio::test]
    async fn test_csv_import_distributes_over_http() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        seed_user(&app_state, "admin@example.com", UserRole::Admin).await;
        let manager_id: i64 =
            seed_user(&app_state, "manager@example.com", UserRole::SalesManager).await;
        let caller_id: i64 =
            seed_user(&app_state, "caller@example.com", UserRole::Telemarketer).await;

        let token: String = login(&app, "admin@example.com").await;

        let create_req: CreateTeamRequest = CreateTeamRequest {
            name: String::from("alpha"),
            manager_id,
            region: String::from("south"),
            program: String::from("engineering"),
            initial_members: vec![caller_id],
        };
        let response = app
            .clone()
            .oneshot(build_request(
                "POST",
                "/teams",
                Some(&token),
                Some(serde_json::to_string(&create_req).unwrap()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let team: CreateTeamResponse = serde_json::from_slice(&body_bytes).unwrap();

        let import_req: ImportLeadsRequest = ImportLeadsRequest {
            csv_content: String::from(
                "name,email,phone\n\
                 Ada Lovelace,ada@example.com,+15550001111\n\
                 Charles Babbage,charles@example.com,+15550002222\n",
            ),
            mapping: vec![LeadField::Name, LeadField::Email, LeadField::Phone],
            team_id: team.team_id,
            method: String::from("round-robin"),
        };
        let response = app
            .clone()
            .oneshot(build_request(
                "POST",
                "/leads/import",
                Some(&token),
                Some(serde_json::to_string(&import_req).unwrap()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let import: ImportLeadsResponse = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(import.assigned, 2);
        assert_eq!(import.failed, 0);

        let response = app
            .oneshot(build_request("GET", "/leads/recent", Some(&token), None))
            .await
            .unwrap();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let leads: ListLeadsResponse = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(leads.leads.len(), 2);
    }

    #[tokio::test]
    async fn test_audit_trail_requires_admin() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        seed_user(&app_state, "caller@example.com", UserRole::Telemarketer).await;

        let token: String = login(&app, "caller@example.com").await;

        let response = app
            .oneshot(build_request("GET", "/audit/recent", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_unknown_lead_is_not_found() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        seed_user(&app_state, "admin@example.com", UserRole::Admin).await;

        let token: String = login(&app, "admin@example.com").await;

        let response = app
            .oneshot(build_request("GET", "/leads/999", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }
}
