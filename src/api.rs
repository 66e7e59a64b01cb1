// 🌐 HTTP surface for the Account Resource Service
//
//   GET    /accounts        list
//   POST   /accounts        create
//   GET    /accounts/:id    get one
//   PUT    /accounts/:id    partial update
//   DELETE /accounts/:id    delete
//   GET    /health          liveness

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::entities::{Account, AccountUpdate, NewAccount};
use crate::error::ServiceError;
use crate::schema::ValidationError;
use crate::service::AccountService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
}

impl AppState {
    pub fn new(accounts: AccountService) -> Self {
        AppState { accounts }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Serialize)]
struct AccountList {
    accounts: Vec<Account>,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<ValidationError>,
}

/// Errors as seen at the request boundary
#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    /// Body could not be decoded into the expected shape
    BadRequest(String),
    /// Path parameter is not an account id, so no such resource can exist
    InvalidId(String),
    NotRoutable,
    /// Known path, but no handler for the request method
    MethodNotAllowed,
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidId(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::Service(ServiceError::Validation(errors)) => {
                (StatusCode::BAD_REQUEST, "invalid account".to_string(), errors)
            }
            ApiError::Service(err @ ServiceError::NotFound(_)) => {
                tracing::warn!("{}", err);
                (StatusCode::NOT_FOUND, err.to_string(), Vec::new())
            }
            ApiError::Service(ServiceError::Storage(err)) => {
                tracing::error!("{:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    Vec::new(),
                )
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message, Vec::new()),
            ApiError::InvalidId(message) => {
                tracing::warn!("unusable account id: {}", message);
                (StatusCode::NOT_FOUND, "account not found".to_string(), Vec::new())
            }
            ApiError::NotRoutable => (StatusCode::NOT_FOUND, "not found".to_string(), Vec::new()),
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "method not allowed".to_string(),
                Vec::new(),
            ),
        };

        (status, Json(ErrorBody { error, details })).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health - Health check
async fn health_check() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// GET /accounts - All accounts in insertion order
async fn list_accounts(State(state): State<AppState>) -> ApiResult<Json<AccountList>> {
    let accounts = state.accounts.list()?;
    Ok(Json(AccountList { accounts }))
}

/// POST /accounts - Create an account
async fn create_account(
    State(state): State<AppState>,
    body: Result<Json<NewAccount>, JsonRejection>,
) -> ApiResult<Json<Account>> {
    let Json(new) = body?;
    let account = state.accounts.create(new)?;
    Ok(Json(account))
}

/// GET /accounts/:id - One account
async fn get_account(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Account>> {
    let Path(id) = id?;
    Ok(Json(state.accounts.get(id)?))
}

/// PUT /accounts/:id - Partial update
async fn update_account(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<AccountUpdate>, JsonRejection>,
) -> ApiResult<Json<Account>> {
    let Path(id) = id?;
    let Json(update) = body?;
    Ok(Json(state.accounts.update(id, update)?))
}

/// DELETE /accounts/:id - Remove an account, echoing what was removed
async fn delete_account(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Account>> {
    let Path(id) = id?;
    Ok(Json(state.accounts.delete(id)?))
}

async fn not_routable() -> ApiError {
    ApiError::NotRoutable
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

// ============================================================================
// Router
// ============================================================================

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check).fallback(method_not_allowed))
        .route(
            "/accounts",
            get(list_accounts)
                .post(create_account)
                .fallback(method_not_allowed),
        )
        .route(
            "/accounts/:id",
            get(get_account)
                .put(update_account)
                .delete(delete_account)
                .fallback(method_not_allowed),
        )
        .fallback(not_routable)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
