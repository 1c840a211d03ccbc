//! HTTP routes and handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;

use crate::auth::{self, AuthError, Identity};
use crate::data::persist;
use crate::models::{NewQuestion, Question};
use crate::selection::{self, SelectionError};

use super::state::AppState;

/// Count applied when the query string carries none.
const DEFAULT_COUNT: usize = 5;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/questions", get(get_questions).post(create_question))
        .with_state(state)
}

/// Caller-facing error: an HTTP status plus a `detail` message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Unauthenticated(String),
    Forbidden(String),
    BadRequest(String),
    NotFound(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn detail(self) -> String {
        match self {
            ApiError::Unauthenticated(detail)
            | ApiError::Forbidden(detail)
            | ApiError::BadRequest(detail)
            | ApiError::NotFound(detail) => detail,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "detail": self.detail() }))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Unauthenticated(err.to_string())
    }
}

impl From<SelectionError> for ApiError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::InvalidCount(_) | SelectionError::NotEnough { .. } => {
                ApiError::BadRequest(err.to_string())
            }
            SelectionError::NoMatches { .. } => ApiError::NotFound(err.to_string()),
        }
    }
}

/// Pretty-printed JSON responder, for readability of the question payloads.
pub struct PrettyJson<T>(pub T);

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_string_pretty(&self.0) {
            Ok(body) => {
                ([(header::CONTENT_TYPE, "application/json")], body).into_response()
            }
            Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
        }
    }
}

async fn root() -> PrettyJson<serde_json::Value> {
    PrettyJson(json!({
        "message": "Questionnaire API is running. See the README for endpoint documentation.",
        "health": "/health",
        "questions": "/questions",
    }))
}

async fn health() -> PrettyJson<serde_json::Value> {
    PrettyJson(json!({ "status": "ok" }))
}

fn authenticate_request(state: &AppState, headers: &HeaderMap) -> Result<Identity, ApiError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    Ok(auth::authenticate(&state.auth, header)?)
}

/// The assembled `GET /questions` parameters.
#[derive(Debug, PartialEq, Eq)]
struct QuestionsQuery {
    use_: String,
    subjects: Vec<String>,
    count: usize,
}

/// Assemble the query from raw key/value pairs.
///
/// Read as pairs rather than a struct so the repeatable `subject` key
/// survives; unknown keys are ignored.
fn parse_questions_query(params: Vec<(String, String)>) -> Result<QuestionsQuery, ApiError> {
    let mut use_ = None;
    let mut subjects = Vec::new();
    let mut count_raw = None;

    for (key, value) in params {
        match key.as_str() {
            "use" => use_ = Some(value),
            "subject" => subjects.push(value),
            "count" => count_raw = Some(value),
            _ => {}
        }
    }

    let use_ = use_.ok_or_else(|| {
        ApiError::BadRequest("missing required query parameter 'use'".to_string())
    })?;
    if subjects.is_empty() {
        return Err(ApiError::BadRequest(
            "missing required query parameter 'subject'".to_string(),
        ));
    }
    let count = match count_raw {
        None => DEFAULT_COUNT,
        Some(raw) => raw.trim().parse().map_err(|_| {
            ApiError::BadRequest(format!("count must be an integer, got '{}'", raw))
        })?,
    };

    Ok(QuestionsQuery {
        use_,
        subjects,
        count,
    })
}

async fn get_questions(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Result<PrettyJson<Vec<Question>>, ApiError> {
    authenticate_request(&state, &headers)?;
    let query = parse_questions_query(params)?;

    let store = state.store.read().await;
    let selected = selection::select(
        store.all(),
        &query.use_,
        &query.subjects,
        query.count,
        &mut rand::thread_rng(),
    )?;
    Ok(PrettyJson(selected))
}

async fn create_question(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<NewQuestion>, JsonRejection>,
) -> Result<(StatusCode, PrettyJson<Question>), ApiError> {
    let identity = authenticate_request(&state, &headers)?;
    if !identity.is_admin {
        return Err(ApiError::Forbidden(
            "Admin privileges required to create a question".to_string(),
        ));
    }

    let Json(new_question) =
        payload.map_err(|_| ApiError::BadRequest("invalid JSON body".to_string()))?;

    let (created, snapshot) = {
        let mut store = state.store.write().await;
        let created = store.append(new_question);
        (created, store.all().to_vec())
    };
    persist::persist_questions(&snapshot);

    Ok((StatusCode::CREATED, PrettyJson(created)))
}
