use axum::{
	Json, Router,
	body::Bytes,
	extract::{Path, Query, State, rejection::QueryRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::Serialize;
use serde_json::Value;

use crate::state::AppState;
use notes_service::{Error, FieldErrors, ListRequest, ListResponse, Note, WriteMode};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/api/notes", get(list).post(create))
		.route("/api/notes/", get(list).post(create))
		.route("/api/notes/{id}", get(retrieve).put(update).patch(partial_update).delete(destroy))
		.route("/api/notes/{id}/", get(retrieve).put(update).patch(partial_update).delete(destroy))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn list(
	State(state): State<AppState>,
	query: Result<Query<ListRequest>, QueryRejection>,
) -> Result<Json<ListResponse>, ApiError> {
	let Query(req) = query.map_err(|err| {
		json_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", err.body_text(), None)
	})?;
	let response = state.service.list(req).await?;

	Ok(Json(response))
}

async fn retrieve(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<Note>, ApiError> {
	let note = state.service.get(&id).await?;

	Ok(Json(note))
}

async fn create(
	State(state): State<AppState>,
	body: Bytes,
) -> Result<(StatusCode, Json<Note>), ApiError> {
	let payload = parse_body(&body)?;
	let note = state.service.create(&payload).await?;

	Ok((StatusCode::CREATED, Json(note)))
}

async fn update(
	State(state): State<AppState>,
	Path(id): Path<String>,
	body: Bytes,
) -> Result<Json<Note>, ApiError> {
	let payload = parse_body(&body)?;
	let note = state.service.update(&id, &payload, WriteMode::Full).await?;

	Ok(Json(note))
}

async fn partial_update(
	State(state): State<AppState>,
	Path(id): Path<String>,
	body: Bytes,
) -> Result<Json<Note>, ApiError> {
	let payload = parse_body(&body)?;
	let note = state.service.update(&id, &payload, WriteMode::Partial).await?;

	Ok(Json(note))
}

async fn destroy(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
	state.service.delete(&id).await?;

	Ok(StatusCode::NO_CONTENT)
}

/// Reads a JSON request body. An empty body counts as `{}`.
fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
	if body.iter().all(u8::is_ascii_whitespace) {
		return Ok(Value::Object(Default::default()));
	}

	serde_json::from_slice(body).map_err(|err| {
		json_error(
			StatusCode::BAD_REQUEST,
			"INVALID_REQUEST",
			format!("Request body is not valid JSON: {err}."),
			None,
		)
	})
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<FieldErrors>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<FieldErrors>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<FieldErrors>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		let summary = err.to_string();

		match err {
			Error::InvalidRequest { message } =>
				json_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message, None),
			Error::Validation { fields } =>
				json_error(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", summary, Some(fields)),
			Error::NotFound { message } =>
				json_error(StatusCode::NOT_FOUND, "NOT_FOUND", message, None),
			Error::Upstream { message } =>
				json_error(StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", message, None),
			Error::Internal { message } => {
				tracing::error!(%message, "Note operation failed internally.");

				json_error(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message, None)
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn json_error(
	status: StatusCode,
	code: &str,
	message: impl Into<String>,
	fields: Option<FieldErrors>,
) -> ApiError {
	ApiError::new(status, code, message, fields)
}
