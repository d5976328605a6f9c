use crate::adapters::http::forms::parse_reference;
use crate::adapters::http::AppState;
use crate::core::{Course, CourseId, Instructor, PersonId, SignIn, SignInAck, Student};
use crate::utils::error::{EntityKind, RegistryError};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::sync::Arc;

/// JSON flavoured error body for the `/api` and sign-in routes.
#[derive(Debug)]
pub struct ApiError(pub RegistryError);

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = super::status_for(&self.0);
        super::log_rejection(&self.0, status);
        let body = json!({
            "error": self.0.to_string(),
            "message": self.0.user_friendly_message(),
        });
        (status, Json(body)).into_response()
    }
}

pub async fn students(State(state): State<AppState>) -> Json<Vec<Arc<Student>>> {
    Json(state.directory.list_students())
}

pub async fn instructors(State(state): State<AppState>) -> Json<Vec<Arc<Instructor>>> {
    Json(state.directory.list_instructors())
}

pub async fn courses(State(state): State<AppState>) -> Json<Vec<Course>> {
    Json(state.directory.list_courses())
}

pub async fn course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Course>, ApiError> {
    let id = parse_reference(EntityKind::Course, "id", Some(&id))?;
    Ok(Json(state.directory.get_course(CourseId(id))?))
}

pub async fn sign_in(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<SignInAck>), ApiError> {
    let id = parse_reference(EntityKind::Person, "id", Some(&id))?;
    let member = state.directory.find_member(PersonId(id))?;
    Ok((StatusCode::OK, Json(member.sign_in())))
}
