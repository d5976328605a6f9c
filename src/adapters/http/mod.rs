pub mod api;
pub mod forms;
pub mod handlers;
pub mod views;

use crate::core::{ConfigProvider, Directory};
use crate::utils::error::{RegistryError, Result};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use views::Views;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<Directory>,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn page_error(&self, error: RegistryError) -> PageError {
        PageError {
            error,
            views: Arc::clone(&self.views),
        }
    }
}

/// Fails with a [`PageError`] rendered by the shared views.
pub trait OrPage<T> {
    fn or_page(self, state: &AppState) -> std::result::Result<T, PageError>;
}

impl<T> OrPage<T> for Result<T> {
    fn or_page(self, state: &AppState) -> std::result::Result<T, PageError> {
        self.map_err(|e| state.page_error(e))
    }
}

pub type PageResult = std::result::Result<Response, PageError>;

/// Compiles the page templates and wires every route.
pub fn router(directory: Arc<Directory>) -> Result<Router> {
    let state = AppState {
        directory,
        views: Arc::new(Views::new()?),
    };

    let app = Router::new()
        .route("/", get(handlers::index))
        .route("/students", get(handlers::list_students).post(handlers::create_student))
        .route("/students/new", get(handlers::new_student))
        .route(
            "/instructors",
            get(handlers::list_instructors).post(handlers::create_instructor),
        )
        .route("/instructors/new", get(handlers::new_instructor))
        .route("/courses", get(handlers::list_courses).post(handlers::create_course))
        .route("/courses/new", get(handlers::new_course))
        .route("/courses/{id}", get(handlers::course_details))
        .route(
            "/courses/{id}/enroll",
            get(handlers::enroll_form).post(handlers::enroll),
        )
        .route("/people/{id}/sign-in", post(api::sign_in))
        .route("/api/students", get(api::students))
        .route("/api/instructors", get(api::instructors))
        .route("/api/courses", get(api::courses))
        .route("/api/courses/{id}", get(api::course))
        .layer(TraceLayer::new_for_http())
        .with_state(state);
    Ok(app)
}

pub(crate) fn status_for(err: &RegistryError) -> StatusCode {
    match err {
        RegistryError::NotFound { .. } => StatusCode::NOT_FOUND,
        RegistryError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn log_rejection(err: &RegistryError, status: StatusCode) {
    if status.is_server_error() {
        tracing::error!("Request failed: {} (Category: {:?})", err, err.category());
    } else {
        tracing::debug!("Request rejected: {}", err);
    }
}

/// HTML flavoured error for the page routes.
pub struct PageError {
    error: RegistryError,
    views: Arc<Views>,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = status_for(&self.error);
        log_rejection(&self.error, status);

        let title = match status {
            StatusCode::NOT_FOUND => "Not Found",
            StatusCode::UNPROCESSABLE_ENTITY => "Invalid Input",
            _ => "Error",
        };
        let message = self.error.user_friendly_message();
        match self.views.error_page(title, &message) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Could not render the error page: {}", e);
                (status, message).into_response()
            }
        }
    }
}

/// 303 to `path` carrying a one-shot message for the next page.
pub fn redirect_with_notice(path: &str, notice: &str) -> Response {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("notice", notice)
        .finish();
    Redirect::to(&format!("{}?{}", path, query)).into_response()
}

/// Binds the listener and serves until Ctrl-C.
pub async fn serve<C: ConfigProvider>(config: &C, directory: Arc<Directory>) -> Result<()> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(directory)?)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| RegistryError::ServerError {
            message: e.to_string(),
        })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
