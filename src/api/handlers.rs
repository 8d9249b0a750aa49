//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::extract::{ApiJson, ApiPath};
use crate::error::{GradebookError, StorageError};
use crate::gradebook::{
    self, GradebookResult, NewStudent, Student, StudentGrades, SubjectGrades, SubjectStatistics,
};
use crate::metrics;
use crate::storage::StudentStore;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Backing store, re-read on every request.
    pub store: Arc<dyn StudentStore>,
    /// Prometheus render handle, when metrics are enabled.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state over `store`.
    pub fn new(store: impl StudentStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
            prometheus: None,
        }
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: String,
}

/// Plain message response.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human readable outcome.
    pub message: String,
}

/// Error body, `{"detail": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Failure description.
    pub detail: String,
}

impl IntoResponse for GradebookError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if !self.is_client_error() {
            error!("request failed: {}", self);
        }
        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Prometheus metrics handler - 404 when metrics are disabled.
pub async fn metrics_text(State(state): State<AppState>) -> Response {
    match &state.prometheus {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Run a grade book operation on the blocking pool.
///
/// Stores do synchronous file IO, so every call leaves the async workers.
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T, GradebookError>
where
    T: Send + 'static,
    F: FnOnce(&dyn StudentStore) -> GradebookResult<T> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || op(store.as_ref()))
        .await
        .map_err(StorageError::from)?
}

/// `POST /adicionar_aluno/` - store a new student.
pub async fn add_student(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<NewStudent>,
) -> Result<Json<Student>, GradebookError> {
    let _timer = metrics::timer_http("add_student");
    with_store(&state, move |store| gradebook::add_student(store, request))
        .await
        .map(Json)
}

/// `GET /notas/:id_aluno` - grades of one student.
pub async fn student_grades(
    State(state): State<AppState>,
    ApiPath(student_id): ApiPath<i64>,
) -> Result<Json<StudentGrades>, GradebookError> {
    let _timer = metrics::timer_http("student_grades");
    with_store(&state, move |store| gradebook::grades_by_student(store, student_id))
        .await
        .map(Json)
}

/// `GET /disciplina/:disciplina` - grades of one subject, ascending.
pub async fn subject_grades(
    State(state): State<AppState>,
    ApiPath(subject): ApiPath<String>,
) -> Result<Json<SubjectGrades>, GradebookError> {
    let _timer = metrics::timer_http("subject_grades");
    with_store(&state, move |store| gradebook::grades_by_subject(store, &subject))
        .await
        .map(Json)
}

/// `GET /estatisticas/:disciplina` - mean, median and std dev of a subject.
pub async fn subject_statistics(
    State(state): State<AppState>,
    ApiPath(subject): ApiPath<String>,
) -> Result<Json<SubjectStatistics>, GradebookError> {
    let _timer = metrics::timer_http("subject_statistics");
    with_store(&state, move |store| gradebook::subject_statistics(store, &subject))
        .await
        .map(Json)
}

/// `GET /desempenho_baixo` - students with any grade below 6.0.
pub async fn low_performers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Student>>, GradebookError> {
    let _timer = metrics::timer_http("low_performers");
    with_store(&state, gradebook::low_performers).await.map(Json)
}

/// `DELETE /remover_alunos_sem_notas` - drop students without grades.
pub async fn remove_students_without_grades(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, GradebookError> {
    let _timer = metrics::timer_http("remove_students_without_grades");
    with_store(&state, gradebook::remove_students_without_grades).await?;
    Ok(Json(MessageResponse {
        message: "Alunos sem notas removidos com sucesso".to_string(),
    }))
}
