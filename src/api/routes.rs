//! HTTP API route definitions.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{
    add_student, health, low_performers, metrics_text, remove_students_without_grades,
    student_grades, subject_grades, subject_statistics, AppState,
};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and metrics endpoints
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        // Grade book endpoints
        .route("/adicionar_aluno/", post(add_student))
        .route("/notas/:id_aluno", get(student_grades))
        .route("/disciplina/:disciplina", get(subject_grades))
        .route("/estatisticas/:disciplina", get(subject_statistics))
        .route("/desempenho_baixo", get(low_performers))
        .route("/remover_alunos_sem_notas", delete(remove_students_without_grades))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
