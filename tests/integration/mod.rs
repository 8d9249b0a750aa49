//! Integration tests for the grade book HTTP API.
//!
//! Each test drives the router over a JSON data file in a temporary
//! directory, the same way the server runs in production.
//! Run with: cargo test --test integration

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use grade_book::api::{create_router, AppState};
use grade_book::gradebook::Student;
use grade_book::storage::{JsonFileStore, StudentStore};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

/// Test fixture: router plus a handle on its data file.
struct Fixture {
    _dir: TempDir,
    store: JsonFileStore,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path().join("bd.json"));
        Self { _dir: dir, store }
    }

    /// Fixture whose data file already holds `raw`.
    fn with_file(raw: &str) -> Self {
        let fixture = Self::new();
        std::fs::write(fixture.store.path(), raw).expect("write data file");
        fixture
    }

    fn router(&self) -> Router {
        create_router(AppState::new(self.store.clone()))
    }

    fn stored(&self) -> Vec<Student> {
        self.store.load().expect("load data file")
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn add(&self, student: Value) -> (StatusCode, Value) {
        self.send(Method::POST, "/adicionar_aluno/", Some(student)).await
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }
}

#[tokio::test]
async fn add_then_fetch_by_id() {
    let fx = Fixture::new();

    let (status, stored) = fx
        .add(json!({"id_aluno": 1, "nome_aluno": "Ana", "notas": {"Math": 7.26, "Art": 7.24}}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["notas"], json!({"Art": 7.2, "Math": 7.3}));

    let (status, fetched) = fx.get("/notas/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        fetched,
        json!({"nome_aluno": "Ana", "notas": {"Art": 7.2, "Math": 7.3}})
    );
}

#[tokio::test]
async fn duplicate_id_is_rejected() {
    let fx = Fixture::new();
    fx.add(json!({"id_aluno": 1, "nome_aluno": "Ana", "notas": {}}))
        .await;

    let (status, body) = fx
        .add(json!({"id_aluno": 1, "nome_aluno": "Bia", "notas": {"Math": 99}}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "ID de aluno já existente"}));
    assert_eq!(fx.stored().len(), 1);
}

#[tokio::test]
async fn out_of_range_grade_persists_nothing() {
    let fx = Fixture::new();

    let (status, body) = fx
        .add(json!({"id_aluno": 1, "nome_aluno": "Ana", "notas": {"Math": 8, "Art": 10.5}}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "As notas devem estar entre 0 e 10"}));
    assert!(!fx.store.path().exists());
}

#[tokio::test]
async fn extreme_out_of_range_grades_are_rejected() {
    let fx = Fixture::new();

    for (id, grade) in [(1, -1e-30), (2, 1e30)] {
        let (status, body) = fx
            .add(json!({"id_aluno": id, "nome_aluno": "Ana", "notas": {"M": grade}}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{grade}");
        assert_eq!(body, json!({"detail": "As notas devem estar entre 0 e 10"}));
    }

    assert!(!fx.store.path().exists());
}

#[tokio::test]
async fn grades_round_like_binary_floats() {
    let fx = Fixture::new();

    let (status, stored) = fx
        .add(json!({"id_aluno": 1, "nome_aluno": "Ana", "notas": {"M": 7.35, "P": 0.05}}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["notas"], json!({"M": 7.3, "P": 0.1}));

    let (_, fetched) = fx.get("/notas/1").await;
    assert_eq!(fetched["notas"], json!({"M": 7.3, "P": 0.1}));
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let fx = Fixture::new();

    let (status, body) = fx.add(json!({"nome_aluno": "Ana"})).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
    assert!(!fx.store.path().exists());
}

#[tokio::test]
async fn malformed_path_is_rejected_with_detail() {
    let fx = Fixture::new();

    let (status, body) = fx.get("/notas/abc").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn subject_listing_is_ordered_by_grade() {
    let fx = Fixture::new();
    for (id, name, grade) in [(1, "A", 5), (2, "B", 9), (3, "C", 7)] {
        fx.add(json!({"id_aluno": id, "nome_aluno": name, "notas": {"X": grade}}))
            .await;
    }

    let response = fx
        .router()
        .oneshot(
            Request::builder()
                .uri("/disciplina/X")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(
        std::str::from_utf8(&bytes).expect("utf8"),
        r#"{"A":5.0,"C":7.0,"B":9.0}"#
    );
}

#[tokio::test]
async fn statistics_for_subject() {
    let fx = Fixture::new();
    for (id, grade) in [(1, 6), (2, 7), (3, 8)] {
        fx.add(json!({"id_aluno": id, "nome_aluno": format!("S{id}"), "notas": {"X": grade}}))
            .await;
    }

    let (status, body) = fx.get("/estatisticas/X").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"media": 7.0, "mediana": 7.0, "desvio_padrao": 1.0}));
}

#[tokio::test]
async fn low_performance_endpoint() {
    let fx = Fixture::new();
    fx.add(json!({"id_aluno": 1, "nome_aluno": "Ana", "notas": {"Math": 5.5}}))
        .await;
    fx.add(json!({"id_aluno": 2, "nome_aluno": "Bia", "notas": {"Math": 6}}))
        .await;

    let (status, body) = fx.get("/desempenho_baixo").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"id_aluno": 1, "nome_aluno": "Ana", "notas": {"Math": 5.5}}])
    );
}

#[tokio::test]
async fn remove_students_without_grades() {
    let fx = Fixture::with_file(
        r#"[
            {"id_aluno": 1, "nome_aluno": "Ana", "notas": {}},
            {"id_aluno": 2, "nome_aluno": "Bia", "notas": {"Math": 8}},
            {"id_aluno": 3, "nome_aluno": "Caio"}
        ]"#,
    );

    let (status, body) = fx
        .send(Method::DELETE, "/remover_alunos_sem_notas", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Alunos sem notas removidos com sucesso"}));

    let remaining = fx.stored();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].student_id, 2);

    let (status, _) = fx
        .send(Method::DELETE, "/remover_alunos_sem_notas", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn not_found_conditions() {
    let fx = Fixture::new();

    for uri in ["/notas/7", "/disciplina/History", "/estatisticas/History", "/desempenho_baixo"] {
        let (status, body) = fx.get(uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body["detail"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn corrupt_data_file_is_a_server_error() {
    let fx = Fixture::with_file("[{\"id_aluno\": ");

    let (status, body) = fx.get("/notas/1").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap_or_default().contains("parse"));
}
