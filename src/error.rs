//! Unified error types for the grade book.

use thiserror::Error;

/// Unified error type for the grade book service.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Grade book operation error.
    #[error("grade book error: {0}")]
    Gradebook(#[from] GradebookError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Backing file errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the data file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Path of the data file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The data file is not a valid JSON list of students.
    #[error("failed to parse {path}: {source}")]
    Json {
        /// Path of the data file.
        path: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A blocking store call did not complete.
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Injected failure (memory store only).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Failures of the grade book operations.
///
/// The `Display` text of the client-facing variants is the message returned
/// in the `detail` field of HTTP error bodies.
#[derive(Error, Debug)]
pub enum GradebookError {
    /// A stored student already uses this id.
    #[error("ID de aluno já existente")]
    DuplicateId(i64),

    /// A submitted grade is outside `[0, 10]`.
    #[error("As notas devem estar entre 0 e 10")]
    GradeOutOfRange {
        /// Subject of the offending grade.
        subject: String,
        /// The rejected value, as submitted.
        grade: f64,
    },

    /// No student has this id.
    #[error("Aluno não encontrado")]
    StudentNotFound(i64),

    /// No student is graded in this subject.
    #[error("Disciplina não encontrada")]
    SubjectNotFound(String),

    /// Standard deviation needs at least two grades.
    #[error("Disciplina {subject} possui {count} nota, são necessárias ao menos duas para calcular estatísticas")]
    InsufficientSamples {
        /// Subject queried.
        subject: String,
        /// Number of grades found.
        count: usize,
    },

    /// No student has a grade below the threshold.
    #[error("Nenhum aluno com desempenho abaixo da nota mínima")]
    NoLowPerformers,

    /// Every student already has at least one grade.
    #[error("Nenhum aluno sem notas encontrado")]
    NoGradelessStudents,

    /// Backing store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl GradebookError {
    /// HTTP status code for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            GradebookError::DuplicateId(_) | GradebookError::GradeOutOfRange { .. } => 400,
            GradebookError::StudentNotFound(_)
            | GradebookError::SubjectNotFound(_)
            | GradebookError::NoLowPerformers
            | GradebookError::NoGradelessStudents => 404,
            GradebookError::InsufficientSamples { .. } => 422,
            GradebookError::Storage(_) => 500,
        }
    }

    /// Whether the failure was caused by the request rather than the backend.
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
