//! Student grade book service.
//!
//! Students with per-subject grades are kept as one JSON list in a flat file.
//! Every request reads the whole list, scans it, and rewrites the whole list
//! when it changes something.
//!
//! ```text
//! POST   /adicionar_aluno/            add a student (grades rounded to 0.1)
//! GET    /notas/:id_aluno             grades of one student
//! GET    /disciplina/:disciplina      grades of one subject, ascending
//! GET    /estatisticas/:disciplina    mean / median / sample std dev
//! GET    /desempenho_baixo            students with any grade below 6.0
//! DELETE /remover_alunos_sem_notas    drop students without grades
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`gradebook`]: Student records, statistics and operations
//! - [`storage`]: Whole-collection load/save backends
//! - [`api`]: HTTP API
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod gradebook;
pub mod metrics;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
