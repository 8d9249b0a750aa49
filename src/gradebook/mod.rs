//! Student records and the operations over them.
//!
//! This module handles:
//! - Record and response types
//! - Grade rounding and subject statistics
//! - The load/scan/save operations behind each endpoint

pub mod service;
pub mod stats;
pub mod types;

pub use service::{
    add_student, grades_by_student, grades_by_subject, low_performers,
    remove_students_without_grades, subject_statistics, GradebookResult,
};
pub use stats::LOW_GRADE_THRESHOLD;
pub use types::{Grades, NewStudent, Student, StudentGrades, SubjectGrades, SubjectStatistics};
