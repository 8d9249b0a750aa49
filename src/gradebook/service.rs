//! Grade book operations.
//!
//! Each operation loads the full collection, scans it linearly and, if it
//! mutates, saves the full collection back.

use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use crate::error::GradebookError;
use crate::metrics;
use crate::storage::StudentStore;

use super::stats::{self, LOW_GRADE_THRESHOLD};
use super::types::{Grades, NewStudent, Student, StudentGrades, SubjectGrades, SubjectStatistics};

/// Result type for grade book operations.
pub type GradebookResult<T> = std::result::Result<T, GradebookError>;

/// Validate, round and append a new student. Returns the stored record.
#[instrument(skip(store, request), fields(student_id = request.student_id))]
pub fn add_student(store: &dyn StudentStore, request: NewStudent) -> GradebookResult<Student> {
    let mut students = store.load()?;

    if students.iter().any(|s| s.student_id == request.student_id) {
        warn!("duplicate student id");
        metrics::inc_students_rejected();
        return Err(GradebookError::DuplicateId(request.student_id));
    }

    let mut grades = Grades::new();
    for (subject, raw) in &request.grades {
        let grade = Some(*raw)
            .filter(|raw| stats::is_valid_grade(*raw))
            .and_then(stats::grade_from_f64);
        match grade {
            Some(grade) => {
                grades.insert(subject.clone(), grade);
            }
            None => {
                warn!(subject = %subject, grade = *raw, "grade out of range");
                metrics::inc_students_rejected();
                return Err(GradebookError::GradeOutOfRange {
                    subject: subject.clone(),
                    grade: *raw,
                });
            }
        }
    }

    let student = Student::new(request.student_id, request.student_name, grades);
    students.push(student.clone());
    store.save(&students)?;

    info!(name = %student.student_name, subjects = student.grades.len(), "student added");
    metrics::inc_students_added();
    Ok(student)
}

/// Name and grades of the first student with `student_id`.
#[instrument(skip(store))]
pub fn grades_by_student(store: &dyn StudentStore, student_id: i64) -> GradebookResult<StudentGrades> {
    store
        .load()?
        .into_iter()
        .find(|s| s.student_id == student_id)
        .map(|s| StudentGrades {
            student_name: s.student_name,
            grades: s.grades,
        })
        .ok_or(GradebookError::StudentNotFound(student_id))
}

/// Every student's grade in `subject`, ascending by grade.
#[instrument(skip(store))]
pub fn grades_by_subject(store: &dyn StudentStore, subject: &str) -> GradebookResult<SubjectGrades> {
    let mut grades = SubjectGrades::default();
    for student in store.load()? {
        if let Some(grade) = student.grade(subject) {
            grades.insert(&student.student_name, grade);
        }
    }

    if grades.is_empty() {
        return Err(GradebookError::SubjectNotFound(subject.to_string()));
    }

    grades.sort_ascending();
    debug!(count = grades.len(), "collected subject grades");
    Ok(grades)
}

/// Mean, median and sample standard deviation of `subject`.
///
/// Fails with [`GradebookError::InsufficientSamples`] when only one student
/// is graded in the subject.
#[instrument(skip(store))]
pub fn subject_statistics(
    store: &dyn StudentStore,
    subject: &str,
) -> GradebookResult<SubjectStatistics> {
    let values: Vec<Decimal> = store
        .load()?
        .iter()
        .filter_map(|s| s.grade(subject))
        .collect();

    if values.is_empty() {
        return Err(GradebookError::SubjectNotFound(subject.to_string()));
    }

    stats::summarize(&values).ok_or_else(|| GradebookError::InsufficientSamples {
        subject: subject.to_string(),
        count: values.len(),
    })
}

/// Students with at least one grade below [`LOW_GRADE_THRESHOLD`].
#[instrument(skip(store))]
pub fn low_performers(store: &dyn StudentStore) -> GradebookResult<Vec<Student>> {
    let students: Vec<Student> = store
        .load()?
        .into_iter()
        .filter(|s| s.has_grade_below(LOW_GRADE_THRESHOLD))
        .collect();

    if students.is_empty() {
        return Err(GradebookError::NoLowPerformers);
    }

    debug!(count = students.len(), "found low performers");
    Ok(students)
}

/// Drop every student without grades. Returns how many were removed.
#[instrument(skip(store))]
pub fn remove_students_without_grades(store: &dyn StudentStore) -> GradebookResult<usize> {
    let (graded, ungraded): (Vec<Student>, Vec<Student>) =
        store.load()?.into_iter().partition(Student::has_grades);

    if ungraded.is_empty() {
        return Err(GradebookError::NoGradelessStudents);
    }

    store.save(&graded)?;

    info!(removed = ungraded.len(), remaining = graded.len(), "removed students without grades");
    metrics::inc_students_removed(ungraded.len() as u64);
    Ok(ungraded.len())
}
