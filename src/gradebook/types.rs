//! Student records and query results.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Grades of one student, keyed by subject name.
pub type Grades = BTreeMap<String, Decimal>;

/// A stored student record.
///
/// Field names on the wire and on disk are the ones the service has always
/// used (`id_aluno`, `nome_aluno`, `notas`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Unique student identifier.
    #[serde(rename = "id_aluno")]
    pub student_id: i64,
    /// Display name.
    #[serde(rename = "nome_aluno")]
    pub student_name: String,
    /// Grade per subject. A record without the key loads as ungraded.
    #[serde(rename = "notas", default)]
    pub grades: Grades,
}

impl Student {
    /// Create a student with the given grades.
    pub fn new(student_id: i64, student_name: impl Into<String>, grades: Grades) -> Self {
        Self {
            student_id,
            student_name: student_name.into(),
            grades,
        }
    }

    /// Whether at least one grade is recorded.
    pub fn has_grades(&self) -> bool {
        !self.grades.is_empty()
    }

    /// Grade in `subject`, if any.
    pub fn grade(&self, subject: &str) -> Option<Decimal> {
        self.grades.get(subject).copied()
    }

    /// Whether any grade is strictly below `threshold`.
    pub fn has_grade_below(&self, threshold: Decimal) -> bool {
        self.grades.values().any(|grade| *grade < threshold)
    }
}

/// Body of an add-student request.
///
/// Grades stay as parsed `f64` until they are range-checked, so no value is
/// truncated or rejected by the `Decimal` conversion first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStudent {
    /// Requested student identifier.
    #[serde(rename = "id_aluno")]
    pub student_id: i64,
    /// Display name.
    #[serde(rename = "nome_aluno")]
    pub student_name: String,
    /// Raw grade per subject.
    #[serde(rename = "notas")]
    pub grades: BTreeMap<String, f64>,
}

impl NewStudent {
    /// Create a request from `(subject, grade)` pairs.
    pub fn new(student_id: i64, student_name: impl Into<String>, grades: &[(&str, f64)]) -> Self {
        Self {
            student_id,
            student_name: student_name.into(),
            grades: grades
                .iter()
                .map(|(subject, grade)| (subject.to_string(), *grade))
                .collect(),
        }
    }
}

/// Response of the by-student lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentGrades {
    /// Student name.
    #[serde(rename = "nome_aluno")]
    pub student_name: String,
    /// All grades of the student.
    #[serde(rename = "notas")]
    pub grades: Grades,
}

/// Grades of a single subject, ordered by ascending grade.
///
/// Serializes as a JSON object whose keys appear in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectGrades {
    entries: Vec<(String, Decimal)>,
}

impl SubjectGrades {
    /// Record `grade` for `student_name`.
    ///
    /// A repeated name keeps its first position and takes the newer grade.
    pub fn insert(&mut self, student_name: &str, grade: Decimal) {
        match self.entries.iter_mut().find(|(name, _)| name == student_name) {
            Some(entry) => entry.1 = grade,
            None => self.entries.push((student_name.to_string(), grade)),
        }
    }

    /// Stable sort by ascending grade.
    pub fn sort_ascending(&mut self) {
        self.entries.sort_by(|a, b| a.1.cmp(&b.1));
    }

    /// Entries in their current order.
    pub fn entries(&self) -> &[(String, Decimal)] {
        &self.entries
    }

    /// Student names in their current order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no student was collected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SubjectGrades {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, grade) in &self.entries {
            map.serialize_entry(name, grade)?;
        }
        map.end()
    }
}

/// Summary statistics of one subject, each rounded to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectStatistics {
    /// Arithmetic mean.
    #[serde(rename = "media")]
    pub mean: Decimal,
    /// Median.
    #[serde(rename = "mediana")]
    pub median: Decimal,
    /// Sample standard deviation.
    #[serde(rename = "desvio_padrao")]
    pub std_dev: Decimal,
}
