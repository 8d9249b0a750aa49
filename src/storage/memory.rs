//! In-memory store for unit testing.
//!
//! Behaves like [`super::JsonFileStore`] without touching the disk, and can
//! be told to fail loads or saves.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::StorageError;
use crate::gradebook::Student;

use super::StudentStore;

/// Mock store holding the collection in a shared vector.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    students: Arc<Mutex<Vec<Student>>>,
    fail_load: Arc<AtomicBool>,
    fail_save: Arc<AtomicBool>,
    saves: Arc<AtomicUsize>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `students`.
    pub fn with_students(students: Vec<Student>) -> Self {
        let store = Self::new();
        *store.lock() = students;
        store
    }

    /// Make subsequent loads fail.
    pub fn set_fail_load(&self, fail: bool) {
        self.fail_load.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent saves fail.
    pub fn set_fail_save(&self, fail: bool) {
        self.fail_save.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Copy of the stored collection.
    pub fn snapshot(&self) -> Vec<Student> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Student>> {
        // A poisoned lock still holds a consistent Vec.
        self.students.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StudentStore for MemoryStore {
    fn load(&self) -> Result<Vec<Student>, StorageError> {
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("mock load failure".to_string()));
        }
        Ok(self.lock().clone())
    }

    fn save(&self, students: &[Student]) -> Result<(), StorageError> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("mock save failure".to_string()));
        }
        *self.lock() = students.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
