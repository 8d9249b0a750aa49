//! Persistence of the student list.
//!
//! Every operation reads the whole list with [`StudentStore::load`] and, when
//! it mutates, writes the whole list back with [`StudentStore::save`]. There
//! is no locking between the two calls: concurrent writers can lose updates.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::StorageError;
use crate::gradebook::Student;

/// Whole-collection load/save contract.
pub trait StudentStore: Send + Sync {
    /// Read every stored student, in stored order.
    fn load(&self) -> Result<Vec<Student>, StorageError>;

    /// Replace the stored collection with `students`.
    fn save(&self, students: &[Student]) -> Result<(), StorageError>;
}
