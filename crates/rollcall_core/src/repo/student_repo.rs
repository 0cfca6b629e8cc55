//! Student repository contract and key-value implementation.
//!
//! # Responsibility
//! - Persist the whole student collection as one JSON blob under a fixed key.
//! - Assign collision-free ids against the freshly read collection.
//! - Own the blob codec (`serialize_students` / `deserialize_students`).
//!
//! # Invariants
//! - Every mutation re-reads the stored collection before writing it back.
//! - Missing or corrupt blobs read as an empty collection.
//! - An unreadable store reads as empty for `list_all`/`get`, but fails
//!   mutations without writing.
//! - Unknown ids on update/delete return `Ok(false)` and never write.
//! - Write paths must call `StudentFields::validate()` before persistence.

use crate::model::student::{now_epoch_ms, Student, StudentFields, StudentId};
use crate::repo::{RepoError, RepoResult};
use crate::store::KeyValueStore;
use log::{error, info, warn};

/// Default key holding the serialized collection.
pub const STUDENTS_STORAGE_KEY: &str = "students";

/// Persistence adapter for the student collection.
pub trait StudentRepository {
    /// Returns all stored students in insertion order.
    fn list_all(&self) -> Vec<Student>;
    /// Looks up one student by id in a fresh read.
    fn get(&self, id: &StudentId) -> Option<Student>;
    /// Creates one student and returns it with its generated id.
    fn create(&mut self, fields: &StudentFields) -> RepoResult<Student>;
    /// Replaces all fields of the student `id`; `Ok(false)` when it is absent.
    fn update(&mut self, id: &StudentId, fields: &StudentFields) -> RepoResult<bool>;
    /// Removes the student `id`; `Ok(false)` when it is absent.
    fn delete(&mut self, id: &StudentId) -> RepoResult<bool>;
}

/// Serializes a collection into the stored blob format.
pub fn serialize_students(students: &[Student]) -> RepoResult<String> {
    serde_json::to_string(students).map_err(RepoError::Encode)
}

/// Parses a stored blob.
///
/// Callers in this module treat a parse failure as an empty collection.
pub fn deserialize_students(blob: &str) -> Result<Vec<Student>, serde_json::Error> {
    serde_json::from_str(blob)
}

/// Student repository over any `KeyValueStore`.
pub struct KvStudentRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvStudentRepository<S> {
    /// Uses the default `STUDENTS_STORAGE_KEY`.
    pub fn new(store: S) -> Self {
        Self::with_key(store, STUDENTS_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn storage_key(&self) -> &str {
        self.key.as_str()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Read path for `list_all`/`get`: every failure degrades to empty.
    fn read_collection(&self) -> Vec<Student> {
        match self.store.get_item(&self.key) {
            Ok(blob) => self.decode_or_empty(blob),
            Err(err) => {
                warn!(
                    "event=students_read module=repo status=degraded error_code=store_unavailable key={} error={}",
                    self.key, err
                );
                Vec::new()
            }
        }
    }

    /// Read path for mutations: a store error aborts the write, so a failed
    /// read can never be written back over the stored collection.
    fn load_for_write(&self, event: &'static str) -> RepoResult<Vec<Student>> {
        match self.store.get_item(&self.key) {
            Ok(blob) => Ok(self.decode_or_empty(blob)),
            Err(err) => {
                error!(
                    "event={} module=repo status=error error_code=store_read_failed key={} error={}",
                    event, self.key, err
                );
                Err(err.into())
            }
        }
    }

    fn decode_or_empty(&self, blob: Option<String>) -> Vec<Student> {
        let Some(blob) = blob else {
            return Vec::new();
        };

        match deserialize_students(&blob) {
            Ok(students) => students,
            Err(err) => {
                warn!(
                    "event=students_read module=repo status=degraded error_code=corrupt_blob key={} bytes={} error={}",
                    self.key,
                    blob.len(),
                    err
                );
                Vec::new()
            }
        }
    }

    fn write_collection(&mut self, students: &[Student], event: &'static str) -> RepoResult<()> {
        let blob = serialize_students(students)?;
        if let Err(err) = self.store.set_item(&self.key, &blob) {
            error!(
                "event={} module=repo status=error error_code=store_write_failed key={} bytes={} error={}",
                event,
                self.key,
                blob.len(),
                err
            );
            return Err(err.into());
        }
        Ok(())
    }
}

impl<S: KeyValueStore> StudentRepository for KvStudentRepository<S> {
    fn list_all(&self) -> Vec<Student> {
        self.read_collection()
    }

    fn get(&self, id: &StudentId) -> Option<Student> {
        self.read_collection()
            .into_iter()
            .find(|student| &student.id == id)
    }

    fn create(&mut self, fields: &StudentFields) -> RepoResult<Student> {
        fields.validate()?;

        let mut students = self.load_for_write("student_create")?;
        let id = loop {
            let candidate = StudentId::generate();
            if !students.iter().any(|student| student.id == candidate) {
                break candidate;
            }
        };

        let student = Student::with_id(id, fields.clone(), now_epoch_ms());
        students.push(student.clone());
        self.write_collection(&students, "student_create")?;

        info!(
            "event=student_create module=repo status=ok student_id={} total={}",
            student.id,
            students.len()
        );
        Ok(student)
    }

    fn update(&mut self, id: &StudentId, fields: &StudentFields) -> RepoResult<bool> {
        fields.validate()?;

        let mut students = self.load_for_write("student_update")?;
        let Some(target) = students.iter_mut().find(|student| &student.id == id) else {
            info!("event=student_update module=repo status=not_found student_id={id}");
            return Ok(false);
        };

        target.replace_fields(fields.clone(), now_epoch_ms());
        self.write_collection(&students, "student_update")?;

        info!("event=student_update module=repo status=ok student_id={id}");
        Ok(true)
    }

    fn delete(&mut self, id: &StudentId) -> RepoResult<bool> {
        let mut students = self.load_for_write("student_delete")?;
        let before = students.len();
        students.retain(|student| &student.id != id);
        if students.len() == before {
            info!("event=student_delete module=repo status=not_found student_id={id}");
            return Ok(false);
        }

        self.write_collection(&students, "student_delete")?;

        info!(
            "event=student_delete module=repo status=ok student_id={} total={}",
            id,
            students.len()
        );
        Ok(true)
    }
}
