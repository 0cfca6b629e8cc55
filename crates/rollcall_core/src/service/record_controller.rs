//! Record controller: the session-local view over the student collection.
//!
//! # Responsibility
//! - Translate UI intents (add, begin/submit/cancel edit, delete) into
//!   repository calls.
//! - Keep the in-memory cache consistent with confirmed persistence outcomes.
//! - Own the single editing target.
//!
//! # Invariants
//! - The cache only changes after the repository confirms a write.
//! - `add` appends the returned record; `submit` re-reads the full collection.
//! - At most one record is staged for editing; a new `begin_edit` replaces it.
//! - Any failure leaves the editing target in place so unsaved input survives.

use crate::model::student::{Student, StudentFields, StudentId};
use crate::repo::student_repo::StudentRepository;
use crate::repo::RepoError;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Editing target of the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing(Student),
}

/// Controller error for session use-cases.
#[derive(Debug)]
pub enum ControllerError {
    /// `submit` was called with no record staged for editing.
    NotEditing,
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotEditing => write!(f, "no student is being edited"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::NotEditing => None,
        }
    }
}

impl From<RepoError> for ControllerError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Session state over a student repository.
pub struct RecordController<R: StudentRepository> {
    repo: R,
    students: Vec<Student>,
    edit: EditState,
}

impl<R: StudentRepository> RecordController<R> {
    /// Creates a controller and loads the current collection.
    pub fn load(repo: R) -> Self {
        let students = repo.list_all();
        info!(
            "event=session_load module=controller status=ok total={}",
            students.len()
        );
        Self {
            repo,
            students,
            edit: EditState::Idle,
        }
    }

    /// Current cached collection in storage order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Record currently staged for editing, if any.
    pub fn editing(&self) -> Option<&Student> {
        match &self.edit {
            EditState::Idle => None,
            EditState::Editing(student) => Some(student),
        }
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.edit, EditState::Editing(_))
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repo
    }

    /// Creates a record and appends it to the cache.
    pub fn add(&mut self, fields: &StudentFields) -> Result<Student, ControllerError> {
        let student = self.repo.create(fields)?;
        self.students.push(student.clone());
        Ok(student)
    }

    /// Stages `student` for editing, replacing any previous target.
    pub fn begin_edit(&mut self, student: Student) {
        if let EditState::Editing(previous) = &self.edit {
            debug!(
                "event=edit_begin module=controller status=replaced previous_id={} student_id={}",
                previous.id, student.id
            );
        }
        self.edit = EditState::Editing(student);
    }

    /// Stages the cached record `id` for editing.
    ///
    /// Returns `false` (state unchanged) when `id` is not in the cache.
    pub fn begin_edit_by_id(&mut self, id: &StudentId) -> bool {
        match self.students.iter().find(|student| &student.id == id) {
            Some(student) => {
                let student = student.clone();
                self.begin_edit(student);
                true
            }
            None => false,
        }
    }

    /// Drops the editing target without writing anything.
    pub fn cancel_edit(&mut self) {
        self.edit = EditState::Idle;
    }

    /// Writes `fields` to the staged record.
    ///
    /// On `Ok(true)` the cache is re-read from storage and the state is `Idle`.
    /// On `Ok(false)` the record no longer exists in storage; the target stays
    /// staged and the cache is left as is.
    ///
    /// # Errors
    /// - `NotEditing` when no record is staged.
    /// - `Repo` on validation or storage failure; the target stays staged.
    pub fn submit(&mut self, fields: &StudentFields) -> Result<bool, ControllerError> {
        let id = match &self.edit {
            EditState::Editing(student) => student.id.clone(),
            EditState::Idle => return Err(ControllerError::NotEditing),
        };

        if !self.repo.update(&id, fields)? {
            return Ok(false);
        }

        self.students = self.repo.list_all();
        self.edit = EditState::Idle;
        Ok(true)
    }

    /// Deletes `id`, dropping it from the cache only when storage confirms.
    ///
    /// The editing target is left as is, even when it is the deleted record;
    /// a later `submit` for it then reports `Ok(false)`.
    pub fn delete(&mut self, id: &StudentId) -> Result<bool, ControllerError> {
        if !self.repo.delete(id)? {
            return Ok(false);
        }

        self.students.retain(|student| &student.id != id);
        Ok(true)
    }

    /// Re-synchronizes the cache from storage, e.g. after another tab wrote.
    pub fn refresh(&mut self) -> &[Student] {
        self.students = self.repo.list_all();
        &self.students
    }
}
