//! Session API for the browser form/list UI.
//!
//! # Responsibility
//! - Expose stable, use-case-level calls (add, edit, submit, cancel, delete)
//!   over one `RecordController`.
//! - Translate core errors into plain response envelopes the UI can render.
//!
//! # Invariants
//! - Calls never panic; every failure becomes `ok=false` with a message.
//! - A failed submit keeps the editing target so the form keeps its input.
//! - Field payloads are JSON objects with camelCase keys.

use log::warn;
use rollcall_core::{
    ControllerError, KeyValueStore, KvStudentRepository, RecordController, RepoError, Student,
    StudentFields, StudentId,
};
use serde::Serialize;

/// Result envelope for mutating session calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Affected student id, when one is known.
    pub student_id: Option<String>,
    /// Human-readable message for the UI.
    pub message: String,
}

impl StudentActionResponse {
    fn success(message: impl Into<String>, student_id: Option<&StudentId>) -> Self {
        Self {
            ok: true,
            student_id: student_id.map(ToString::to_string),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            student_id: None,
            message: message.into(),
        }
    }

    /// Serializes the envelope for JS callers.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            format!(r#"{{"ok":false,"studentId":null,"message":"encode failed: {err}"}}"#)
        })
    }
}

/// One browser session bound to a key-value store.
pub struct StudentSession<S: KeyValueStore> {
    controller: RecordController<KvStudentRepository<S>>,
}

impl<S: KeyValueStore> StudentSession<S> {
    /// Opens a session over the default storage key.
    pub fn open(store: S) -> Self {
        Self::from_repository(KvStudentRepository::new(store))
    }

    /// Opens a session over a custom storage key.
    pub fn open_with_key(store: S, key: &str) -> Self {
        Self::from_repository(KvStudentRepository::with_key(store, key))
    }

    fn from_repository(repo: KvStudentRepository<S>) -> Self {
        Self {
            controller: RecordController::load(repo),
        }
    }

    pub fn students(&self) -> &[Student] {
        self.controller.students()
    }

    pub fn editing(&self) -> Option<&Student> {
        self.controller.editing()
    }

    /// Cached collection as a JSON array.
    pub fn students_json(&self) -> String {
        serde_json::to_string(self.controller.students()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Editing target as JSON, or `null` when idle.
    pub fn editing_json(&self) -> String {
        serde_json::to_string(&self.controller.editing()).unwrap_or_else(|_| "null".to_string())
    }

    /// Adds one student from a JSON field object.
    pub fn add(&mut self, fields_json: &str) -> StudentActionResponse {
        let fields = match parse_fields(fields_json) {
            Ok(fields) => fields,
            Err(response) => return response,
        };
        match self.controller.add(&fields) {
            Ok(student) => StudentActionResponse::success("Student added.", Some(&student.id)),
            Err(err) => failure("add", &err),
        }
    }

    /// Stages the cached student `id` for editing.
    pub fn begin_edit(&mut self, id: &str) -> StudentActionResponse {
        let id = StudentId::from(id);
        if self.controller.begin_edit_by_id(&id) {
            StudentActionResponse::success("Editing student.", Some(&id))
        } else {
            StudentActionResponse::failure(format!("student not found: {id}"))
        }
    }

    /// Writes the edit form to the staged student.
    pub fn submit(&mut self, fields_json: &str) -> StudentActionResponse {
        let fields = match parse_fields(fields_json) {
            Ok(fields) => fields,
            Err(response) => return response,
        };
        let id = self.controller.editing().map(|student| student.id.clone());
        match self.controller.submit(&fields) {
            Ok(true) => StudentActionResponse::success("Student updated.", id.as_ref()),
            Ok(false) => StudentActionResponse::failure(
                "Student no longer exists; it may have been deleted in another window.",
            ),
            Err(err) => failure("submit", &err),
        }
    }

    pub fn cancel_edit(&mut self) -> StudentActionResponse {
        self.controller.cancel_edit();
        StudentActionResponse::success("Edit cancelled.", None)
    }

    pub fn delete(&mut self, id: &str) -> StudentActionResponse {
        let id = StudentId::from(id);
        match self.controller.delete(&id) {
            Ok(true) => StudentActionResponse::success("Student deleted.", Some(&id)),
            Ok(false) => StudentActionResponse::failure(format!("student not found: {id}")),
            Err(err) => failure("delete", &err),
        }
    }

    /// Re-reads storage; returns the number of cached students.
    pub fn refresh(&mut self) -> usize {
        self.controller.refresh().len()
    }
}

fn parse_fields(fields_json: &str) -> Result<StudentFields, StudentActionResponse> {
    serde_json::from_str::<StudentFields>(fields_json).map_err(|err| {
        StudentActionResponse::failure(format!("invalid student form payload: {err}"))
    })
}

fn failure(action: &'static str, err: &ControllerError) -> StudentActionResponse {
    let error_code = match err {
        ControllerError::NotEditing => "not_editing",
        ControllerError::Repo(RepoError::Validation(_)) => "validation",
        ControllerError::Repo(RepoError::Store(_)) => "store_write_failed",
        ControllerError::Repo(RepoError::Encode(_)) => "encode_failed",
    };
    warn!("event=session_{action} module=web status=error error_code={error_code}");
    StudentActionResponse::failure(format!("{action} failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::StudentSession;
    use rollcall_core::{KeyValueStore, MemoryStore};

    const ALICE: &str =
        r#"{"firstName":"Alice","lastName":"Liddell","email":"alice@example.com","year":2}"#;

    #[test]
    fn add_then_list_reports_created_student() {
        let mut session = StudentSession::open(MemoryStore::new());
        let response = session.add(ALICE);
        assert!(response.ok, "{}", response.message);

        let listed: serde_json::Value = serde_json::from_str(&session.students_json()).unwrap();
        assert_eq!(listed.as_array().map(Vec::len), Some(1));
        assert_eq!(listed[0]["id"].as_str(), response.student_id.as_deref());
        assert_eq!(listed[0]["firstName"], "Alice");
        assert_eq!(listed[0]["year"], 2);
    }

    #[test]
    fn malformed_payload_fails_without_panicking() {
        let mut session = StudentSession::open(MemoryStore::new());
        let response = session.add("{not json");
        assert!(!response.ok);
        assert!(response.message.contains("invalid student form payload"));
        assert!(session.students().is_empty());
    }

    #[test]
    fn validation_failure_is_reported() {
        let mut session = StudentSession::open(MemoryStore::new());
        let response = session.add(r#"{"firstName":"Bob"}"#);
        assert!(!response.ok);
        assert!(response.message.contains("last_name"));
    }

    #[test]
    fn edit_flow_updates_and_returns_to_idle() {
        let mut session = StudentSession::open(MemoryStore::new());
        let id = session.add(ALICE).student_id.unwrap();

        assert!(session.begin_edit(&id).ok);
        assert_ne!(session.editing_json(), "null");

        let response = session.submit(
            r#"{"firstName":"Alicia","lastName":"Liddell","email":"alice@example.com"}"#,
        );
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.student_id.as_deref(), Some(id.as_str()));
        assert_eq!(session.editing_json(), "null");
        assert_eq!(session.students()[0].fields.first_name, "Alicia");
    }

    #[test]
    fn submit_without_edit_target_fails() {
        let mut session = StudentSession::open(MemoryStore::new());
        let response = session.submit(ALICE);
        assert!(!response.ok);
        assert!(response.message.contains("no student is being edited"));
    }

    #[test]
    fn cancel_and_delete_flow() {
        let mut session = StudentSession::open(MemoryStore::new());
        let id = session.add(ALICE).student_id.unwrap();
        session.begin_edit(&id);
        assert!(session.cancel_edit().ok);
        assert!(session.editing().is_none());

        assert!(session.delete(&id).ok);
        assert!(!session.delete(&id).ok);
        assert!(session.students().is_empty());
    }

    #[test]
    fn quota_failure_keeps_cache_and_reports_error() {
        let mut session = StudentSession::open(MemoryStore::with_quota(8));
        let response = session.add(ALICE);
        assert!(!response.ok);
        assert!(response.message.contains("quota"));
        assert!(session.students().is_empty());
    }

    #[test]
    fn refresh_sees_writes_from_another_session() {
        let mut store = MemoryStore::new();
        StudentSession::open(&mut store).add(ALICE);

        let mut session = StudentSession::open_with_key(&mut store, "students");
        assert_eq!(session.students().len(), 1);
        session.add(ALICE);
        assert_eq!(session.refresh(), 2);
        assert!(store.get_item("students").unwrap().is_some());
    }

    #[test]
    fn envelope_serializes_camel_case() {
        let mut session = StudentSession::open(MemoryStore::new());
        let json = session.cancel_edit().to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ok"], true);
        assert!(value["studentId"].is_null());
    }
}
