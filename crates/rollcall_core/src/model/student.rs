//! Student domain model.
//!
//! # Responsibility
//! - Define the canonical student record persisted by the record store.
//! - Own the form contract (`StudentFields::validate`) applied before writes.
//!
//! # Invariants
//! - `id` is assigned once at creation and never changes afterwards.
//! - Profile fields are opaque to the store beyond presence/shape checks.
//! - `created_at` is fixed at creation; `updated_at` moves on every update.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("valid date regex")
});

/// Highest study year accepted by the form contract.
pub const MAX_STUDY_YEAR: u8 = 8;

/// Stable identifier of one student record.
///
/// Stored as plain text so records written by older front-ends (which used
/// non-UUID ids) still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    /// Generates a fresh random identifier.
    ///
    /// Uniqueness against a concrete collection is checked by the repository.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for StudentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for StudentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Caller-supplied profile fields, as produced by the student form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// `YYYY-MM-DD`, or empty when unknown.
    pub date_of_birth: String,
    pub course: String,
    /// Study year, `1..=MAX_STUDY_YEAR`.
    pub year: Option<u8>,
    pub address: String,
}

/// Form-contract violations detected before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    /// A required field is blank after trimming.
    MissingField(&'static str),
    InvalidEmail(String),
    InvalidDateOfBirth(String),
    YearOutOfRange(u8),
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is empty"),
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
            Self::InvalidDateOfBirth(value) => {
                write!(f, "date_of_birth must be YYYY-MM-DD, got `{value}`")
            }
            Self::YearOutOfRange(year) => {
                write!(f, "year must be within 1..={MAX_STUDY_YEAR}, got {year}")
            }
        }
    }
}

impl Error for StudentValidationError {}

impl StudentFields {
    /// Convenience constructor for the required subset of the form.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// Returns a copy with surrounding whitespace removed from text fields.
    pub fn normalized(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            date_of_birth: self.date_of_birth.trim().to_string(),
            course: self.course.trim().to_string(),
            year: self.year,
            address: self.address.trim().to_string(),
        }
    }

    /// Checks the form contract.
    ///
    /// # Errors
    /// - `MissingField` when first name, last name or email is blank.
    /// - `InvalidEmail` when email does not look like `local@domain.tld`.
    /// - `InvalidDateOfBirth` when a non-empty date is not `YYYY-MM-DD`.
    /// - `YearOutOfRange` when `year` is outside `1..=MAX_STUDY_YEAR`.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        let required = [
            ("first_name", self.first_name.as_str()),
            ("last_name", self.last_name.as_str()),
            ("email", self.email.as_str()),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(StudentValidationError::MissingField(field));
            }
        }

        let email = self.email.trim();
        if !EMAIL_RE.is_match(email) {
            return Err(StudentValidationError::InvalidEmail(email.to_string()));
        }

        let date_of_birth = self.date_of_birth.trim();
        if !date_of_birth.is_empty() && !DATE_RE.is_match(date_of_birth) {
            return Err(StudentValidationError::InvalidDateOfBirth(
                date_of_birth.to_string(),
            ));
        }

        if let Some(year) = self.year {
            if year == 0 || year > MAX_STUDY_YEAR {
                return Err(StudentValidationError::YearOutOfRange(year));
            }
        }

        Ok(())
    }
}

/// Canonical persisted student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    #[serde(flatten)]
    pub fields: StudentFields,
    /// Unix epoch milliseconds.
    #[serde(default)]
    pub created_at: i64,
    /// Unix epoch milliseconds.
    #[serde(default)]
    pub updated_at: i64,
}

impl Student {
    /// Builds a record from normalized fields with both timestamps set to `now_ms`.
    pub fn with_id(id: StudentId, fields: StudentFields, now_ms: i64) -> Self {
        Self {
            id,
            fields: fields.normalized(),
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Replaces all profile fields in place. `id` and `created_at` are kept.
    pub fn replace_fields(&mut self, fields: StudentFields, now_ms: i64) {
        self.fields = fields.normalized();
        self.updated_at = now_ms;
    }

    /// Display name used by list views.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.fields.first_name, self.fields.last_name)
            .trim()
            .to_string()
    }
}

/// Current wall clock in epoch milliseconds.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_epoch_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}

/// Current wall clock in epoch milliseconds.
#[cfg(target_arch = "wasm32")]
pub fn now_epoch_ms() -> i64 {
    js_sys::Date::now() as i64
}
