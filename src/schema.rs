//! Declarative request schemas and the validator that enforces them.
//!
//! A [`Schema`] lists the fields of a payload together with their kind and
//! whether they are required or read-only. [`Schema::validate`] checks a raw
//! JSON body against it before any handler logic runs.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

pub const VALIDATION_FAILED: &str = "Input payload validation failed";

/// JSON kind of a field. Kinds on read-only fields only document the
/// response shape; the validator never sees those fields on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    String,
    DateTime,
}

impl FieldKind {
    fn name(self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::String => "string",
            FieldKind::DateTime => "date-time",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::String => value.is_string(),
            FieldKind::DateTime => value
                .as_str()
                .is_some_and(|s| OffsetDateTime::parse(s, &Rfc3339).is_ok()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub read_only: bool,
}

impl Field {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: true, read_only: false }
    }

    pub const fn read_only(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: false, read_only: true }
    }
}

#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [Field],
}

/// Per-field failures, keyed by field name.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("Input payload validation failed")]
pub struct ValidationErrors {
    pub errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn add(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.errors.insert(field.into(), reason.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Failure for a body that could not be read as JSON at all.
    pub fn body(reason: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add("body", reason);
        errors
    }
}

impl Schema {
    /// Read-only fields are skipped on input and unknown keys pass through.
    pub fn validate(&self, payload: &Value) -> Result<(), ValidationErrors> {
        let Some(object) = payload.as_object() else {
            return Err(ValidationErrors::body(format!(
                "{} payload must be a JSON object",
                self.name
            )));
        };

        let mut errors = ValidationErrors::default();
        for field in self.fields.iter().filter(|f| !f.read_only) {
            match object.get(field.name) {
                None | Some(Value::Null) if field.required => {
                    errors.add(field.name, format!("'{}' is a required property", field.name));
                }
                None | Some(Value::Null) => {}
                Some(value) if !field.kind.accepts(value) => {
                    errors.add(
                        field.name,
                        format!("{value} is not of type '{}'", field.kind.name()),
                    );
                }
                Some(_) => {}
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Types that are decoded from a body checked against a [`Schema`].
pub trait HasSchema {
    fn schema() -> &'static Schema;
}
