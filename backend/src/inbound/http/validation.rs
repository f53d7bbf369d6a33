//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
    )
}

pub(crate) fn invalid_field_error(field: FieldName, message: impl Into<String>) -> Error {
    field_error(field, ErrorCode::InvalidValue, message.into())
}

/// Unwrap a required body attribute.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Require a positive integer that fits in `u32`.
pub(crate) fn positive_u32(value: i64, field: FieldName) -> Result<u32, Error> {
    u32::try_from(value)
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| {
            let name = field.as_str();
            invalid_field_error(field, format!("{name} must be a positive integer"))
        })
}

/// Parse a path identifier.
///
/// Identifiers are positive decimal integers; anything else cannot name a
/// stored entity and is reported as `not_found` rather than as a malformed
/// request.
pub(crate) fn parse_path_id(raw: &str, resource: &str) -> Result<u64, Error> {
    raw.parse::<u64>()
        .ok()
        .filter(|id| *id > 0 && raw.bytes().all(|byte| byte.is_ascii_digit()))
        .ok_or_else(|| Error::not_found(format!("no {resource} with id {raw} exists")))
}
