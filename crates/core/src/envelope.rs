//! The response envelope every handler result is rendered into.
//!
//! On the wire an envelope is `{ "data": ..., "errors": [...] }` where each
//! field only appears when it carries something. The HTTP status travels
//! alongside the envelope but is never part of the body.

use std::error::Error as StdError;

use serde::Serialize;

/// HTTP 200 OK.
pub const STATUS_OK: u16 = 200;
/// HTTP 204 No Content.
pub const STATUS_NO_CONTENT: u16 = 204;
/// HTTP 500 Internal Server Error.
pub const STATUS_INTERNAL_SERVER_ERROR: u16 = 500;

/// One failure reported to the client.
///
/// `code` and `details` are explicit presence wrappers: `Some(0)` is a real
/// code and is serialized, `None` is left out of the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorEntry {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            code: None,
            details: None,
        }
    }

    /// Description-only entry carrying the error's display text.
    pub fn from_error(err: &(dyn StdError + '_)) -> Self {
        Self::new(err.to_string())
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Canonical response unit: a status plus optional data and errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T = serde_json::Value> {
    #[serde(skip)]
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorEntry>,
}

impl<T> Envelope<T> {
    /// Empty envelope with the given status; renders as `{}`.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            data: None,
            errors: Vec::new(),
        }
    }

    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach a fully specified entry, e.g. one carrying a code or details.
    pub fn with_error(mut self, entry: ErrorEntry) -> Self {
        self.errors.push(entry);
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn map_data<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            status: self.status,
            data: self.data.map(f),
            errors: self.errors,
        }
    }
}

impl<T: Serialize> Envelope<T> {
    /// Convert typed data into a JSON value, keeping status and errors.
    pub fn to_json_value(self) -> Result<Envelope<serde_json::Value>, serde_json::Error> {
        let data = self.data.map(serde_json::to_value).transpose()?;
        Ok(Envelope {
            status: self.status,
            data,
            errors: self.errors,
        })
    }
}

/// Assemble an envelope from a status, optional data and zero or more errors.
///
/// Each error becomes a description-only [`ErrorEntry`], in input order.
/// With no errors the `errors` field stays empty and is omitted on the wire.
pub fn build_response<T, I, E>(status: u16, data: Option<T>, errors: I) -> Envelope<T>
where
    I: IntoIterator<Item = E>,
    E: AsRef<dyn StdError + Send + Sync>,
{
    Envelope {
        status,
        data,
        errors: errors
            .into_iter()
            .map(|err| ErrorEntry::from_error(err.as_ref()))
            .collect(),
    }
}

/// Shorthand for [`build_response`] without data.
pub fn build_errors_response<T, I, E>(status: u16, errors: I) -> Envelope<T>
where
    I: IntoIterator<Item = E>,
    E: AsRef<dyn StdError + Send + Sync>,
{
    build_response(status, None, errors)
}
