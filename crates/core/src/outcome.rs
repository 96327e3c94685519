//! Classification of handler results.
//!
//! A handler produces exactly one [`Outcome`]; [`Outcome::into_envelope`]
//! turns it into the envelope to render, or `None` for an empty 204 reply.

use serde::Serialize;

use crate::envelope::{
    build_errors_response, build_response, Envelope, STATUS_INTERNAL_SERVER_ERROR,
    STATUS_NO_CONTENT, STATUS_OK,
};
use crate::error::{BoxError, MultiError};

/// Every shape a handler result can take.
#[derive(Debug)]
pub enum Outcome<T = serde_json::Value> {
    /// Nothing to say: 204 with no body.
    Absent,
    /// Pre-built envelope, rendered verbatim with its own status.
    Envelope(Envelope<T>),
    /// Aggregate error, expanded into one entry per inner error.
    Aggregate(MultiError),
    /// A single error.
    Error(BoxError),
    /// An ordered list of errors.
    Errors(Vec<BoxError>),
    /// Any other value, wrapped as `data`.
    Data(T),
}

impl<T> Outcome<T> {
    pub fn absent() -> Self {
        Outcome::Absent
    }

    pub fn envelope(envelope: Envelope<T>) -> Self {
        Outcome::Envelope(envelope)
    }

    pub fn aggregate(errors: MultiError) -> Self {
        Outcome::Aggregate(errors)
    }

    /// A single error; a boxed [`MultiError`] is recognised as an aggregate.
    pub fn error(err: impl Into<BoxError>) -> Self {
        Self::classify_error(err.into())
    }

    fn classify_error(err: BoxError) -> Self {
        match err.downcast::<MultiError>() {
            Ok(errs) => Outcome::Aggregate(*errs),
            Err(err) => Outcome::Error(err),
        }
    }

    pub fn errors<I, E>(errs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<BoxError>,
    {
        Outcome::Errors(errs.into_iter().map(Into::into).collect())
    }

    pub fn data(value: T) -> Self {
        Outcome::Data(value)
    }

    /// `Ok` becomes data, `Err` a single error.
    pub fn from_result<E: Into<BoxError>>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Data(value),
            Err(err) => Self::classify_error(err.into()),
        }
    }

    /// HTTP status this outcome renders with.
    pub fn status(&self) -> u16 {
        match self {
            Outcome::Absent => STATUS_NO_CONTENT,
            Outcome::Envelope(envelope) => envelope.status,
            Outcome::Aggregate(_) | Outcome::Error(_) | Outcome::Errors(_) => {
                STATUS_INTERNAL_SERVER_ERROR
            }
            Outcome::Data(_) => STATUS_OK,
        }
    }

    /// Build the envelope to render; `None` means an empty 204 reply.
    ///
    /// Aggregates always render as 500. A different status for a batch of
    /// errors needs a pre-built envelope via [`build_errors_response`].
    pub fn into_envelope(self) -> Option<Envelope<T>> {
        match self {
            Outcome::Absent => None,
            Outcome::Envelope(envelope) => Some(envelope),
            Outcome::Aggregate(errs) => Some(build_errors_response(
                STATUS_INTERNAL_SERVER_ERROR,
                errs.into_errors(),
            )),
            Outcome::Error(err) => match err.downcast::<MultiError>() {
                Ok(errs) => Some(build_errors_response(
                    STATUS_INTERNAL_SERVER_ERROR,
                    (*errs).into_errors(),
                )),
                Err(err) => Some(build_errors_response(
                    STATUS_INTERNAL_SERVER_ERROR,
                    [err],
                )),
            },
            Outcome::Errors(errs) => Some(build_errors_response(
                STATUS_INTERNAL_SERVER_ERROR,
                errs,
            )),
            Outcome::Data(value) => Some(build_response(
                STATUS_OK,
                Some(value),
                std::iter::empty::<BoxError>(),
            )),
        }
    }
}

impl<T: Serialize> Outcome<T> {
    /// Erase the data type into a JSON value.
    ///
    /// A value that fails to serialize becomes a single error outcome.
    pub fn into_json(self) -> Outcome {
        match self {
            Outcome::Absent => Outcome::Absent,
            Outcome::Envelope(envelope) => match envelope.to_json_value() {
                Ok(envelope) => Outcome::Envelope(envelope),
                Err(err) => Outcome::Error(err.into()),
            },
            Outcome::Aggregate(errs) => Outcome::Aggregate(errs),
            Outcome::Error(err) => Outcome::Error(err),
            Outcome::Errors(errs) => Outcome::Errors(errs),
            Outcome::Data(value) => match serde_json::to_value(value) {
                Ok(value) => Outcome::Data(value),
                Err(err) => Outcome::Error(err.into()),
            },
        }
    }
}

impl<T> From<Envelope<T>> for Outcome<T> {
    fn from(envelope: Envelope<T>) -> Self {
        Outcome::Envelope(envelope)
    }
}

impl<T> From<MultiError> for Outcome<T> {
    fn from(errs: MultiError) -> Self {
        Outcome::Aggregate(errs)
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Outcome::Data(value),
            None => Outcome::Absent,
        }
    }
}
