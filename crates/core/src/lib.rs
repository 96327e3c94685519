//! Framework-agnostic JSON response envelope.
//!
//! Handlers hand back an [`Outcome`]; it is classified once and turned into
//! an [`Envelope`] carrying the HTTP status plus optional `data` and
//! `errors`. Writing the envelope to the wire is left to the web layer.

pub mod envelope;
pub mod error;
pub mod outcome;

pub use envelope::{build_errors_response, build_response, Envelope, ErrorEntry};
pub use error::{BoxError, MultiError};
pub use outcome::Outcome;
