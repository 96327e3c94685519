//! Rendering of handler outcomes into HTTP responses.
//!
//! [`Respond`] is the rendering strategy the router is built with;
//! [`JsonResponder`] is the default strategy, writing the envelope as JSON.

use axum::body::Body;
use axum::extract::OriginalUri;
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::{HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use responder_core::{Envelope, Outcome};

/// Header carrying the per-request id set by the request-id middleware.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request metadata a responder may use while rendering.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub method: Method,
    pub uri: Uri,
    pub request_id: Option<String>,
}

impl RequestContext {
    /// Capture method, URI and request id. Inside nested routers the URI is
    /// the one the client sent, not the prefix-stripped one.
    pub fn from_parts(parts: &Parts) -> Self {
        let request_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        Self {
            method: parts.method.clone(),
            uri: parts
                .extensions
                .get::<OriginalUri>()
                .map_or_else(|| parts.uri.clone(), |original| original.0.clone()),
            request_id,
        }
    }
}

/// Rendering strategy: turn one handler outcome into one HTTP response.
///
/// Implementations must be total: every outcome yields a response.
pub trait Respond: Send + Sync + 'static {
    fn respond(&self, ctx: &RequestContext, outcome: Outcome) -> Response;
}

/// Renders outcomes as `{ "data": ..., "errors": [...] }` JSON envelopes.
///
/// | Outcome        | Status          |
/// |----------------|-----------------|
/// | absent         | 204, no body    |
/// | envelope       | its own status  |
/// | aggregate      | 500             |
/// | single error   | 500             |
/// | error list     | 500             |
/// | anything else  | 200             |
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonResponder;

impl Respond for JsonResponder {
    fn respond(&self, ctx: &RequestContext, outcome: Outcome) -> Response {
        let Some(envelope) = outcome.into_envelope() else {
            tracing::debug!(
                method = %ctx.method,
                uri = %ctx.uri,
                request_id = ctx.request_id.as_deref(),
                status = 204,
                "Rendered empty response",
            );
            return StatusCode::NO_CONTENT.into_response();
        };

        let status = StatusCode::from_u16(envelope.status).unwrap_or_else(|_| {
            tracing::warn!(
                status = envelope.status,
                "Envelope carries an invalid status code, using 500",
            );
            StatusCode::INTERNAL_SERVER_ERROR
        });

        if envelope.has_errors() {
            tracing::warn!(
                method = %ctx.method,
                uri = %ctx.uri,
                request_id = ctx.request_id.as_deref(),
                status = status.as_u16(),
                error_count = envelope.errors.len(),
                first_error = %envelope.errors[0].description,
                "Rendered error response",
            );
        } else {
            tracing::debug!(
                method = %ctx.method,
                uri = %ctx.uri,
                request_id = ctx.request_id.as_deref(),
                status = status.as_u16(),
                "Rendered data response",
            );
        }

        write_json(status, &envelope)
    }
}

/// Serialize `envelope` as the body of a response with `status`.
fn write_json(status: StatusCode, envelope: &Envelope) -> Response {
    match serde_json::to_vec(envelope) {
        Ok(bytes) => {
            let mut response = Response::new(Body::from(bytes));
            *response.status_mut() = status;
            response.headers_mut().insert(
                CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
            response
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to serialize response envelope");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"))],
                err.to_string(),
            )
                .into_response()
        }
    }
}

/// Handler return type rendering through [`JsonResponder`] without request
/// context.
///
/// `IntoResponse` has no access to application state, so a `Reply` always
/// renders with `JsonResponder` and an empty [`RequestContext`]: the
/// responder injected into the router is bypassed and render logs carry no
/// method, URI or request id. Handlers that need the injected strategy use
/// [`crate::render::Render`] instead.
#[derive(Debug)]
pub struct Reply<T = serde_json::Value>(pub Outcome<T>);

impl<T> From<Outcome<T>> for Reply<T> {
    fn from(outcome: Outcome<T>) -> Self {
        Reply(outcome)
    }
}

impl<T> From<Envelope<T>> for Reply<T> {
    fn from(envelope: Envelope<T>) -> Self {
        Reply(Outcome::Envelope(envelope))
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        JsonResponder.respond(&RequestContext::default(), self.0.into_json())
    }
}
