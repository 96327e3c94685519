//! Sample endpoints, one per rendering branch.
//!
//! Every handler returns through [`Render`], so the shapes produced here are
//! exactly what any real handler would get for the same kind of result.

use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use responder_core::{build_errors_response, BoxError, Envelope, ErrorEntry, MultiError};

use crate::render::Render;
use crate::state::AppState;

/// A small record used as sample payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub n: u32,
    pub s: &'static str,
}

const RECORDS: [Record; 2] = [Record { n: 1, s: "s" }, Record { n: 2, s: "str" }];

#[derive(Debug, thiserror::Error)]
#[error("{field} {problem}")]
struct FieldError {
    field: &'static str,
    problem: &'static str,
}

/// Signup payload validated field by field.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Mount sample routes under `/samples`.
///
/// ```text
/// GET  /data            -> data
/// GET  /list            -> list
/// GET  /empty           -> empty
/// GET  /error           -> error
/// GET  /errors          -> errors
/// GET  /aggregate       -> aggregate
/// GET  /envelope        -> envelope
/// GET  /records/{id}    -> record
/// GET  /quota/{bytes}   -> quota
/// POST /signup          -> signup
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/data", get(data))
        .route("/list", get(list))
        .route("/empty", get(empty))
        .route("/error", get(error))
        .route("/errors", get(errors))
        .route("/aggregate", get(aggregate))
        .route("/envelope", get(envelope))
        .route("/records/{id}", get(record))
        .route("/quota/{bytes}", get(quota))
        .route("/signup", post(signup))
}

async fn data(render: Render) -> Response {
    render.data(RECORDS[0].clone())
}

async fn list(render: Render) -> Response {
    render.data(RECORDS.to_vec())
}

async fn empty(render: Render) -> Response {
    render.empty()
}

async fn error(render: Render) -> Response {
    render.error("some error")
}

async fn errors(render: Render) -> Response {
    render.errors(["some error", "second error"])
}

async fn aggregate(render: Render) -> Response {
    let mut errs = MultiError::new();
    errs.push("disk full");
    errs.push("quota exceeded");
    render.aggregate(errs)
}

async fn envelope(render: Render) -> Response {
    render.envelope(Envelope::new(202).with_data(json!({ "one": 1, "two": "second" })))
}

/// GET /records/{id}
///
/// Returns the record, 204 when no record has that id, and a 500 error
/// envelope when the id is not a number.
async fn record(render: Render, Path(id): Path<String>) -> Response {
    match id.parse::<u32>() {
        Ok(n) => {
            let found = RECORDS.iter().find(|r| r.n == n).cloned();
            render.respond(found)
        }
        Err(err) => render.error(err),
    }
}

const QUOTA_BYTES: u64 = 1 << 20;
const BLOCK_BYTES: u64 = 512;

#[derive(Debug, thiserror::Error)]
enum QuotaError {
    #[error("{0} bytes exceeds the {QUOTA_BYTES} byte quota")]
    TooLarge(u64),
    #[error("{0} bytes is not a multiple of {BLOCK_BYTES}")]
    Unaligned(u64),
}

/// GET /quota/{bytes}
///
/// Checks an allocation request. Every failed check is reported; the
/// aggregate goes through the plain result path and still renders one entry
/// per failure.
async fn quota(render: Render, Path(bytes): Path<String>) -> Response {
    let bytes = match bytes.parse::<u64>() {
        Ok(bytes) => bytes,
        Err(err) => return render.error(err),
    };

    let mut errs = MultiError::new();
    if bytes > QUOTA_BYTES {
        errs.push(QuotaError::TooLarge(bytes));
    }
    if bytes % BLOCK_BYTES != 0 {
        errs.push(QuotaError::Unaligned(bytes));
    }

    render.result(errs.into_result().map(|()| json!({ "bytes": bytes })))
}

/// POST /signup
///
/// Collects every validation failure into one aggregate. A valid request is
/// answered with a 201 envelope; an invalid one with a 422 envelope listing
/// each failure with its field as details. A body that is not valid JSON is
/// answered with an error envelope carrying the rejection's status.
async fn signup(
    render: Render,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Response {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            let status = rejection.status().as_u16();
            return render.envelope(build_errors_response::<(), _, _>(
                status,
                [BoxError::from(rejection)],
            ));
        }
    };

    let mut errs = MultiError::new();
    if input.name.trim().is_empty() {
        errs.push(FieldError {
            field: "name",
            problem: "is required",
        });
    }
    if !input.email.contains('@') {
        errs.push(FieldError {
            field: "email",
            problem: "is not an email address",
        });
    }

    match errs.into_result() {
        Ok(()) => render.envelope(
            Envelope::new(201).with_data(json!({ "name": input.name, "email": input.email })),
        ),
        Err(errs) => {
            let mut env = Envelope::<()>::new(422);
            for (code, err) in (1..).zip(errs.errors()) {
                let details = err
                    .downcast_ref::<FieldError>()
                    .map(|e| e.field)
                    .unwrap_or_default();
                env = env.with_error(
                    ErrorEntry::from_error(&**err)
                        .with_code(code)
                        .with_details(details),
                );
            }
            render.envelope(env)
        }
    }
}
