pub mod health;
pub mod samples;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /samples/data                 single record (200)
/// /samples/list                 list of records (200)
/// /samples/empty                no content (204)
/// /samples/error                single error (500)
/// /samples/errors               error list (500)
/// /samples/aggregate            aggregate error (500)
/// /samples/envelope             pre-built envelope (202)
/// /samples/records/{id}         lookup: record, 204 when missing, 500 on bad id
/// /samples/quota/{bytes}        checks via result path: data, or one entry per failure (500)
/// /samples/signup        POST   201 on success, 422 on invalid fields, rejection status on bad body
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/samples", samples::router())
}
