use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Response;
use serde::Serialize;

use responder_core::{BoxError, Envelope, MultiError, Outcome};

use crate::responder::{RequestContext, Respond};
use crate::state::AppState;

/// Handle on the responder the router was built with, bound to the current
/// request.
///
/// Use this as an extractor parameter in any handler:
///
/// ```ignore
/// async fn show(render: Render) -> Response {
///     render.data(Widget { id: 1 })
/// }
/// ```
#[derive(Clone)]
pub struct Render {
    responder: Arc<dyn Respond>,
    ctx: RequestContext,
}

impl Render {
    pub fn new(responder: Arc<dyn Respond>, ctx: RequestContext) -> Self {
        Self { responder, ctx }
    }

    pub fn context(&self) -> &RequestContext {
        &self.ctx
    }

    /// Render any outcome through the injected responder.
    pub fn respond<T: Serialize>(&self, outcome: impl Into<Outcome<T>>) -> Response {
        self.render::<T>(outcome.into())
    }

    fn render<T: Serialize>(&self, outcome: Outcome<T>) -> Response {
        self.responder.respond(&self.ctx, outcome.into_json())
    }

    pub fn data<T: Serialize>(&self, value: T) -> Response {
        self.render(Outcome::data(value))
    }

    pub fn empty(&self) -> Response {
        self.render(Outcome::<()>::Absent)
    }

    pub fn envelope<T: Serialize>(&self, envelope: Envelope<T>) -> Response {
        self.render(Outcome::Envelope(envelope))
    }

    pub fn error(&self, err: impl Into<BoxError>) -> Response {
        self.render(Outcome::<()>::error(err))
    }

    pub fn errors<I, E>(&self, errs: I) -> Response
    where
        I: IntoIterator<Item = E>,
        E: Into<BoxError>,
    {
        self.render(Outcome::<()>::errors(errs))
    }

    pub fn aggregate(&self, errs: MultiError) -> Response {
        self.render(Outcome::<()>::aggregate(errs))
    }

    /// `Ok` renders as data, `Err` as a single error.
    pub fn result<T, E>(&self, result: Result<T, E>) -> Response
    where
        T: Serialize,
        E: Into<BoxError>,
    {
        self.render(Outcome::from_result(result))
    }
}

impl FromRequestParts<AppState> for Render {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::new(
            Arc::clone(&state.responder),
            RequestContext::from_parts(parts),
        ))
    }
}
