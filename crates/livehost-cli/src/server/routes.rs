//! HTTP routes.
//!
//! Everything goes through the fallback handler except the push endpoint,
//! which is only routed when the push strategy is active.

use crate::server::context::SharedContext;
use crate::server::session::handle_push;
use axum::{
    body::Body,
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::Response,
    routing::get,
    Router,
};
use livehost::{Notifier, ServeError};
use tower_http::cors::{Any, CorsLayer};

/// Build the router for a context.
pub fn router(context: SharedContext) -> Router {
    let mut router = Router::new();

    if let Notifier::Push(push) = &context.notifier {
        router = router.route(&push.endpoint_path(), get(handle_push));
    }

    router
        .fallback(handle_request)
        .layer(
            // Pages on other origins may poll the sentinel
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET]),
        )
        .with_state(context)
}

/// Sentinel polls first, then static files.
async fn handle_request(State(context): State<SharedContext>, method: Method, uri: Uri) -> Response {
    let path = uri.path();

    if let Notifier::Pull(pull) = &context.notifier {
        if let Some(poll) = pull.poll(path) {
            tracing::debug!(path, status = poll.status(), "sentinel poll");
            return empty(status_code(poll.status()));
        }
    }

    let result = context
        .responder
        .respond(method.as_str(), path, || context.notifier.client_script())
        .await;

    match result {
        Ok(file) => {
            tracing::info!(%method, path, status = 200, injected = file.injected, "served");
            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, file.content_type)
                .body(Body::from(file.body))
                .unwrap_or_else(|_| empty(StatusCode::INTERNAL_SERVER_ERROR))
        }
        Err(err) => error_response(&method, path, err),
    }
}

fn error_response(method: &Method, path: &str, err: ServeError) -> Response {
    let status = status_code(err.status());
    match &err {
        ServeError::Read { .. } => tracing::error!(%method, path, status = status.as_u16(), "{}", err),
        _ => tracing::info!(%method, path, status = status.as_u16(), "{}", err),
    }
    empty(status)
}

fn status_code(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

pub(crate) fn empty(status: StatusCode) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}
