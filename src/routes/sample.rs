//! Sample page routes and the application router with its middleware stack.

use crate::error::status_page;
use crate::handlers::sample::{
    create, create_form, delete as delete_handler, detail, edit_form, index, not_found, update,
};
use crate::state::AppState;
use axum::{
    http::header,
    middleware,
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

pub fn sample_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/detail/:id", get(detail))
        .route("/create", get(create_form).post(create))
        .route("/edit/:id", get(edit_form).post(update))
        .route("/delete/:id", post(delete_handler))
        .with_state(state)
}

/// Full application: sample routes, 404 fallback, body size limit, HTML error pages for
/// responses produced by middleware or axum itself, and request tracing.
pub fn app(state: AppState, body_limit: usize) -> Router {
    sample_routes(state)
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(middleware::map_response(render_bare_errors))
        .layer(TraceLayer::new_for_http())
}

/// Replace non-HTML error responses (413 from the body limit, 405 from the router) with
/// the error page. The `Allow` header survives.
async fn render_bare_errors(resp: Response) -> Response {
    let status = resp.status();
    if !status.is_client_error() && !status.is_server_error() {
        return resp;
    }
    let is_html = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/html"));
    if is_html {
        return resp;
    }
    tracing::debug!(status = status.as_u16(), "rendering error page for bare response");
    let mut page = status_page(status);
    if let Some(allow) = resp.headers().get(header::ALLOW) {
        page.headers_mut().insert(header::ALLOW, allow.clone());
    }
    page
}
