//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: path match, dispatch, access log.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::AppState;
use crate::handler::file_route;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::route::Route;

/// Main entry point for HTTP request handling
///
/// The request body is never read, so any body type is accepted.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let logging = &state.config.logging;
    let mut entry = logging
        .access_log
        .then(|| AccessLogEntry::from_request(&req, peer_addr));

    let method = req.method().clone();
    let mut response = if Route::matches(req.uri().path()) {
        file_route::serve(&state.route, &method).await
    } else {
        http::build_404_response()
    };
    http::set_server_header(&mut response, &state.config.http.server_name);

    if let Some(entry) = entry.as_mut() {
        let body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.finish(response.status().as_u16(), body_bytes);
        logger::log_access(entry, &logging.access_log_format);
    }

    Ok(response)
}
