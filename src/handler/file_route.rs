//! File route module
//!
//! Method check, then a fresh single-attempt read of the target file.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};

use crate::error::ResourceError;
use crate::http;
use crate::logger;
use crate::route::Route;

/// Serve a request that matched the route path
pub async fn serve(route: &Route, method: &Method) -> Response<Full<Bytes>> {
    if *method != Route::METHOD {
        logger::log_warning(&format!("Method not allowed: {method} {}", Route::PATH));
        return http::build_405_response(&Route::METHOD);
    }

    let target = route.target();
    match target.load().await {
        Ok(content) => {
            let content_type = http::content_type_for(target.path());
            http::build_file_response(content, content_type)
        }
        Err(e) => {
            log_read_failure(&e);
            http::build_error_response(&e)
        }
    }
}

fn log_read_failure(err: &ResourceError) {
    match err {
        ResourceError::NotFound { .. } => logger::log_warning(&err.to_string()),
        _ => logger::log_error(&err.to_string()),
    }
}
