//! Request handler module
//!
//! Dispatches requests to the file route and serves the target file.

pub mod file_route;
pub mod router;

pub use router::handle_request;
