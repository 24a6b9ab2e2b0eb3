//! Single-route HTTP file responder
//!
//! Serves `GET /hello` with the bytes of a file named by a
//! `resource:file:` reference. The file is re-read on every request.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod resource;
pub mod route;
pub mod server;

#[cfg(test)]
mod test_util;
