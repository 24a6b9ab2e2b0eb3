//! HTTP protocol layer module
//!
//! Response builders and content-type detection, independent of routing.

pub mod mime;
pub mod response;

pub use mime::content_type_for;
pub use response::{
    build_404_response, build_405_response, build_500_response, build_error_response,
    build_file_response, set_server_header,
};
