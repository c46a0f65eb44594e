//! HTTP plumbing module
//!
//! Response builders shared by all request handlers.

pub mod response;

pub use response::{
    build_404_response, build_405_response, build_500_response, build_bad_request_response,
    build_html_response, build_options_response, build_text_response,
};
