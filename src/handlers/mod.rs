//! HTTP request handlers.

pub mod http;
pub mod upload;

pub use http::*;
pub use upload::*;
