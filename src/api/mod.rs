//! HTTP boundary: endpoint URLs, tagged requests and response decoding.
//!
//! Nothing in this module performs I/O. Requests are plain values handed to the
//! plugin runtime as actions; completions come back as events and are decoded
//! here. That keeps the whole request/response cycle testable without a host.

pub mod endpoints;
pub mod request;
pub mod response;

pub use endpoints::Endpoints;
pub use request::{ApiRequest, GeocodePurpose, HttpMethod, RequestTag};
pub use response::ApiResponse;
