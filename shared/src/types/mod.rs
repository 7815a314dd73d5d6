//! Type definitions shared between the flow core and the API client
//!
//! - `response` - envelope and error body returned by the remote API

pub mod response;

pub use response::{ApiResponse, ErrorBody};
