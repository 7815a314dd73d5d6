//! Remote authentication API
//!
//! Both implementations satisfy [`hm_core::AuthApiTrait`]:
//!
//! - **HTTP**: production client for the portal backend
//! - **Mock**: in-memory accounts and codes; the code is written to the log
//!   instead of being emailed

pub mod dto;
pub mod http_client;
pub mod mock_api;

pub use http_client::HttpAuthApi;
pub use mock_api::{MockAccount, MockAuthApi};

#[cfg(test)]
mod tests;
