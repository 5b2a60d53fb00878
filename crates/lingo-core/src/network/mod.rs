//! Network layer.
//!
//! - `Transport` - one HTTP exchange, backed by `ureq` or by `MockTransport`
//! - `SessionClient` - authenticated requests against the platform

mod client;
pub mod mock;
mod transport;

pub use client::*;
pub use mock::{MOCK_BASE_URL, MockTransport};
pub use transport::*;
