//! User profile state.
//!
//! - `UserSnapshot` and its records - typed profile document
//! - `UserStateCache` - snapshot ownership and the active-language protocol

mod cache;
mod snapshot;

pub use cache::*;
pub use snapshot::*;
