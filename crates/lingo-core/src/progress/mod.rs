//! Daily XP progress.

mod daily;

pub use daily::*;
