//! Learned vocabulary.
//!
//! - `build_manifest` - progressed-skills manifest from the course path
//! - `VocabularyPaginator` - bounded walk of the learned-lexemes endpoint

mod manifest;
mod paginator;

pub use manifest::*;
pub use paginator::*;
