pub mod auth;
pub mod config;
pub mod error;
pub mod friends;
pub mod lingo;
pub mod network;
pub mod progress;
pub mod skill;
pub mod user;
pub mod vocabulary;

pub use auth::decode_subject_unverified;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use friends::Friend;
pub use lingo::Lingo;
pub use network::{MockTransport, SessionClient, Transport, UreqTransport};
pub use progress::{DailyXp, XpGain};
pub use skill::{DependencyOrders, Skill, TopicFilter, compute_orders};
pub use user::{Language, LanguageProgress, UserSnapshot, UserStateCache};
pub use vocabulary::{Lexeme, VocabularyPaginator};
