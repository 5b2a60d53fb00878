use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::friends::{Friend, fetch_friends};
use crate::network::{SessionClient, Transport, UreqTransport};
use crate::progress::{DailyXp, fetch_daily_progress};
use crate::skill::TopicFilter;
use crate::user::{
    Language, LanguageProgress, ProgressSummary, StreakInfo, UserInfo, UserSnapshot,
    UserStateCache,
};
use crate::vocabulary::{Lexeme, VocabularyPaginator};

/// Read access to one user's learning data.
///
/// Accessors that read a language's skills first make that language active on
/// the platform, which replaces the cached snapshot. They therefore take
/// `&mut self`; share a `Lingo` between threads only behind a `Mutex`.
pub struct Lingo<T: Transport = UreqTransport> {
    client: SessionClient<T>,
    state: UserStateCache,
}

impl Lingo<UreqTransport> {
    /// Authenticate with `jwt` and load the user's snapshot.
    pub fn connect(jwt: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let client = SessionClient::connect(jwt, config)?;
        Self::from_client(client)
    }
}

impl<T: Transport> Lingo<T> {
    pub fn with_transport(transport: T, jwt: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let client = SessionClient::with_transport(transport, jwt, config)?;
        Self::from_client(client)
    }

    pub fn from_client(client: SessionClient<T>) -> Result<Self> {
        let state = UserStateCache::load(&client)?;
        info!(
            "Loaded profile for {} ({} languages)",
            client.username(),
            state.snapshot().languages.len()
        );
        Ok(Self { client, state })
    }

    pub fn client(&self) -> &SessionClient<T> {
        &self.client
    }

    pub fn snapshot(&self) -> &UserSnapshot {
        self.state.snapshot()
    }

    pub fn username(&self) -> &str {
        self.client.username()
    }

    pub fn refresh(&mut self) -> Result<()> {
        self.state.refresh(&self.client)
    }

    /// First step of a per-language read. Returns whether a switch happened.
    pub fn ensure_active(&mut self, abbr: &str) -> Result<bool> {
        self.state.ensure_active(&self.client, abbr)
    }

    /// Second step of a per-language read; `abbr` must already be active.
    pub fn read(&self, abbr: &str) -> Result<&LanguageProgress> {
        self.state.read(abbr)
    }

    fn active_progress(&mut self, abbr: &str) -> Result<&LanguageProgress> {
        self.state.ensure_active(&self.client, abbr)?;
        self.state.read(abbr)
    }

    pub fn languages(&self, abbreviations: bool) -> Vec<String> {
        self.snapshot().learning_languages(abbreviations)
    }

    pub fn language_from_abbr(&self, abbr: &str) -> Option<&str> {
        self.snapshot().language_from_abbr(abbr)
    }

    pub fn abbreviation_of(&self, name: &str) -> Option<&str> {
        self.snapshot().abbreviation_of(name)
    }

    pub fn language_details(&self, name: &str) -> Result<&Language> {
        self.snapshot()
            .language_details(name)
            .ok_or_else(|| Error::UnknownLanguage(name.to_string()))
    }

    pub fn user_info(&self) -> UserInfo {
        self.snapshot().user_info()
    }

    pub fn streak_info(&self) -> StreakInfo {
        self.snapshot().streak_info()
    }

    pub fn language_progress(&mut self, abbr: &str) -> Result<ProgressSummary> {
        Ok(self.active_progress(abbr)?.summary())
    }

    pub fn topics(&mut self, abbr: &str, filter: TopicFilter) -> Result<Vec<String>> {
        Ok(filter.titles(&self.active_progress(abbr)?.skills))
    }

    pub fn known_topics(&mut self, abbr: &str) -> Result<Vec<String>> {
        self.topics(abbr, TopicFilter::Known)
    }

    pub fn unknown_topics(&mut self, abbr: &str) -> Result<Vec<String>> {
        self.topics(abbr, TopicFilter::Unknown)
    }

    pub fn golden_topics(&mut self, abbr: &str) -> Result<Vec<String>> {
        self.topics(abbr, TopicFilter::Golden)
    }

    pub fn reviewable_topics(&mut self, abbr: &str) -> Result<Vec<String>> {
        self.topics(abbr, TopicFilter::Reviewable)
    }

    pub fn known_words(&mut self, abbr: &str) -> Result<Vec<String>> {
        Ok(self.active_progress(abbr)?.known_words())
    }

    /// `(skill name, dependency order)` for every skill, in skill order.
    pub fn skill_orders(&mut self, abbr: &str) -> Result<Vec<(String, u32)>> {
        self.state.ensure_active(&self.client, abbr)?;
        let orders = self.state.dependency_orders(abbr)?.clone();
        let skills = &self.state.read(abbr)?.skills;
        Ok(orders
            .ordered(skills)
            .into_iter()
            .map(|(name, order)| (name.to_string(), order))
            .collect())
    }

    /// Abbreviation of the language the user is currently learning.
    pub fn current_language(&self) -> Result<String> {
        self.snapshot()
            .current_learning_abbr()
            .map(str::to_string)
            .ok_or_else(|| Error::MissingField("learning_language".to_string()))
    }

    /// Every learned lexeme of `abbr` (default: the current learning language),
    /// translated from `source` (default: the UI language).
    pub fn vocabulary(&mut self, abbr: Option<&str>, source: Option<&str>) -> Result<Vec<Lexeme>> {
        let learning = match abbr {
            Some(abbr) => abbr.to_string(),
            None => self.current_language()?,
        };
        self.state.ensure_active(&self.client, &learning)?;

        let source = match source {
            Some(source) => source.to_string(),
            None => self
                .snapshot()
                .ui_language
                .clone()
                .ok_or_else(|| Error::MissingField("ui_language".to_string()))?,
        };

        debug!("Fetching vocabulary for {} from {}", learning, source);
        VocabularyPaginator::new(&self.client).fetch_all(&learning, &source)
    }

    pub fn daily_xp_progress(&self) -> Result<DailyXp> {
        fetch_daily_progress(&self.client)?.today_at(&chrono::Local::now())
    }

    pub fn friends(&self) -> Result<Vec<Friend>> {
        fetch_friends(&self.client)
    }
}
