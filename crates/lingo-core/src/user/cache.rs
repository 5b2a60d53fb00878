use std::collections::HashMap;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::network::{SessionClient, Transport};
use crate::skill::{DependencyOrders, compute_orders};
use crate::user::{LanguageProgress, UserSnapshot};

/// Cached profile snapshot plus the active-language protocol.
///
/// The platform only reports skill detail for its active learning language,
/// so reading a language's skills is a two-step operation: `ensure_active`
/// (which may switch the active language server-side and reload the snapshot)
/// followed by `read`. Both steps take the cache mutably or immutably in turn;
/// callers sharing one cache across threads must hold a lock across the pair.
#[derive(Debug, Clone)]
pub struct UserStateCache {
    snapshot: UserSnapshot,
    /// Memoized orders per language, valid for the current snapshot only.
    orders: HashMap<String, DependencyOrders>,
}

impl UserStateCache {
    /// Fetch the profile snapshot for the session's user.
    pub fn load<T: Transport>(client: &SessionClient<T>) -> Result<Self> {
        let snapshot = Self::fetch(client)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn from_snapshot(snapshot: UserSnapshot) -> Self {
        Self {
            snapshot,
            orders: HashMap::new(),
        }
    }

    fn fetch<T: Transport>(client: &SessionClient<T>) -> Result<UserSnapshot> {
        let url = client.config().user_by_name_url(client.username());
        let snapshot: UserSnapshot = client.get_json(&url).map_err(|e| match e {
            Error::NotFound(_) => Error::NotFound(format!("user {}", client.username())),
            other => other,
        })?;
        debug!(
            "Loaded snapshot with {} languages, active: {:?}",
            snapshot.languages.len(),
            snapshot.language_data.keys().collect::<Vec<_>>()
        );
        Ok(snapshot)
    }

    /// Replace the snapshot with a fresh copy.
    pub fn refresh<T: Transport>(&mut self, client: &SessionClient<T>) -> Result<()> {
        let snapshot = Self::fetch(client)?;
        self.snapshot = snapshot;
        self.orders.clear();
        Ok(())
    }

    /// Ask the platform to make `abbr` the active language, then verify it did.
    ///
    /// The platform accepts invalid switches silently, so success is judged by
    /// re-reading the snapshot rather than by the response status.
    pub fn switch_active_language<T: Transport>(
        &mut self,
        client: &SessionClient<T>,
        abbr: &str,
    ) -> Result<()> {
        info!("Switching active language to {}", abbr);
        let url = client.config().switch_language_url();
        client.post(&url, &json!({ "learning_language": abbr }))?;

        self.refresh(client)?;

        if !self.snapshot.is_active(abbr) {
            warn!("Platform ignored switch to {}", abbr);
            return Err(Error::LanguageSwitch(abbr.to_string()));
        }
        Ok(())
    }

    /// Make `abbr` active if it is not already. Returns whether a switch happened.
    pub fn ensure_active<T: Transport>(
        &mut self,
        client: &SessionClient<T>,
        abbr: &str,
    ) -> Result<bool> {
        if self.snapshot.is_active(abbr) {
            return Ok(false);
        }
        self.switch_active_language(client, abbr)?;
        Ok(true)
    }

    /// Progress for `abbr`, which must already be active.
    pub fn read(&self, abbr: &str) -> Result<&LanguageProgress> {
        self.snapshot
            .language_data
            .get(abbr)
            .ok_or_else(|| Error::LanguageNotActive(abbr.to_string()))
    }

    /// Dependency orders for the skills of `abbr`, which must already be active.
    pub fn dependency_orders(&mut self, abbr: &str) -> Result<&DependencyOrders> {
        if !self.orders.contains_key(abbr) {
            let orders = compute_orders(&self.read(abbr)?.skills)?;
            self.orders.insert(abbr.to_string(), orders);
        }
        self.orders
            .get(abbr)
            .ok_or_else(|| Error::LanguageNotActive(abbr.to_string()))
    }

    pub fn snapshot(&self) -> &UserSnapshot {
        &self.snapshot
    }
}
