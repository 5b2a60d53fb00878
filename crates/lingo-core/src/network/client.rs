use std::collections::BTreeMap;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::{debug, info};

use crate::auth::decode_subject_unverified;
use crate::config::{ClientConfig, http};
use crate::error::{Error, Result};
use crate::network::{ApiRequest, ApiResponse, Method, Transport, UreqTransport};

/// Cookies sent with every request of one session.
#[derive(Debug, Clone, Default)]
pub struct SessionCookies {
    entries: BTreeMap<String, String>,
}

impl SessionCookies {
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|v| v.as_str())
    }

    /// Render as a `Cookie` header value.
    pub fn header_value(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self
            .entries
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        Some(pairs.join("; "))
    }
}

#[derive(Debug, Deserialize)]
struct Identity {
    username: Option<String>,
    id: Option<u64>,
}

/// Authenticated session against the platform.
///
/// A `SessionClient` only exists after its authentication probe succeeded.
pub struct SessionClient<T: Transport = UreqTransport> {
    transport: T,
    config: ClientConfig,
    credential: String,
    cookies: SessionCookies,
    username: String,
    user_id: u64,
}

impl SessionClient<UreqTransport> {
    pub fn connect(credential: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let transport = UreqTransport::new(config.timeout, config.max_body_bytes);
        Self::with_transport(transport, credential, config)
    }
}

impl<T: Transport> SessionClient<T> {
    /// Resolve the user behind `credential` and verify the session.
    pub fn with_transport(
        transport: T,
        credential: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let credential = credential.into();
        let subject = decode_subject_unverified(&credential)?;

        let mut cookies = SessionCookies::default();
        cookies.set(http::JWT_COOKIE_NAME, credential.clone());

        let mut client = Self {
            transport,
            config,
            credential,
            cookies,
            username: String::new(),
            user_id: 0,
        };

        let (username, user_id) = client.resolve_identity(&subject)?;
        client.username = username;
        client.user_id = user_id;
        client.check_authentication()?;

        info!("Authenticated as {} (id {})", client.username, client.user_id);
        Ok(client)
    }

    fn resolve_identity(&self, subject: &str) -> Result<(String, u64)> {
        let url = self.config.user_by_id_url(subject, &["username", "id"]);
        let identity: Identity = self.get_json(&url).map_err(|e| match e {
            Error::NotFound(_) => {
                Error::Authentication(format!("no user for credential subject {}", subject))
            }
            other => other,
        })?;

        let username = identity
            .username
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::Authentication("could not resolve username".to_string()))?;
        let user_id = match identity.id {
            Some(id) => id,
            None => subject.parse().map_err(|_| {
                Error::Authentication(format!("subject {} is not a user id", subject))
            })?,
        };

        Ok((username, user_id))
    }

    fn check_authentication(&self) -> Result<()> {
        let url = self.config.user_by_name_url(&self.username);
        let response = self.request(Method::Get, &url, None)?;
        if response.status != 200 {
            return Err(Error::Authentication(format!(
                "probe for {} returned HTTP {}",
                self.username, response.status
            )));
        }
        Ok(())
    }

    /// Send one request with the session's bearer header, user agent and cookies.
    pub fn request(&self, method: Method, url: &str, body: Option<&JsonValue>) -> Result<ApiResponse> {
        let mut headers = vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.credential),
            ),
            ("User-Agent".to_string(), self.config.user_agent.clone()),
        ];
        if let Some(cookie) = self.cookies.header_value() {
            headers.push(("Cookie".to_string(), cookie));
        }

        let request = ApiRequest {
            method,
            url: url.to_string(),
            headers,
            body: match method {
                Method::Post => body.cloned(),
                Method::Get => None,
            },
        };

        debug!("{} {}", method, url);
        let response = self.transport.send(&request)?;
        debug!("{} {} -> {}", method, url, response.status);
        Ok(response)
    }

    fn checked(&self, method: Method, url: &str, body: Option<&JsonValue>) -> Result<ApiResponse> {
        let response = self.request(method, url, body)?;
        match response.status {
            404 => Err(Error::NotFound(url.to_string())),
            _ if response.is_success() => Ok(response),
            status => Err(Error::Network(format!("{} {} returned HTTP {}", method, url, status))),
        }
    }

    pub fn get_json<R: DeserializeOwned>(&self, url: &str) -> Result<R> {
        self.checked(Method::Get, url, None)?.decode()
    }

    pub fn post_json<R: DeserializeOwned>(&self, url: &str, body: &JsonValue) -> Result<R> {
        self.checked(Method::Post, url, Some(body))?.decode()
    }

    /// POST whose response body is not needed.
    pub fn post(&self, url: &str, body: &JsonValue) -> Result<()> {
        self.checked(Method::Post, url, Some(body)).map(|_| ())
    }

    pub fn set_cookie(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.set(name, value);
    }

    pub fn cookies(&self) -> &SessionCookies {
        &self.cookies
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_header_rendering() {
        let mut cookies = SessionCookies::default();
        assert_eq!(cookies.header_value(), None);

        cookies.set("jwt_token", "abc");
        cookies.set("lang", "en");
        assert_eq!(cookies.header_value().as_deref(), Some("jwt_token=abc; lang=en"));
        assert_eq!(cookies.get("jwt_token"), Some("abc"));
    }

    #[test]
    fn test_cookie_overwrite() {
        let mut cookies = SessionCookies::default();
        cookies.set("jwt_token", "old");
        cookies.set("jwt_token", "new");
        assert_eq!(cookies.header_value().as_deref(), Some("jwt_token=new"));
    }
}
