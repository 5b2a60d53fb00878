use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Malformed credential: {0}")]
    MalformedCredential(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to switch active language to '{0}'")]
    LanguageSwitch(String),

    #[error("Language '{0}' is not the active learning language")]
    LanguageNotActive(String),

    #[error("Language '{0}' not found for this user")]
    UnknownLanguage(String),

    #[error("Dependency cycle encountered: {}", chain.join(" -> "))]
    DependencyCycle { chain: Vec<String> },

    #[error("Skill '{skill}' depends on unknown skill '{dependency}'")]
    UnknownDependency { skill: String, dependency: String },

    #[error("Pagination protocol violation: {0}")]
    PaginationProtocol(String),

    #[error("Missing field in response: {0}")]
    MissingField(String),

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<ureq::Error> for Error {
    fn from(e: ureq::Error) -> Self {
        let message = match &e {
            ureq::Error::Timeout(_) => format!("Request timed out: {}", e),
            ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => {
                format!("Connection failed: {}", e)
            }
            ureq::Error::StatusCode(status) => format!("HTTP {} error", status),
            ureq::Error::Io(_) => format!("Transport error: {}", e),
            _ => format!("HTTP error: {}", e),
        };
        Error::Network(message)
    }
}
