//! ORKG service configuration
//!
//! Host and credentials come from explicit values first and fall back to
//! the environment:
//!
//! - `ORKG_HOST` - service base URL (default `https://orkg.org`)
//! - `ORKG_USER` / `ORKG_PASSWORD` - account credentials
//! - `ORKG_TOKEN_URL` - token endpoint (default `{host}/oauth/token`)

use orkg_importer_core::{Error, Result};

/// Production ORKG instance
pub const DEFAULT_HOST: &str = "https://orkg.org";

/// OAuth client id the ORKG backend accepts for password grants
pub const DEFAULT_CLIENT_ID: &str = "orkg-client";

/// OAuth client secret paired with [`DEFAULT_CLIENT_ID`]
pub const DEFAULT_CLIENT_SECRET: &str = "secret";

/// Account credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account e-mail / user name
    pub user: String,

    /// Account password
    pub password: String,
}

/// Connection settings for an ORKG instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrkgConfig {
    /// Base URL without trailing slash
    pub host: String,

    /// Credentials used to obtain a token
    pub credentials: Option<Credentials>,

    /// Token endpoint override
    pub token_url: Option<String>,

    /// OAuth client id
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OrkgConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            credentials: None,
            token_url: None,
            client_id: DEFAULT_CLIENT_ID.to_string(),
            client_secret: DEFAULT_CLIENT_SECRET.to_string(),
            timeout_secs: 30,
        }
    }
}

impl OrkgConfig {
    /// Build a config for `host`, normalizing the trailing slash
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Read host, credentials and token URL from the environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from a variable lookup such as the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("ORKG_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let mut config = Self::new(host);
        config.token_url = lookup("ORKG_TOKEN_URL").filter(|url| !url.is_empty());
        if let (Some(user), Some(password)) = (lookup("ORKG_USER"), lookup("ORKG_PASSWORD")) {
            config.credentials = Some(Credentials { user, password });
        }
        config
    }

    /// Send password grants to `token_url` instead of `{host}/oauth/token`
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = Some(token_url.into());
        self
    }

    /// Set credentials
    pub fn with_credentials(
        mut self,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials {
            user: user.into(),
            password: password.into(),
        });
        self
    }

    /// Credentials, or a configuration error telling the user what to set
    pub fn require_credentials(&self) -> Result<&Credentials> {
        match &self.credentials {
            Some(creds) if !creds.user.is_empty() && !creds.password.is_empty() => Ok(creds),
            _ => Err(Error::Configuration {
                message: "missing ORKG credentials; set ORKG_USER and ORKG_PASSWORD".to_string(),
            }),
        }
    }

    /// Token endpoint, defaulting to `{host}/oauth/token`
    pub fn token_url(&self) -> String {
        self.token_url
            .clone()
            .unwrap_or_else(|| format!("{}/oauth/token", self.host))
    }

    /// Absolute URL for an API path such as `/api/resources/`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }
}
