//! Token acquisition for authenticated ORKG requests

use serde::Deserialize;

use orkg_importer_core::Result;

use crate::client::{check_status, transport_error};
use crate::config::OrkgConfig;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Exchange the configured credentials for a bearer token (password grant)
pub async fn fetch_token(http: &reqwest::Client, config: &OrkgConfig) -> Result<String> {
    let creds = config.require_credentials()?;
    let url = config.token_url();
    tracing::debug!(url = %url, user = %creds.user, "Requesting access token");

    let params = [
        ("grant_type", "password"),
        ("username", creds.user.as_str()),
        ("password", creds.password.as_str()),
    ];
    let response = http
        .post(&url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(&params)
        .send()
        .await
        .map_err(transport_error("authenticate"))?;

    let token: TokenResponse = check_status("authenticate", response)
        .await?
        .json()
        .await
        .map_err(transport_error("authenticate"))?;

    tracing::info!(expires_in = ?token.expires_in, "Authenticated with ORKG");
    Ok(token.access_token)
}
