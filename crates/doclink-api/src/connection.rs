//! Connection settings and the shared blocking HTTP client

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use url::Url;

use crate::{Error, Result};

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything needed to reach the API.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Base URL of the server, e.g. `https://docs.example.org`
    pub api_base_url: Url,
    /// PEM client certificate for mutual TLS
    pub client_cert: Option<PathBuf>,
    /// PEM private key matching `client_cert`
    pub client_key: Option<PathBuf>,
    /// API token sent as `Authorization: Token <token>`
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ConnectionConfig {
    pub fn new(api_base_url: Url) -> Self {
        Self {
            api_base_url,
            client_cert: None,
            client_key: None,
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// The certificate/key pair, if both halves are configured.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompleteIdentity`] when exactly one half is set.
    pub fn identity_paths(&self) -> Result<Option<(&Path, &Path)>> {
        match (&self.client_cert, &self.client_key) {
            (Some(cert), Some(key)) => Ok(Some((cert.as_path(), key.as_path()))),
            (None, None) => Ok(None),
            _ => Err(Error::IncompleteIdentity),
        }
    }
}

/// A configured HTTP client bound to one API server.
#[derive(Debug, Clone)]
pub struct Connection {
    client: Client,
    base_url: Url,
}

impl Connection {
    /// Build the HTTP client.
    ///
    /// Loads the client identity (if any) and installs the token header.
    /// No request is sent.
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        let mut builder = Client::builder().timeout(config.timeout);

        if let Some((cert, key)) = config.identity_paths()? {
            builder = builder.identity(load_identity(cert, key)?);
        }

        if let Some(token) = &config.token {
            let mut value =
                HeaderValue::from_str(&format!("Token {token}")).map_err(|_| Error::InvalidToken)?;
            value.set_sensitive(true);
            let mut headers = HeaderMap::new();
            headers.insert(AUTHORIZATION, value);
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(Error::Client)?;

        Ok(Self {
            client,
            base_url: with_trailing_slash(config.api_base_url),
        })
    }

    /// Get the base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path such as `/api/tags/` against the base URL.
    ///
    /// The path is taken relative to the base, so a server mounted below a
    /// sub-path keeps its prefix.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let relative = path.trim_start_matches('/');
        self.base_url.join(relative).map_err(|source| Error::Url {
            url: format!("{}{}", self.base_url, relative),
            source,
        })
    }

    /// Send a GET request and fail on any non-success status.
    ///
    /// No retry is attempted.
    pub fn get(&self, url: &Url, params: &[(String, String)]) -> Result<Response> {
        tracing::debug!(url = %url, ?params, "Querying API");

        let response = self
            .client
            .get(url.clone())
            .query(params)
            .send()
            .map_err(|source| Error::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::error!(
                url = %url,
                status_code = status.as_u16(),
                reason = status.canonical_reason().unwrap_or_default(),
                "Failed to fetch data from API"
            );
            tracing::debug!(response = %body, "Response");
            return Err(Error::Http {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn load_identity(cert: &Path, key: &Path) -> Result<reqwest::Identity> {
    let read = |path: &Path| {
        fs::read(path).map_err(|e| Error::Identity {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    };

    let mut pem = read(cert)?;
    pem.push(b'\n');
    pem.extend(read(key)?);

    reqwest::Identity::from_pem(&pem).map_err(|e| Error::Identity {
        path: cert.to_path_buf(),
        message: e.to_string(),
    })
}
