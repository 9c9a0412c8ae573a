//! Forge API client
//!
//! Minimal GitLab v4 client: one GET per call, a caller-declared status that
//! counts as "no such sub-resource", and everything else either decoded or fatal.

use super::TransportError;
use crate::Result;
use ohno::IntoAppError;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

const LOG_TARGET: &str = "    client";

/// Header GitLab reads personal access tokens from
const PRIVATE_TOKEN: HeaderName = HeaderName::from_static("private-token");

/// Outcome of a fetch that tolerates one status code as absence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    /// The server returned a body
    Found(T),

    /// The server answered with the tolerated status
    Absent,
}

impl<T> Fetched<T> {
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(data) => Some(data),
            Self::Absent => None,
        }
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Whether a request carries the configured access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    Anonymous,
    Token,
}

/// Forge API client
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    base_url: String,
    token: Option<HeaderValue>,
}

impl Client {
    /// Create a new client for the API rooted at `base_url`, e.g. `https://gitlab.com/api/v4`
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let parsed = Url::parse(base_url).into_app_err_with(|| format!("invalid API base URL '{base_url}'"))?;
        if parsed.cannot_be_a_base() {
            ohno::bail!("API base URL '{base_url}' cannot be used as a base");
        }

        let token = token
            .map(|t| {
                let mut value = HeaderValue::from_str(t).into_app_err("access token contains invalid characters")?;
                value.set_sensitive(true);
                Ok::<_, ohno::AppError>(value)
            })
            .transpose()?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("forge-census/", env!("CARGO_PKG_VERSION")))
            .build()
            .into_app_err("unable to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Get the base URL for this client, without a trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an absolute API URL from a path such as `/projects/7`
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Issue a GET and hand back the raw response, whatever its status.
    pub(super) async fn get(&self, url: &str, auth: Auth) -> Result<reqwest::Response, TransportError> {
        let mut request = self.client.get(url);

        if auth == Auth::Token
            && let Some(token) = &self.token
        {
            let mut headers = HeaderMap::new();
            let _ = headers.insert(PRIVATE_TOKEN, token.clone());
            request = request.headers(headers);
        }

        log::trace!(target: LOG_TARGET, "GET {url}");
        request.send().await.map_err(|e| TransportError::network(url, e))
    }

    /// Fetch and decode a resource, treating `tolerated` as absence.
    ///
    /// Any other unsuccessful status is a [`TransportError`].
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        url: &str,
        tolerated: Option<StatusCode>,
        auth: Auth,
    ) -> Result<Fetched<T>, TransportError> {
        let resp = self.get(url, auth).await?;
        let status = resp.status();

        if Some(status) == tolerated {
            log::debug!(target: LOG_TARGET, "GET {url} answered {status}, treating as absent");
            return Ok(Fetched::Absent);
        }

        if !status.is_success() {
            return Err(TransportError::status(url, status));
        }

        resp.json().await.map(Fetched::Found).map_err(|e| TransportError::decode(url, e))
    }

    /// Fetch and decode a resource that must exist.
    pub async fn fetch_required<T: DeserializeOwned>(&self, url: &str, auth: Auth) -> Result<T, TransportError> {
        match self.fetch(url, None, auth).await? {
            Fetched::Found(data) => Ok(data),
            Fetched::Absent => Err(TransportError::status(url, StatusCode::NOT_FOUND)),
        }
    }
}
