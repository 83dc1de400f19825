//! GitHub contents API client.
//!
//! Implements [`RemoteStore`] over `GET`/`PUT /repos/{owner}/{repo}/contents/{path}`.
//! Every call returns its own result; nothing about a previous response is
//! kept on the client.

use reqwest::{Method, StatusCode, Url, header};

use crate::config::{RepoRef, Settings};
use crate::error::{Error, Result};
use crate::sync::{BlobId, RemoteFileMetadata};

use super::store::RemoteStore;
use super::types::{
    ApiError, ContentsResponse, FileWrite, Probe, PutContentsBody, RepositoryInfo,
};

const USER_AGENT: &str = concat!("sqlpush/", env!("CARGO_PKG_VERSION"));
const ACCEPT_V3: &str = "application/vnd.github.v3+json";

/// GitHub REST client bound to a single repository.
pub struct GitHubClient {
    client: reqwest::Client,
    api_url: Url,
    repo: RepoRef,
    token: String,
    branch: Option<String>,
}

impl GitHubClient {
    /// Build a client from resolved settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API URL is unusable or the HTTP
    /// client cannot be constructed.
    pub fn new(settings: &Settings) -> Result<Self> {
        let api_url = Url::parse(&settings.api_url)
            .map_err(|e| Error::Config(format!("Invalid API URL '{}': {e}", settings.api_url)))?;
        if api_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "Invalid API URL '{}': not a base URL",
                settings.api_url
            )));
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url,
            repo: settings.repo.clone(),
            token: settings.token.clone(),
            branch: settings.branch.clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> std::result::Result<Url, ApiError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::Transport(format!("API URL cannot be a base: {}", self.api_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn repo_url(&self) -> std::result::Result<Url, ApiError> {
        self.endpoint(&["repos", self.repo.owner.as_str(), self.repo.name.as_str()])
    }

    /// Each path segment is percent-encoded on its own; `/` stays a separator.
    fn contents_url(&self, path: &str) -> std::result::Result<Url, ApiError> {
        let mut segments = vec!["repos", self.repo.owner.as_str(), self.repo.name.as_str(), "contents"];
        segments.extend(path.split('/'));
        self.endpoint(&segments)
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header(header::AUTHORIZATION, format!("token {}", self.token))
            .header(header::ACCEPT, ACCEPT_V3)
    }
}

async fn status_error(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ApiError::Status { status, body }
}

impl RemoteStore for GitHubClient {
    async fn repository(&self) -> std::result::Result<RepositoryInfo, ApiError> {
        let url = self.repo_url()?;

        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        response
            .json::<RepositoryInfo>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn probe(&self, path: &str) -> Probe {
        let mut url = match self.contents_url(path) {
            Ok(url) => url,
            Err(e) => return Probe::Failed(e),
        };
        if let Some(branch) = &self.branch {
            url.query_pairs_mut().append_pair("ref", branch);
        }

        let response = match self.request(Method::GET, url).send().await {
            Ok(r) => r,
            Err(e) => return Probe::Failed(ApiError::Transport(e.to_string())),
        };

        match response.status() {
            StatusCode::OK => match response.json::<ContentsResponse>().await {
                Ok(contents) => Probe::Found(RemoteFileMetadata {
                    sha: BlobId::from_hex(contents.sha),
                }),
                // Directories come back as arrays
                Err(e) => Probe::Failed(ApiError::Decode(e.to_string())),
            },
            StatusCode::NOT_FOUND => Probe::Absent,
            _ => Probe::Failed(status_error(response).await),
        }
    }

    async fn put(&self, write: &FileWrite) -> std::result::Result<(), ApiError> {
        let url = self.contents_url(&write.path)?;
        let body = PutContentsBody {
            message: &write.message,
            content: &write.content,
            sha: write.sha.as_ref().map(BlobId::as_str),
            branch: self.branch.as_deref(),
        };

        let response = self
            .request(Method::PUT, url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(status_error(response).await)
        }
    }
}
