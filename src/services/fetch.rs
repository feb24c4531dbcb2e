use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

use crate::model::resource::{Dataset, Resource, StringRecord};

const API_ROOT: &str = "https://www.transifex.com/api/2";
const TIMEOUT_SECS: u64 = 60;
const USER_AGENT: &str = concat!("Statsbot/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("authorization failed")]
    Authorization,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Blocking client for the project API, authenticating every request with
/// HTTP Basic auth.
pub struct ApiClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl ApiClient {
    pub fn new(username: String, password: String) -> Result<Self, FetchError> {
        Self::with_base_url(API_ROOT.to_string(), username, password)
    }

    /// Points the client at a different API root (proxy or test server).
    pub fn with_base_url(
        base_url: String,
        username: String,
        password: String,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(ApiClient {
            client,
            base_url,
            username,
            password,
        })
    }

    fn get<T: DeserializeOwned>(&self, method: &str) -> Result<T, FetchError> {
        let url = format!("{}{method}", self.base_url);
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(FetchError::Authorization);
        }

        Ok(response.error_for_status()?.json()?)
    }

    pub fn list_resources(&self, project: &str) -> Result<Vec<Resource>, FetchError> {
        self.get(&format!("/project/{project}/resources/"))
    }

    pub fn list_translations(
        &self,
        project: &str,
        slug: &str,
        language: &str,
    ) -> Result<Vec<StringRecord>, FetchError> {
        self.get(&format!(
            "/project/{project}/resource/{slug}/translation/{language}/strings/?details"
        ))
    }

    /// Downloads the resource list and then the string records of every
    /// resource for the target language. No retries; the first failure
    /// aborts the whole download.
    pub fn download(&self, project: &str, language: &str) -> Result<Dataset, FetchError> {
        info!("downloading resource list");
        let mut resources = self.list_resources(project)?;

        info!(language, "downloading resource strings");
        for resource in &mut resources {
            info!(resource = %resource.name, "downloading strings");
            resource.strings = self.list_translations(project, &resource.slug, language)?;
        }

        Ok(resources)
    }
}
