//! Addon API client

use crate::envelope::WrappingResponse;
use crate::error::{ApiError, Result};
use addon_env::{AddonId, CallToken, Environment};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Calls the addon API on behalf of one addon instance.
#[derive(Clone)]
pub struct AddonApiClient {
    http: Client,
    env: Arc<Environment>,
    addon_id: AddonId,
    token: CallToken,
}

impl std::fmt::Debug for AddonApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddonApiClient")
            .field("api_url", &self.env.api_url())
            .field("addon_id", &self.addon_id)
            .finish()
    }
}

impl AddonApiClient {
    pub fn new(env: Arc<Environment>, addon_id: AddonId) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let token = env.call_token();

        Ok(Self {
            http,
            env,
            addon_id,
            token,
        })
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn addon_id(&self) -> AddonId {
        self.addon_id
    }

    /// Absolute URL for `path`, relative to the resolved API base
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.env.api().endpoint(self.addon_id, path)?)
    }

    #[instrument(skip(self), fields(addon_id = %self.addon_id))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        self.send(self.http.get(url)).await
    }

    /// GET with `query` serialized into the query string. Anything
    /// `serde_urlencoded` accepts works: a flat struct, a map, or a slice
    /// of pairs.
    #[instrument(skip(self, query), fields(addon_id = %self.addon_id))]
    pub async fn get_with_query<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        self.send(self.http.get(url).query(query)).await
    }

    /// Query the rows of a schema collection owned by this addon.
    #[instrument(skip(self, query), fields(addon_id = %self.addon_id))]
    pub async fn query_rows<Q, T>(&self, collection: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        if collection.is_empty() || collection.contains(['/', '?', '#', '\\']) || collection == ".." {
            return Err(ApiError::InvalidCollection {
                name: collection.to_string(),
            });
        }
        self.get_with_query(&format!("schema/{collection}/query"), query)
            .await
    }

    #[instrument(skip(self, body), fields(addon_id = %self.addon_id))]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        self.send(self.http.post(url).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .header(AUTHORIZATION, self.token.header_value())
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Addon API responded");
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = status.as_u16(), "Addon API request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<WrappingResponse<T>>().await?.into_result()
    }
}
