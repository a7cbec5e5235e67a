//! HTTP implementation of [`KiraiStore`].

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{
    KiraiStore, DHALARIS_PATH, FILTER_PATH, LIST_PATH, LOGIN_PATH, RICE_MILLS_PATH, SAVE_PATH,
};
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::models::{DhalariDetails, KiraiRecord, LoginRequest, LoginResponse, RiceMill};
use crate::session::Session;

/// Error body returned by the store
#[derive(Debug, Deserialize)]
struct StoreError {
    message: String,
}

/// Client for the auth service and record store.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create an unauthenticated client for `config.api_url`.
    pub fn new(config: &Config) -> ApiResult<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Authenticate with a stored session.
    pub fn with_session(self, session: &Session) -> Self {
        self.with_token(session.access_token.clone())
    }

    /// Exchange credentials for a token and profile.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.send(self.http.post(self.url(LOGIN_PATH)).json(&body)).await?;
        log::info!("Logged in as {}", response.user.email);
        Ok(response)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send with the bearer token (if any) and decode a JSON body.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let request = request.build()?;
        log::debug!("{} {}", request.method(), request.url());

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;
        log::debug!("Response status: {} ({} bytes)", status, body.len());

        if !status.is_success() {
            let message = match serde_json::from_str::<StoreError>(&body) {
                Ok(error) => error.message,
                Err(_) if body.trim().is_empty() => status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
                Err(_) => body,
            };
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

impl KiraiStore for ApiClient {
    async fn save_record(&self, record: &KiraiRecord) -> ApiResult<KiraiRecord> {
        let saved: KiraiRecord = self
            .send(self.http.post(self.url(SAVE_PATH)).json(record))
            .await?;
        log::info!("Saved kirai record {}", saved.klno);
        Ok(saved)
    }

    async fn list_page(&self, page: usize, size: usize) -> ApiResult<Vec<KiraiRecord>> {
        let request = self
            .http
            .get(self.url(LIST_PATH))
            .query(&[("page", page), ("size", size)]);
        self.send(request).await
    }

    async fn filter(&self, field_name: &str, value: &str) -> ApiResult<Vec<KiraiRecord>> {
        let request = self
            .http
            .get(self.url(FILTER_PATH))
            .query(&[("fieldName", field_name), ("value", value)]);
        self.send(request).await
    }

    async fn rice_mills(&self) -> ApiResult<Vec<RiceMill>> {
        self.send(self.http.get(self.url(RICE_MILLS_PATH))).await
    }

    async fn dhalaris(&self) -> ApiResult<Vec<DhalariDetails>> {
        self.send(self.http.get(self.url(DHALARIS_PATH))).await
    }
}
