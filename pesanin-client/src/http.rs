//! HTTP client for the Pesanin REST API
//!
//! Request phase: the bearer token is read from the token storage slot on
//! every call. Response phase: a 401 clears the token slot, the persisted
//! identity blob and the auth store, then bounces a role-gated view to login.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::response::{ApiResponse, PaginatedResponse};
use tokio::sync::RwLock;

use crate::auth::AuthStore;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::navigation::{NavigationMode, Navigator, routes};
use crate::storage::{self, SharedStorage, keys};

/// HTTP client with the auth interceptor
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    storage: SharedStorage,
    auth: Arc<RwLock<AuthStore>>,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        storage: SharedStorage,
        auth: Arc<RwLock<AuthStore>>,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            storage,
            auth,
            navigator,
        })
    }

    /// Base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current token slot contents
    pub fn token(&self) -> Option<String> {
        storage::read_json::<String>(&*self.storage, keys::TOKEN).filter(|t| !t.is_empty())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Request with JSON content type and, when a token is stored, a bearer header
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self
            .client
            .request(method, self.url(path))
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(token) = self.token() {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Send and map non-2xx statuses to errors
    async fn execute(&self, req: RequestBuilder) -> ClientResult<Response> {
        let response = req.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized().await;
            return Err(ClientError::Unauthorized);
        }

        let text = response.text().await?;
        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text)
            .map(|e| e.message)
            .unwrap_or(text);

        Err(match status {
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(message)
            }
            _ => ClientError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }

    /// Server rejected our credentials: forget them everywhere
    async fn handle_unauthorized(&self) {
        tracing::warn!("Received 401, clearing session");

        storage::remove(&*self.storage, keys::TOKEN);
        storage::remove(&*self.storage, keys::USER);
        self.auth.write().await.logout();

        let current = self.navigator.current_path();
        if routes::is_role_gated(&current) {
            self.navigator.navigate(routes::LOGIN, NavigationMode::Full);
        }
    }

    async fn json<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let response = self.execute(req).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {e}")))
    }

    /// Unwrap `{success, message, data}`
    async fn data<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let envelope: ApiResponse<T> = self.json(req).await?;
        if !envelope.success {
            return Err(ClientError::Api {
                status: StatusCode::OK.as_u16(),
                message: envelope.message,
            });
        }
        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing data".into()))
    }

    /// Like [`Self::data`] for endpoints whose payload is ignored
    async fn unit(&self, req: RequestBuilder) -> ClientResult<()> {
        let response = self.execute(req).await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(());
        }
        let envelope: ApiResponse<serde_json::Value> = serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {e}")))?;
        if !envelope.success {
            return Err(ClientError::Api {
                status: StatusCode::OK.as_u16(),
                message: envelope.message,
            });
        }
        Ok(())
    }

    // ========== Verb helpers ==========

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.data(self.request(Method::GET, path)).await
    }

    pub async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        self.data(self.request(Method::GET, path).query(query)).await
    }

    pub async fn get_page<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<PaginatedResponse<T>> {
        self.json(self.request(Method::GET, path).query(query)).await
    }

    pub async fn get_bytes(&self, path: &str) -> ClientResult<Vec<u8>> {
        let response = self.execute(self.request(Method::GET, path)).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.data(self.request(Method::POST, path).json(body)).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.data(self.request(Method::POST, path)).await
    }

    /// Multipart upload; the content type is set by the form itself
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ClientResult<T> {
        let mut req = self.client.post(self.url(path)).multipart(form);
        if let Some(token) = self.token() {
            req = req.bearer_auth(token);
        }
        self.data(req).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.data(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn put_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<()> {
        self.unit(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn patch_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<()> {
        self.unit(self.request(Method::PATCH, path).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.unit(self.request(Method::DELETE, path)).await
    }
}
