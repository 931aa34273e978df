//! Form-posting HTTP client for the nideriji API.

use std::time::Duration;

use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::protocol::{
    DiariesResponse, FormFields, LoginResponse, NewDiary, StatusResponse, SyncMarkers,
    SyncResponse,
};

/// Production API root.
pub const DEFAULT_SERVER_URL: &str = "https://nideriji.cn/api";
/// Client identification the server expects on every request.
pub const DEFAULT_USER_AGENT: &str = "OhApp/3.0 Platform/Android";
/// Header carrying `token <value>` once logged in.
pub const AUTH_HEADER: &str = "auth";

/// Per-request headers.
///
/// Logging in produces an authenticated copy via [`RequestConfig::authenticated`];
/// the client itself never stores credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    user_agent: String,
    origin: Option<String>,
    token: Option<String>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self::new(DEFAULT_USER_AGENT)
    }
}

impl RequestConfig {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            origin: None,
            token: None,
        }
    }

    /// Sends a fixed `Origin` header with every request.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// A copy of this configuration that carries `token`.
    pub fn authenticated(&self, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..self.clone()
        }
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Value of the [`AUTH_HEADER`] header, if authenticated.
    pub fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("token {}", token))
    }
}

/// Client for the nideriji API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    server_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Creates a client whose connections give up after `timeout`.
    pub fn with_connect_timeout(
        server_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            server_url: server_url.into(),
            http,
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// `POST /login/`
    pub async fn login(
        &self,
        request: &RequestConfig,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        let fields = vec![("email", email.to_string()), ("password", password.to_string())];
        self.post_form(request, "/login/", &fields).await
    }

    /// `POST /v2/sync/`
    pub async fn sync(
        &self,
        request: &RequestConfig,
        markers: SyncMarkers,
    ) -> Result<SyncResponse, ApiError> {
        self.post_form(request, "/v2/sync/", &markers.to_form()).await
    }

    /// `POST /write/`
    pub async fn write_diary(
        &self,
        request: &RequestConfig,
        diary: &NewDiary,
    ) -> Result<StatusResponse, ApiError> {
        self.post_form(request, "/write/", &diary.to_form()).await
    }

    /// `POST /diary/all_by_ids/{owner_id}/`
    pub async fn diaries_by_ids(
        &self,
        request: &RequestConfig,
        owner_id: i64,
        diary_ids: &[i64],
    ) -> Result<DiariesResponse, ApiError> {
        let ids = diary_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let path = format!("/diary/all_by_ids/{}/", owner_id);
        let fields = vec![("diary_ids", ids)];
        self.post_form(request, &path, &fields).await
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        request: &RequestConfig,
        path: &str,
        fields: &FormFields,
    ) -> Result<T, ApiError> {
        let url = self.build_url(path);
        tracing::debug!("POST {}", url);

        let mut builder = self
            .http
            .post(&url)
            .header(reqwest::header::USER_AGENT, request.user_agent())
            .form(fields);
        if let Some(origin) = request.origin() {
            builder = builder.header(reqwest::header::ORIGIN, origin);
        }
        if let Some(auth) = request.auth_header() {
            builder = builder.header(AUTH_HEADER, auth);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Joins an endpoint path onto the server URL.
    fn build_url(&self, path: &str) -> String {
        let base_url = if !self.server_url.starts_with("http://")
            && !self.server_url.starts_with("https://")
        {
            format!("https://{}", self.server_url)
        } else {
            self.server_url.clone()
        };

        format!("{}{}", base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockServer;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_build_url() {
        let client = ApiClient::new("https://nideriji.cn/api");
        assert_eq!(client.build_url("/login/"), "https://nideriji.cn/api/login/");

        let client = ApiClient::new("https://nideriji.cn/api/");
        assert_eq!(client.build_url("/v2/sync/"), "https://nideriji.cn/api/v2/sync/");

        let client = ApiClient::new("http://localhost:5173/api");
        assert_eq!(client.build_url("/write/"), "http://localhost:5173/api/write/");

        let client = ApiClient::new("nideriji.cn/api");
        assert_eq!(client.build_url("/login/"), "https://nideriji.cn/api/login/");
    }

    #[test]
    fn test_request_config_authenticated() {
        let base = RequestConfig::default();
        assert_eq!(base.user_agent(), DEFAULT_USER_AGENT);
        assert!(!base.is_authenticated());
        assert_eq!(base.auth_header(), None);

        let authed = base.authenticated("abc");
        assert_eq!(authed.auth_header().as_deref(), Some("token abc"));
        assert_eq!(authed.user_agent(), DEFAULT_USER_AGENT);
        // The original is left as it was.
        assert!(!base.is_authenticated());
    }

    #[tokio::test]
    async fn test_headers_and_form_reach_server() {
        let server = MockServer::new();
        server.reply("write", json!({ "error": 0 }));
        let url = server.spawn().await;

        let client = ApiClient::new(url);
        let request = RequestConfig::default()
            .with_origin("https://nideriji.cn")
            .authenticated("abc");
        let diary = NewDiary {
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            title: Some("t".to_string()),
            content: "c".to_string(),
        };

        let response = client.write_diary(&request, &diary).await.unwrap();
        assert!(response.check().is_ok());

        let seen = server.last_request("write").unwrap();
        assert_eq!(seen.auth.as_deref(), Some("token abc"));
        assert_eq!(seen.user_agent.as_deref(), Some(DEFAULT_USER_AGENT));
        assert_eq!(seen.origin.as_deref(), Some("https://nideriji.cn"));
        assert_eq!(seen.form.get("date").map(String::as_str), Some("2024-03-05"));
        assert_eq!(seen.form.get("title").map(String::as_str), Some("t"));
    }

    #[tokio::test]
    async fn test_diaries_by_ids_path() {
        let server = MockServer::new();
        server.reply(
            "diary",
            json!({ "error": 0, "diaries": [
                { "id": 9, "user": 43, "date": "2024-03-05", "content": "x" }
            ] }),
        );
        let url = server.spawn().await;

        let client = ApiClient::new(url);
        let response = client
            .diaries_by_ids(&RequestConfig::default(), 43, &[9])
            .await
            .unwrap();
        assert_eq!(response.into_first().unwrap().id, 9);

        let seen = server.last_request("diary").unwrap();
        assert_eq!(seen.owner, Some(43));
        assert_eq!(seen.form.get("diary_ids").map(String::as_str), Some("9"));
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::new();
        server.fail("login", 502);
        let url = server.spawn().await;

        let client = ApiClient::new(url);
        let result = client.login(&RequestConfig::default(), "a", "b").await;
        assert!(matches!(result, Err(ApiError::HttpStatus(502))));
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let client = ApiClient::new("http://127.0.0.1:1");
        let result = client.login(&RequestConfig::default(), "a", "b").await;
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }

    #[tokio::test]
    async fn test_non_json_body() {
        let server = MockServer::new();
        server.reply_raw("sync", "<html>maintenance</html>");
        let url = server.spawn().await;

        let client = ApiClient::new(url);
        let result = client
            .sync(&RequestConfig::default(), SyncMarkers::full())
            .await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
