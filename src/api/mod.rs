use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use crate::config::ApiConfig;
use crate::error::{Error, Result, LOGIN_FAILED};
use crate::models::{RevenuePoint, Stats, Trade, TradeDraft, TradeQuery};
use crate::session::Session;

pub mod types;
pub use types::{ErrorBody, LoginRequest, LoginResponse};

/// Remote operations the views depend on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse>;
    async fn stats(&self) -> Result<Stats>;
    async fn revenue_trend(&self) -> Result<Vec<RevenuePoint>>;
    async fn list_trades(&self, query: &TradeQuery) -> Result<Vec<Trade>>;
    async fn create_trade(&self, draft: &TradeDraft) -> Result<Trade>;
    async fn update_trade(&self, trade: &Trade) -> Result<Trade>;
    async fn delete_trade(&self, id: &str) -> Result<()>;
}

/// HTTP client for the Primetrade API. Every request carries the current
/// session token as a bearer credential when one is present.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Session) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, what: &str) -> Result<Response> {
        let response = builder.send().await.map_err(|e| {
            error!("Request to {} failed: {}", what, e);
            Error::NetworkError(format!("{}: {}", what, e))
        })?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        error!("{} returned error status {}: {}", what, status, body);
        Err(Error::ApiError {
            status: status.as_u16(),
            message: ErrorBody::message_from(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string()),
        })
    }

    async fn json<T: DeserializeOwned>(&self, builder: RequestBuilder, what: &str) -> Result<T> {
        let response = self.send(builder, what).await?;
        response.json::<T>().await.map_err(|e| {
            error!("Failed to deserialize {} response: {}", what, e);
            Error::ApiInvalidFormat(format!("Failed to parse {} response: {}", what, e))
        })
    }
}

#[async_trait]
impl DashboardApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        debug!("Logging in as {}", email);
        let response = self
            .request(Method::POST, "/auth/login")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Request to POST /auth/login failed: {}", e);
                Error::AuthError(LOGIN_FAILED.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Login rejected with status {}: {}", status, body);
            return Err(Error::AuthError(
                ErrorBody::server_message(&body).unwrap_or_else(|| LOGIN_FAILED.to_string()),
            ));
        }

        response.json::<LoginResponse>().await.map_err(|e| {
            error!("Failed to deserialize login response: {}", e);
            Error::ApiInvalidFormat(format!("Failed to parse login response: {}", e))
        })
    }

    async fn stats(&self) -> Result<Stats> {
        self.json(self.request(Method::GET, "/dashboard/stats"), "GET /dashboard/stats")
            .await
    }

    async fn revenue_trend(&self) -> Result<Vec<RevenuePoint>> {
        self.json(
            self.request(Method::GET, "/dashboard/revenue-trend"),
            "GET /dashboard/revenue-trend",
        )
        .await
    }

    async fn list_trades(&self, query: &TradeQuery) -> Result<Vec<Trade>> {
        let builder = self.request(Method::GET, "/tasks").query(&query.params());
        self.json(builder, "GET /tasks").await
    }

    async fn create_trade(&self, draft: &TradeDraft) -> Result<Trade> {
        let builder = self.request(Method::POST, "/tasks").json(draft);
        self.json(builder, "POST /tasks").await
    }

    async fn update_trade(&self, trade: &Trade) -> Result<Trade> {
        let path = format!("/tasks/{}", trade.id);
        let builder = self.request(Method::PUT, &path).json(trade);
        self.json(builder, &format!("PUT {}", path)).await
    }

    async fn delete_trade(&self, id: &str) -> Result<()> {
        let path = format!("/tasks/{}", id);
        self.send(self.request(Method::DELETE, &path), &format!("DELETE {}", path))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::common::create_test_user;
    use reqwest::header::AUTHORIZATION;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client(session: Session) -> ApiClient {
        let config = ApiConfig {
            base_url: "http://api.test/api/".to_string(),
            timeout_secs: 5,
        };
        ApiClient::new(&config, session).expect("client")
    }

    #[test]
    fn test_request_without_token_has_no_auth_header() {
        let api = client(Session::new());
        let request = api.request(Method::GET, "/dashboard/stats").build().unwrap();
        assert_eq!(request.url().as_str(), "http://api.test/api/dashboard/stats");
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_request_carries_session_token() {
        let session = Session::new();
        let api = client(session.clone());

        // Token is read per request, so a login after construction still applies.
        session.login(create_test_user(), "secret-token".into());
        let request = api.request(Method::DELETE, "tasks/42").build().unwrap();
        assert_eq!(request.url().path(), "/api/tasks/42");
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer secret-token"
        );

        session.logout();
        let request = api.request(Method::GET, "/tasks").build().unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_trade_query_encoding() {
        let api = client(Session::new());
        let query = TradeQuery {
            search: "BTC/USDT".into(),
            status: Some(crate::models::TradeStatus::Pending),
        };
        let request = api
            .request(Method::GET, "/tasks")
            .query(&query.params())
            .build()
            .unwrap();
        assert_eq!(request.url().query(), Some("search=BTC%2FUSDT&status=Pending"));
    }

    /// Answers a single request on a local port with `status` and `body`.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text
                        .lines()
                        .find_map(|l| l.to_ascii_lowercase().strip_prefix("content-length:").map(|v| v.trim().to_string()))
                        .and_then(|v| v.parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= end + 4 + length {
                        break;
                    }
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}", addr)
    }

    async fn login_against(status: &'static str, body: &'static str) -> Result<LoginResponse> {
        let config = ApiConfig {
            base_url: serve_once(status, body).await,
            timeout_secs: 5,
        };
        let api = ApiClient::new(&config, Session::new()).unwrap();
        api.login("ada@example.com", "pw").await
    }

    fn auth_message(result: Result<LoginResponse>) -> String {
        match result {
            Err(Error::AuthError(msg)) => msg,
            other => panic!("expected AuthError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejected_login_uses_message_field_only() {
        assert_eq!(
            auth_message(login_against("401 Unauthorized", r#"{"message":"Invalid credentials"}"#).await),
            "Invalid credentials"
        );
        assert_eq!(auth_message(login_against("401 Unauthorized", "{}").await), LOGIN_FAILED);
        assert_eq!(
            auth_message(login_against("401 Unauthorized", r#"{"error":"Bad creds"}"#).await),
            LOGIN_FAILED
        );
        assert_eq!(
            auth_message(login_against("400 Bad Request", r#"{"message":""}"#).await),
            LOGIN_FAILED
        );
        assert_eq!(auth_message(login_against("502 Bad Gateway", "<html></html>").await), LOGIN_FAILED);
    }

    #[tokio::test]
    async fn test_accepted_login_returns_user_and_token() {
        let resp = login_against(
            "200 OK",
            r#"{"user":{"_id":"u1","name":"Ada","email":"ada@example.com"},"token":"jwt"}"#,
        )
        .await
        .unwrap();
        assert_eq!(resp.user.name, "Ada");
        assert_eq!(resp.token, "jwt");
    }

    #[tokio::test]
    async fn test_dashboard_errors_keep_status_and_server_text() {
        let config = ApiConfig {
            base_url: serve_once("500 Internal Server Error", r#"{"error":"db down"}"#).await,
            timeout_secs: 5,
        };
        let api = ApiClient::new(&config, Session::new()).unwrap();
        match api.stats().await {
            Err(Error::ApiError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "db down");
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
        };
        let api = ApiClient::new(&config, Session::new()).unwrap();
        assert!(matches!(api.stats().await, Err(Error::NetworkError(_))));
        assert!(matches!(
            api.login("a@b.co", "pw").await,
            Err(Error::AuthError(msg)) if msg == LOGIN_FAILED
        ));
    }
}
