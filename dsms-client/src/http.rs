//! DSMS HTTP client core
//!
//! 负责 token 管理与 401 刷新重试:
//! - attaches the bearer token from the shared token pair
//! - on 401, refreshes once via `POST /auth/refresh` and replays the
//!   original request once; a second 401 (or a failed refresh) clears
//!   the token pair and surfaces [`ClientError::SessionExpired`]
//! - normalizes non-2xx bodies (`{detail}` JSON) into typed errors
//! - treats `204 No Content` as success with no body

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use shared::client::TokenPair;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::transport::{Method, RawRequest, RawResponse, ReqwestTransport, Transport};

/// Error body shape returned by the backend
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Typed client over an arbitrary transport
pub struct DsmsClient<T: Transport = ReqwestTransport> {
    transport: T,
    tokens: RwLock<Option<TokenPair>>,
}

impl DsmsClient<ReqwestTransport> {
    /// Create a client against the configured backend
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::with_transport(ReqwestTransport::new(config)?))
    }
}

impl<T: Transport> DsmsClient<T> {
    /// Create a client over a custom transport (used by tests)
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            tokens: RwLock::new(None),
        }
    }

    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    /// Current token pair, if any
    pub async fn tokens(&self) -> Option<TokenPair> {
        self.tokens.read().await.clone()
    }

    /// Install a token pair (e.g. from a persisted session)
    pub async fn set_tokens(&self, tokens: TokenPair) {
        *self.tokens.write().await = Some(tokens);
    }

    /// Drop the token pair; subsequent calls go out unauthenticated
    pub async fn clear_tokens(&self) {
        *self.tokens.write().await = None;
    }

    async fn access_token(&self) -> Option<String> {
        self.tokens
            .read()
            .await
            .as_ref()
            .map(|t| t.access_token.clone())
    }

    /// Send a request expecting a JSON body of type `R`
    pub(crate) async fn request<R: DeserializeOwned>(&self, request: RawRequest) -> ClientResult<R> {
        let response = self.send_authorized(&request).await?;
        serde_json::from_slice(&response.body)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Send a request where the response body is irrelevant (204 or ignored)
    pub(crate) async fn request_empty(&self, request: RawRequest) -> ClientResult<()> {
        self.send_authorized(&request).await?;
        Ok(())
    }

    /// Send with bearer attachment and the one-shot refresh-retry
    async fn send_authorized(&self, request: &RawRequest) -> ClientResult<RawResponse> {
        let token = self.access_token().await;
        let response = self.transport.send(request, token.as_deref()).await?;
        if response.status != 401 {
            return check_status(response);
        }

        // 401: refresh once, then replay the original request once
        self.refresh_tokens().await?;
        let token = self.access_token().await;
        let response = self.transport.send(request, token.as_deref()).await?;
        if response.status == 401 {
            tracing::warn!("Request rejected again after token refresh, clearing session");
            self.clear_tokens().await;
            return Err(ClientError::SessionExpired);
        }
        check_status(response)
    }

    /// `POST /auth/refresh?refresh_token=` - failure clears the pair
    async fn refresh_tokens(&self) -> ClientResult<()> {
        let refresh_token = {
            self.tokens
                .read()
                .await
                .as_ref()
                .map(|t| t.refresh_token.clone())
        };
        let Some(refresh_token) = refresh_token else {
            return Err(ClientError::SessionExpired);
        };

        tracing::debug!("Access token rejected, attempting refresh");
        let request = RawRequest::new(Method::Post, "auth/refresh")
            .with_query(vec![("refresh_token".to_string(), refresh_token)]);
        let response = self.transport.send(&request, None).await?;
        if !(200..300).contains(&response.status) {
            self.clear_tokens().await;
            return Err(ClientError::SessionExpired);
        }

        let pair: TokenPair = serde_json::from_slice(&response.body)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        *self.tokens.write().await = Some(pair);
        tracing::debug!("Token refresh succeeded");
        Ok(())
    }
}

/// Map a non-2xx response to an API error with the `detail` message
fn check_status(response: RawResponse) -> ClientResult<RawResponse> {
    if (200..300).contains(&response.status) {
        return Ok(response);
    }
    Err(ClientError::Api {
        status: response.status,
        detail: extract_detail(&response.body, response.status),
    })
}

/// `detail` from the error body, or a generic fallback
pub(crate) fn extract_detail(body: &[u8], status: u16) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .unwrap_or_else(|| format!("Request failed with status {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Body;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted transport: pops canned responses, records every exchange
    struct ScriptedTransport {
        responses: Mutex<Vec<RawResponse>>,
        calls: Mutex<Vec<(String, Option<String>)>>,
    }

    impl ScriptedTransport {
        fn new(mut responses: Vec<RawResponse>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, Option<String>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for &ScriptedTransport {
        async fn send(
            &self,
            request: &RawRequest,
            bearer: Option<&str>,
        ) -> ClientResult<RawResponse> {
            self.calls
                .lock()
                .unwrap()
                .push((request.path.clone(), bearer.map(str::to_string)));
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop()
                .expect("script exhausted"))
        }
    }

    fn ok(body: &str) -> RawResponse {
        RawResponse {
            status: 200,
            body: body.as_bytes().to_vec(),
        }
    }

    fn status(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    fn pair(access: &str, refresh: &str) -> TokenPair {
        TokenPair {
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
            token_type: "bearer".to_string(),
        }
    }

    fn token_json(access: &str, refresh: &str) -> String {
        format!(
            r#"{{"access_token":"{}","refresh_token":"{}","token_type":"bearer"}}"#,
            access, refresh
        )
    }

    #[tokio::test]
    async fn test_refresh_retry_is_transparent() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let script = ScriptedTransport::new(vec![
            status(401, "{\"detail\":\"token expired\"}"),
            ok(&token_json("fresh", "r2")),
            ok("[{\"id\":1,\"name\":\"Bolts\",\"description\":null,\"parent_id\":null,\"display_order\":0,\"is_active\":true}]"),
        ]);
        let client = DsmsClient::with_transport(&script);
        client.set_tokens(pair("stale", "r1")).await;

        let categories: Vec<shared::models::Category> = client
            .request(RawRequest::new(Method::Get, "item-categories/"))
            .await
            .unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Bolts");

        // original -> refresh -> replay, exactly three exchanges
        let calls = script.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], ("item-categories/".to_string(), Some("stale".to_string())));
        assert_eq!(calls[1], ("auth/refresh".to_string(), None));
        assert_eq!(calls[2], ("item-categories/".to_string(), Some("fresh".to_string())));

        let tokens = client.tokens().await.unwrap();
        assert_eq!(tokens.access_token, "fresh");
    }

    #[tokio::test]
    async fn test_second_401_clears_session() {
        let script = ScriptedTransport::new(vec![
            status(401, "{}"),
            ok(&token_json("fresh", "r2")),
            status(401, "{}"),
        ]);
        let client = DsmsClient::with_transport(&script);
        client.set_tokens(pair("stale", "r1")).await;

        let result: ClientResult<Vec<shared::models::Label>> = client
            .request(RawRequest::new(Method::Get, "labels/"))
            .await;
        assert!(matches!(result, Err(ClientError::SessionExpired)));
        assert!(client.tokens().await.is_none());
    }

    #[tokio::test]
    async fn test_failed_refresh_clears_session() {
        let script = ScriptedTransport::new(vec![
            status(401, "{}"),
            status(401, "{\"detail\":\"refresh token revoked\"}"),
        ]);
        let client = DsmsClient::with_transport(&script);
        client.set_tokens(pair("stale", "r1")).await;

        let result = client
            .request_empty(RawRequest::new(Method::Delete, "labels/9"))
            .await;
        assert!(matches!(result, Err(ClientError::SessionExpired)));
        assert!(client.tokens().await.is_none());
        // no replay after a failed refresh
        assert_eq!(script.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_401_without_refresh_token_is_expired() {
        let script = ScriptedTransport::new(vec![status(401, "{}")]);
        let client = DsmsClient::with_transport(&script);

        let result = client
            .request_empty(RawRequest::new(Method::Get, "auth/me"))
            .await;
        assert!(matches!(result, Err(ClientError::SessionExpired)));
    }

    #[tokio::test]
    async fn test_error_detail_extraction() {
        let script = ScriptedTransport::new(vec![status(
            409,
            "{\"detail\":\"sku already exists\"}",
        )]);
        let client = DsmsClient::with_transport(&script);
        client.set_tokens(pair("a", "r")).await;

        let result = client
            .request_empty(
                RawRequest::new(Method::Post, "items/")
                    .with_json(&serde_json::json!({"sku": "X"}))
                    .unwrap(),
            )
            .await;
        match result {
            Err(ClientError::Api { status, detail }) => {
                assert_eq!(status, 409);
                assert_eq!(detail, "sku already exists");
            }
            other => panic!("expected Api error, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_error_fallback_message() {
        let script = ScriptedTransport::new(vec![status(500, "<html>boom</html>")]);
        let client = DsmsClient::with_transport(&script);
        client.set_tokens(pair("a", "r")).await;

        let result = client
            .request_empty(RawRequest::new(Method::Get, "stock/low-stock"))
            .await;
        match result {
            Err(ClientError::Api { status, detail }) => {
                assert_eq!(status, 500);
                assert_eq!(detail, "Request failed with status 500");
            }
            other => panic!("expected Api error, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_204_is_success_without_body() {
        let script = ScriptedTransport::new(vec![RawResponse {
            status: 204,
            body: Vec::new(),
        }]);
        let client = DsmsClient::with_transport(&script);
        client.set_tokens(pair("a", "r")).await;

        client
            .request_empty(RawRequest::new(Method::Delete, "labels/3"))
            .await
            .unwrap();
    }

    #[test]
    fn test_body_constructors() {
        let req = RawRequest::new(Method::Post, "auth/login")
            .with_form(vec![("username".into(), "ops".into())]);
        assert!(matches!(req.body, Body::Form(_)));
        let req = RawRequest::new(Method::Post, "machinery/import/preview")
            .with_file("machines.csv", vec![1, 2, 3]);
        assert!(matches!(req.body, Body::File { .. }));
    }
}
