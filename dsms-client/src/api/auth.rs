//! Auth endpoints

use shared::client::{CurrentUser, LoginRequest, TokenPair, UserPrivileges};

use crate::error::{ClientError, ClientResult};
use crate::http::{DsmsClient, extract_detail};
use crate::transport::{Method, RawRequest, Transport};

impl<T: Transport> DsmsClient<T> {
    /// `POST /auth/login` (form-encoded) - stores the returned token pair
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<TokenPair> {
        let credentials = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let request = RawRequest::new(Method::Post, "auth/login").with_form(vec![
            ("username".to_string(), credentials.username),
            ("password".to_string(), credentials.password),
        ]);
        // 登录不走 401 刷新逻辑，失败直接返回 Auth 错误
        let response = self.transport().send(&request, None).await?;
        if !(200..300).contains(&response.status) {
            return Err(ClientError::Auth(extract_detail(
                &response.body,
                response.status,
            )));
        }
        let pair: TokenPair = serde_json::from_slice(&response.body)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        self.set_tokens(pair.clone()).await;
        tracing::debug!(username = %username, "Logged in");
        Ok(pair)
    }

    /// `GET /auth/me`
    pub async fn me(&self) -> ClientResult<CurrentUser> {
        self.request(RawRequest::new(Method::Get, "auth/me")).await
    }

    /// `GET /users/{id}/privileges`
    pub async fn user_privileges(&self, user_id: i64) -> ClientResult<UserPrivileges> {
        self.request(RawRequest::new(
            Method::Get,
            format!("users/{}/privileges", user_id),
        ))
        .await
    }
}
