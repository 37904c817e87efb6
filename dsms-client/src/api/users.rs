//! User endpoints

use shared::models::{User, UserCreate, UserUpdate};

use crate::error::ClientResult;
use crate::http::DsmsClient;
use crate::transport::{Method, RawRequest, Transport};

impl<T: Transport> DsmsClient<T> {
    /// `GET /users/`
    pub async fn list_users(&self) -> ClientResult<Vec<User>> {
        self.request(RawRequest::new(Method::Get, "users/")).await
    }

    /// `POST /users/`
    pub async fn create_user(&self, payload: &UserCreate) -> ClientResult<User> {
        self.request(RawRequest::new(Method::Post, "users/").with_json(payload)?)
            .await
    }

    /// `PUT /users/{id}`
    pub async fn update_user(&self, id: i64, payload: &UserUpdate) -> ClientResult<User> {
        self.request(RawRequest::new(Method::Put, format!("users/{}", id)).with_json(payload)?)
            .await
    }

    /// `DELETE /users/{id}` (deactivation)
    pub async fn delete_user(&self, id: i64) -> ClientResult<()> {
        self.request_empty(RawRequest::new(Method::Delete, format!("users/{}", id)))
            .await
    }
}
