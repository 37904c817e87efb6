//! Role endpoints

use shared::models::{Role, RoleCreate, RolePrivilegeSet, RoleUpdate};

use crate::error::ClientResult;
use crate::http::DsmsClient;
use crate::transport::{Method, RawRequest, Transport};

impl<T: Transport> DsmsClient<T> {
    /// `GET /roles/`
    pub async fn list_roles(&self) -> ClientResult<Vec<Role>> {
        self.request(RawRequest::new(Method::Get, "roles/")).await
    }

    /// `POST /roles/`
    pub async fn create_role(&self, payload: &RoleCreate) -> ClientResult<Role> {
        self.request(RawRequest::new(Method::Post, "roles/").with_json(payload)?)
            .await
    }

    /// `PUT /roles/{id}`
    pub async fn update_role(&self, id: i64, payload: &RoleUpdate) -> ClientResult<Role> {
        self.request(RawRequest::new(Method::Put, format!("roles/{}", id)).with_json(payload)?)
            .await
    }

    /// `DELETE /roles/{id}` (deactivation)
    pub async fn delete_role(&self, id: i64) -> ClientResult<()> {
        self.request_empty(RawRequest::new(Method::Delete, format!("roles/{}", id)))
            .await
    }

    /// `GET /roles/{id}/privileges`
    pub async fn role_privileges(&self, id: i64) -> ClientResult<Vec<String>> {
        self.request(RawRequest::new(
            Method::Get,
            format!("roles/{}/privileges", id),
        ))
        .await
    }

    /// `POST /roles/{id}/privileges` - replaces the role's privilege set
    pub async fn set_role_privileges(&self, id: i64, privileges: Vec<String>) -> ClientResult<()> {
        self.request_empty(
            RawRequest::new(Method::Post, format!("roles/{}/privileges", id))
                .with_json(&RolePrivilegeSet { privileges })?,
        )
        .await
    }
}
