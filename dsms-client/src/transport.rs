//! Transport seam
//!
//! `Transport` carries one request/response exchange; the real
//! implementation wraps `reqwest`. Token handling and retry live above
//! this seam in [`crate::http::DsmsClient`] so they can be exercised
//! against a scripted transport in tests.

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// HTTP method subset used by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Body of an outgoing request
#[derive(Debug, Clone)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` (login endpoint)
    Form(Vec<(String, String)>),
    /// Multipart upload with a single `file` part (import preview)
    File { file_name: String, bytes: Vec<u8> },
}

/// One outgoing request, before bearer attachment
#[derive(Debug, Clone)]
pub struct RawRequest {
    pub method: Method,
    /// Path relative to the base URL, no leading slash required
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Body,
}

impl RawRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_json<B: serde::Serialize>(mut self, body: &B) -> ClientResult<Self> {
        self.body = Body::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_form(mut self, form: Vec<(String, String)>) -> Self {
        self.body = Body::Form(form);
        self
    }

    pub fn with_file(mut self, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.body = Body::File {
            file_name: file_name.into(),
            bytes,
        };
        self
    }
}

/// One incoming response, before status/error normalization
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// A single request/response exchange against the backend
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &RawRequest, bearer: Option<&str>) -> ClientResult<RawResponse>;
}

/// Production transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Backend base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &RawRequest, bearer: Option<&str>) -> ClientResult<RawResponse> {
        let url = format!("{}/{}", self.base_url, request.path.trim_start_matches('/'));
        let mut req = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        req = match &request.body {
            Body::Empty => req,
            Body::Json(value) => req.json(value),
            Body::Form(fields) => req.form(fields),
            Body::File { file_name, bytes } => {
                let part = reqwest::multipart::Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str("text/csv")
                    .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
                req.multipart(reqwest::multipart::Form::new().part("file", part))
            }
        };
        if let Some(token) = bearer {
            req = req.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let response = req.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(RawResponse { status, body })
    }
}
