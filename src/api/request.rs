use crate::error::{ClientError, Result};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// One outbound call, relative to the client's host and without the key.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub path: String,
    pub method: Method,
    pub body: Option<Bytes>,
    pub headers: HeaderMap,
}

impl RequestDescriptor {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: Method::Get,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    /// POST with a raw body; `Content-Length` is set from the body.
    pub fn post(path: impl Into<String>, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
        Self {
            path: path.into(),
            method: Method::Post,
            body: Some(body),
            headers,
        }
    }

    /// POST with a JSON-encoded body and `Content-Type: application/json`.
    pub fn post_json<T: Serialize>(path: impl Into<String>, payload: &T) -> Result<Self> {
        let body = serde_json::to_vec(payload)?;
        let mut descriptor = Self::post(path, body);
        descriptor
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(descriptor)
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ClientError::InvalidRequest(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ClientError::InvalidRequest(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.path.starts_with('/') {
            return Err(ClientError::InvalidRequest(format!(
                "path must start with '/': {}",
                self.path
            )));
        }
        if self.path.contains('?') || self.path.contains('#') {
            return Err(ClientError::InvalidRequest(
                "path must not carry a query string or fragment".to_string(),
            ));
        }

        match (&self.method, &self.body) {
            (Method::Get, Some(_)) => {
                return Err(ClientError::InvalidRequest(
                    "GET requests cannot carry a body".to_string(),
                ));
            }
            (_, None) if self.headers.contains_key(CONTENT_LENGTH) => {
                return Err(ClientError::InvalidRequest(
                    "Content-Length set without a body".to_string(),
                ));
            }
            (_, Some(body)) => {
                if let Some(declared) = self.headers.get(CONTENT_LENGTH) {
                    let declared = declared
                        .to_str()
                        .ok()
                        .and_then(|v| v.parse::<usize>().ok());
                    if declared != Some(body.len()) {
                        return Err(ClientError::InvalidRequest(format!(
                            "Content-Length does not match body length {}",
                            body.len()
                        )));
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }
}
