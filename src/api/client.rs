use super::credential::Credential;
use super::models::GenerateContentRequest;
use super::request::RequestDescriptor;
use super::response::{ParsedResponse, RawResponse};
use super::transport::{HttpRequest, ReqwestTransport, Transport};
use crate::error::{ClientError, Result};
use reqwest::Url;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_API_HOST: &str = "generativelanguage.googleapis.com";
pub const DEFAULT_API_VERSION: &str = "v1beta";

/// Client for the generative-language API, authenticated with an API key.
///
/// Each [`send`](Self::send) is a single exchange: no retries, no caching,
/// and no timeout unless the transport was built with one.
#[derive(Clone)]
pub struct RemoteModelClient {
    base_host: String,
    credential: Credential,
    api_version: String,
    transport: Arc<dyn Transport>,
}

impl RemoteModelClient {
    pub fn new(base_host: &str, credential: Credential) -> Result<Self> {
        Self::with_transport(base_host, credential, Arc::new(ReqwestTransport::new()?))
    }

    pub fn with_transport(
        base_host: &str,
        credential: Credential,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        if !is_valid_hostname(base_host) {
            return Err(ClientError::InvalidHost(base_host.to_string()));
        }
        Ok(Self {
            base_host: base_host.to_ascii_lowercase(),
            credential,
            api_version: DEFAULT_API_VERSION.to_string(),
            transport,
        })
    }

    /// Empty or all-slash versions fall back to [`DEFAULT_API_VERSION`].
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        let version = version.into();
        let version = version.trim().trim_matches('/');
        self.api_version = if version.is_empty() {
            DEFAULT_API_VERSION.to_string()
        } else {
            version.to_string()
        };
        self
    }

    pub fn base_host(&self) -> &str {
        &self.base_host
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub async fn send(&self, descriptor: RequestDescriptor) -> Result<ParsedResponse> {
        Ok(self.send_raw(descriptor).await?.decode())
    }

    /// Like [`send`](Self::send) but returns the body without decoding.
    pub async fn send_raw(&self, descriptor: RequestDescriptor) -> Result<RawResponse> {
        descriptor.validate()?;

        let request = HttpRequest {
            method: descriptor.method,
            url: self.build_url(&descriptor.path)?,
            headers: descriptor.headers,
            body: descriptor.body,
        };
        debug!(
            method = request.method.as_str(),
            path = %descriptor.path,
            "sending request"
        );

        let raw = self.transport.execute(request).await?;
        debug!(
            status = raw.status_code(),
            bytes = raw.body().len(),
            "response received"
        );

        Ok(raw)
    }

    /// `GET /{version}/models`
    pub async fn list_models(&self) -> Result<ParsedResponse> {
        self.send(RequestDescriptor::get(format!("/{}/models", self.api_version)))
            .await
    }

    /// `POST /{version}/models/{model}:generateContent` with a single text part.
    pub async fn generate_content(&self, model: &str, prompt: &str) -> Result<ParsedResponse> {
        let model = model.trim_start_matches("models/");
        let path = format!("/{}/models/{}:generateContent", self.api_version, model);
        let body = GenerateContentRequest::from_prompt(prompt);
        self.send(RequestDescriptor::post_json(path, &body)?).await
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("https://{}{}", self.base_host, path))
            .map_err(|e| ClientError::InvalidRequest(format!("Invalid path {}: {}", path, e)))?;
        url.query_pairs_mut()
            .append_pair("key", self.credential.expose());
        Ok(url)
    }
}

/// RFC 1123 host name: dot-separated labels of 1-63 ASCII alphanumerics or
/// hyphens, not starting or ending with a hyphen, 253 characters at most.
pub fn is_valid_hostname(host: &str) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host);
    if host.is_empty() || host.len() > 253 {
        return false;
    }
    host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}
