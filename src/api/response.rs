use crate::error::Result;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Status code and body exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    status_code: u16,
    body: Bytes,
}

impl RawResponse {
    pub fn new(status_code: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Decode the body as JSON, keeping the raw bytes when that fails.
    pub fn decode(self) -> ParsedResponse {
        let body = match serde_json::from_slice::<Value>(&self.body) {
            Ok(value) => ResponseBody::Parsed(value),
            Err(_) => ResponseBody::Raw(self.body),
        };
        ParsedResponse {
            status_code: self.status_code,
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Parsed(Value),
    Raw(Bytes),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    pub status_code: u16,
    pub body: ResponseBody,
}

impl ParsedResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn as_json(&self) -> Option<&Value> {
        match &self.body {
            ResponseBody::Parsed(value) => Some(value),
            ResponseBody::Raw(_) => None,
        }
    }

    pub fn as_raw(&self) -> Option<&Bytes> {
        match &self.body {
            ResponseBody::Raw(bytes) => Some(bytes),
            ResponseBody::Parsed(_) => None,
        }
    }

    /// Deserialize a parsed body into a typed model. Returns `None` for raw bodies.
    pub fn json<T: DeserializeOwned>(&self) -> Option<Result<T>> {
        self.as_json()
            .map(|value| serde_json::from_value(value.clone()).map_err(Into::into))
    }

    /// Body rendered for display: pretty JSON, or the raw bytes as lossy UTF-8.
    pub fn body_text(&self) -> String {
        match &self.body {
            ResponseBody::Parsed(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            ResponseBody::Raw(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// Concatenated text parts of the first candidate of a generateContent response.
pub fn extract_text(response_json: &Value) -> Option<String> {
    let parts = response_json
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Error message of a Google API error body (`{"error": {"message": ...}}`).
pub fn extract_error_message(response_json: &Value) -> Option<String> {
    response_json
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(|s| s.to_string())
}
