use std::fmt;

#[derive(Debug)]
pub enum ClientError {
    /// The HTTP exchange could not be completed (DNS, connect, TLS, reset, timeout).
    Transport(String),
    InvalidHost(String),
    MissingCredential,
    InvalidRequest(String),
    Config(String),
    Io(std::io::Error),
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
}

impl ClientError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ClientError::InvalidHost(host) => write!(f, "Invalid host name: {:?}", host),
            ClientError::MissingCredential => write!(f, "API key must not be empty"),
            ClientError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ClientError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ClientError::Io(e) => write!(f, "IO error: {}", e),
            ClientError::Json(e) => write!(f, "JSON error: {}", e),
            ClientError::Yaml(e) => write!(f, "YAML error: {}", e),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Io(e) => Some(e),
            ClientError::Json(e) => Some(e),
            ClientError::Yaml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest includes the request URL in its Display output; strip it so
        // the key query parameter never ends up in a message.
        ClientError::Transport(err.without_url().to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Io(err)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Json(err)
    }
}

impl From<serde_yaml::Error> for ClientError {
    fn from(err: serde_yaml::Error) -> Self {
        ClientError::Yaml(err)
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
