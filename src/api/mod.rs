pub mod client;
pub mod credential;
pub mod models;
pub mod request;
pub mod response;
pub mod transport;

pub use client::{RemoteModelClient, DEFAULT_API_HOST, DEFAULT_API_VERSION};
pub use credential::Credential;
pub use models::{GenerateContentRequest, GenerateContentResponse, ModelList};
pub use request::{Method, RequestDescriptor};
pub use response::{ParsedResponse, RawResponse, ResponseBody};
pub use transport::{HttpRequest, ReqwestTransport, Transport};
