pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod ui;

pub use api::{Credential, ParsedResponse, RemoteModelClient, RequestDescriptor, ResponseBody};
pub use error::{ClientError, Result};
