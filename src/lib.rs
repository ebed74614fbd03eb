//! Single-hop gateway that looks up video metadata from a third-party
//! provider and hands the client a download link for the requested quality.

pub mod config;
pub mod error;
pub mod format;
pub mod gateway;
pub mod provider;
pub mod resolver;
pub mod validate;

pub use config::GatewayConfig;
pub use error::{ApiError, ProviderError};
pub use format::{DownloadResponse, FormatDescriptor, VideoInfo};
pub use gateway::{AppState, router};
pub use provider::{MetadataProvider, RapidApiProvider};
pub use resolver::resolve;
