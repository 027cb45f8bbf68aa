//! Client for the PromptWiz prompt evaluation API.
//!
//! This crate provides:
//!
//! - [`Query`], one prompt evaluation request unit
//! - [`PromptWizClient`], which posts a query set to the evaluate endpoint
//! - In-band decoding of the response into an [`Evaluation`]
//!
//! # Quick Start
//!
//! ```no_run
//! use promptwiz_client::{ClientConfig, EvaluateOptions, PromptWizClient, Query};
//!
//! # async fn example() -> Result<(), promptwiz_client::ClientError> {
//! let client = PromptWizClient::new(ClientConfig::default().with_api_key("my-key"))?;
//!
//! let queries = vec![
//!     Query::new(42).with_arg("topic", "rust").with_link_id("q-1"),
//! ];
//! let evaluation = client.evaluate(&queries, EvaluateOptions::default()).await?;
//!
//! for error in evaluation.service_errors() {
//!     eprintln!("{}: {}", error.code, error.description);
//! }
//! println!("{} results ({})", evaluation.result_set.len(), evaluation.status_code);
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Errors reported by the service, and responses that could not be parsed,
//! are returned in-band in [`Evaluation::errors`] together with the HTTP
//! status code. Only transport failures and configuration problems surface
//! as [`ClientError`].
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `PROMPTWIZ_API_KEY` | Default API key (default: empty) |
//! | `PROMPTWIZ_URL` | Service base URL (default: `https://promptwiz.co.uk`) |
//! | `PROMPTWIZ_API_VERSION` | API version (default: `0.1`) |
//! | `PROMPTWIZ_TIMEOUT` | Request timeout in seconds (default: none) |

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod types;

// Re-export main types
pub use client::{EvaluateOptions, PromptWizClient, CLIENT_USER_AGENT};
pub use config::{
    ApiVersion, ClientConfig, DEFAULT_API_VERSION, DEFAULT_PROMPT_WIZ_URL, SUPPORTED_API_VERSIONS,
};
pub use error::{ClientError, ClientResult, ServiceError, UNKNOWN_RESPONSE};
pub use query::{LinkId, Query};
pub use types::{EvaluateRequest, Evaluation};
