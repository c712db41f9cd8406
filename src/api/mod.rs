//! HTTP surface of the health document processor.
//!
//! Thin glue over the extraction pipeline: upload decoding, text extraction
//! dispatch, and JSON rendering of parsed parameters. The router is
//! composable: `api_router()` returns a `Router` that can be mounted on any
//! axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_server, start_server_on, ApiServer, ServerError, ServerSession};
pub use types::ApiContext;
