//! HTTP surface of the routing library.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → server.rs (dev server: Axum catch-all entry)
//!     → FetchHandler (policy check, router selection)
//!     → context.rs (HandlerContext handed to the matched handler)
//!     → response.rs (status / text / json construction)
//!     → Send to client
//! ```

pub mod context;
pub mod response;
pub mod server;

pub use context::{handler, BoxError, Handler, HandlerContext, HandlerResult, PathParams, WorkerEnv};
pub use server::DevServer;
