//! Edge Router Library
//!
//! Pattern-based request routing for edge-style fetch dispatch, built with
//! Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────┐
//!                    │                 FETCH HANDLER                  │
//!                    │                                                │
//!   Client Request   │  ┌──────────┐   ┌──────────┐   ┌───────────┐  │
//!   ─────────────────┼─▶│ security │──▶│ routing  │──▶│  method   │  │
//!                    │  │  (cors)  │   │ (base +  │   │  table    │  │
//!                    │  └──────────┘   │ pattern) │   └─────┬─────┘  │
//!                    │       │403      └────┬─────┘         │        │
//!                    │                      │404            ▼        │
//!                    │                      │         ┌───────────┐  │
//!   Client Response  │  ┌──────────┐        │         │  handler  │  │
//!   ◀────────────────┼──│  assets  │◀───────┘         │ (awaited) │  │
//!                    │  │ fallback │   (no base match)└───────────┘  │
//!                    │  └──────────┘                                 │
//!                    └────────────────────────────────────────────────┘
//! ```
//!
//! A router owns a base prefix, an optional cross-origin allow-list and an
//! insertion-ordered table of compiled patterns, each carrying one handler
//! slot per HTTP method. Routers compose into a single fetch entry point;
//! requests outside every base fall through to the environment's static
//! asset capability.

// Core subsystems
pub mod assets;
pub mod config;
pub mod http;
pub mod routing;

// Cross-cutting concerns
pub mod security;

pub use assets::{AssetFetcher, DirectoryAssets, NoAssets};
pub use config::ServerConfig;
pub use http::{handler, DevServer, HandlerContext, WorkerEnv};
pub use routing::{EdgeRouter, FetchHandler, Method, MethodTable};
pub use security::CorsPolicy;
