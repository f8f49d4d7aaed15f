//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → cors.rs (fetch-metadata + Origin allow-list check)
//!     → Pass to routing, or 403
//! ```
//!
//! # Design Decisions
//! - Fail closed: a cross-site request without an allow-list entry is 403
//! - Policy rejection happens before any route matching

pub mod cors;

pub use cors::CorsPolicy;
