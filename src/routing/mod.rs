//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path, headers)
//!     → compose.rs (policy check, pick router by base prefix)
//!     → router.rs (scan route table in insertion order)
//!     → pattern.rs (segment match + param capture)
//!     → method.rs (handler slot lookup)
//!     → Handler, or 404/405
//!
//! Route Compilation (at setup):
//!     register(pattern, MethodTable)
//!     → Compile segments (literal vs capture)
//!     → Freeze as immutable table
//! ```
//!
//! # Design Decisions
//! - Patterns compiled at registration, immutable at request time
//! - No regex in the hot path (segment comparison only)
//! - First match wins, in insertion order; no specificity reordering —
//!   applications register in priority order
//! - Deterministic: same input always matches same route

pub mod compose;
pub mod method;
pub mod pattern;
pub mod router;

pub use compose::FetchHandler;
pub use method::{Method, MethodTable};
pub use pattern::Pattern;
pub use router::EdgeRouter;
