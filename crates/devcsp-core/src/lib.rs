//! devcsp core: Content-Security-Policy model, serialization and negotiation.
//!
//! This crate turns a declared directive configuration into the header value a
//! dev server attaches to every response, decides which header name carries it,
//! and reports which directives a `<meta>` delivered policy cannot express. It
//! carries no HTTP or runtime dependencies so the same logic backs both the
//! per-request middleware and build-time HTML generation.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `CspError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod negotiate;
pub mod policy;
pub mod report;

/// Shared result type.
pub use error::{CspError, Result};
pub use negotiate::{negotiate, EffectiveCsp, RuntimeParams};
pub use policy::{build_policy_string, unsupported_directives, CspHeader, Policy, SourceList};
pub use report::ViolationReport;
