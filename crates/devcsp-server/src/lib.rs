//! devcsp dev-server library entry.
//!
//! Wires the CSP response middleware, the violation-report endpoint, and the
//! ops endpoints around an arbitrary downstream service. It is consumed by the
//! binary (`main.rs`) and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod config;
pub mod html;
pub mod obs;
pub mod ops;
pub mod report;
pub mod router;
pub mod transport;
