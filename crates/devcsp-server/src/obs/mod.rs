//! Lightweight in-process metrics.
//!
//! Counters are stored as atomics and rendered by the `/metrics` handler in
//! Prometheus text format. Only counts are kept; report contents are not.

pub mod metrics;
