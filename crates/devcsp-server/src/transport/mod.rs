//! Transport layer (HTTP response middleware).
//!
//! Exposes the middleware that attaches the negotiated policy to every
//! response passing through the dev server.

pub mod csp_headers;
