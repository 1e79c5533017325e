//! Top-level facade crate for devcsp.
//!
//! Re-exports the policy core and the dev-server library so users can depend on a single crate.

pub mod core {
    pub use devcsp_core::*;
}

pub mod server {
    pub use devcsp_server::*;
}
