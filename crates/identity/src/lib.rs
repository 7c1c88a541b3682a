//! Workload identity parsing for the Claimsmith credential composer.
//!
//! A workload identity string names a workload inside a trust domain:
//!
//! ```text
//! spiffe://<trust-domain>/<workload-path>
//! ```
//!
//! This crate decomposes such a string into its trust domain and workload
//! path. Parsing is pure: no I/O, no allocation beyond the returned parts.

pub mod error;
pub mod workload_id;

pub use error::{IdentityError, IdentityResult};
pub use workload_id::{WorkloadId, SCHEME_PREFIX};
