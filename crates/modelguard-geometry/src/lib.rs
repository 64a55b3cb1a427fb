//! Geometry queries over triangle meshes.
//!
//! Everything here is pure computation over [`modelguard_types::TriMesh`]:
//! edge topology (watertightness, winding, open boundaries), connected
//! component splitting, and deterministic surface sampling. No I/O, no
//! policy; the validation layer decides what the answers mean.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod components;
mod sampling;
mod topology;

pub use components::split_components;
pub use sampling::sample_surface;
pub use topology::EdgeTopology;
