//! vmgrid-core - shared wire types and configuration.
//!
//! Everything in this crate is plain data: the descriptors read from the
//! input files, the assignment report written back out, and the
//! `vmgrid.toml` parser. The placement engine consumes these types without
//! ever touching the filesystem itself.

pub mod config;
pub mod model;

pub use config::VmgridConfig;
pub use model::*;
