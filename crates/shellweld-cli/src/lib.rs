//! Shellweld CLI library.
//!
//! This crate provides the implementation behind the `shellweld` binary:
//! destination derivation, the compile pipeline, artifact packaging,
//! checksum sidecars, and detached signing.

pub mod checksum;
pub mod compile;
pub mod dest;
pub mod package;
pub mod signer;
pub mod summary;
