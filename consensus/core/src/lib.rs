//! Transaction model, wire serialization, transaction identifiers, signing
//! hashes and mass estimation.

pub mod config;
pub mod constants;
pub mod hashing;
pub mod mass;
pub mod network;
pub mod serde_hex;
pub mod subnets;
pub mod tx;
