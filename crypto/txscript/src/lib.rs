//! Script templates for the three standard locking script classes, canonical
//! script building, and the signature scripts that unlock them.

pub mod error;
pub mod opcodes;
pub mod script_builder;
pub mod script_class;
pub mod standard;

pub use error::TxScriptError;
pub use standard::*;

pub const MAX_SCRIPT_PUBLIC_KEY_VERSION: u16 = 0;
pub const MAX_SCRIPTS_SIZE: usize = 10_000;
pub const MAX_SCRIPT_ELEMENT_SIZE: usize = 520;
