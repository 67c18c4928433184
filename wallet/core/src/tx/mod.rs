//!
//! Transaction construction, signing preimages and finalization.
//!

pub mod assembler;
pub mod built;
pub mod dto;
pub mod fees;
pub mod mass;
pub mod payment;
pub mod signing;
pub mod unsigned;

pub use self::assembler::*;
pub use self::built::*;
pub use self::dto::*;
pub use self::fees::*;
pub use self::mass::*;
pub use self::payment::*;
pub use self::signing::*;
pub use self::unsigned::*;
