//!
//! KRC20 token transfers inscribed through a commit and a reveal transaction.
//!
//! The commit transaction pays to the script hash of a redeem script that carries
//! the token operation ([`Krc20Envelope`]). The reveal transaction spends that output,
//! exposing the redeem script and with it the operation, to the indexers tracking it.
//!

pub mod bundle;
pub mod envelope;

pub use bundle::*;
pub use envelope::*;
