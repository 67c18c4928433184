//!
//! Transaction construction and signing for UTXO wallets.
//!
//! The crate tracks spendable outputs per locking script ([`utxo::UtxoStore`]),
//! selects and assembles unsigned transactions, hands out per-input signing
//! preimages and turns the returned signatures into broadcast-ready transactions
//! ([`tx::BuiltTransaction`]). The [`krc20`] module chains a commit and a reveal
//! transaction to inscribe KRC20 token operations.
//!
//! [`TransactionBuilder`] ties these together for a single signing key.
//!

pub mod builder;
pub mod error;
mod imports;
pub mod krc20;
pub mod result;
pub mod settings;
pub mod tx;
pub mod utxo;

pub use builder::TransactionBuilder;
pub use kasforge_addresses::{Address, Prefix as AddressPrefix};
pub use result::Result;
pub use settings::{BuilderSettings, DustPolicy};
