//!
//! Common imports used internally across the wallet core.
//!

pub use crate::error::Error;
pub use crate::result::Result;
pub use crate::settings::{BuilderSettings, DustPolicy};
pub use crate::utxo::{SelectionStrategy, UnspentOutput, UtxoEntryReference, UtxoStore};

pub use borsh::{BorshDeserialize, BorshSerialize};
pub use itertools::Itertools;
pub use kasforge_addresses::{Address, Prefix};
pub use kasforge_consensus_core::network::NetworkType;
pub use kasforge_consensus_core::tx::{ScriptPublicKey, TransactionId, TransactionIndexType, TransactionOutpoint};
pub use kasforge_hashes::Hash;
pub use kasforge_txscript::{LockingScript, script_class::ScriptClass};
pub use log::{debug, trace, warn};
pub use serde::{Deserialize, Serialize};
pub use std::sync::Arc;
