//!
//! Spendable output tracking and input selection.
//!

pub mod entry;
pub mod selection;
pub mod store;

pub use entry::{UnspentOutput, UtxoEntry, UtxoEntryReference};
pub use selection::{Selection, SelectionStrategy, select};
pub use store::UtxoStore;
