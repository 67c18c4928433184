//!
//! [`UtxoStore`] keeps the known spendable outputs of every tracked locking script.
//!

use crate::imports::*;
use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;

type OutputMap = IndexMap<TransactionOutpoint, UtxoEntryReference>;

#[derive(Default)]
struct Inner {
    /// Outputs per locking script, in the order the network reported them.
    entries: IndexMap<LockingScript, OutputMap>,
    /// Outputs spent by built transactions that the network has not yet reported as spent.
    consumed: IndexSet<TransactionOutpoint>,
}

impl Inner {
    fn contains(&self, outpoint: &TransactionOutpoint) -> bool {
        self.entries.values().any(|outputs| outputs.contains_key(outpoint))
    }
}

/// Shared store of spendable outputs.
///
/// Clones share the same underlying set. Updates and consumption take the write
/// lock and are applied atomically; queries return owned snapshots.
#[derive(Clone, Default)]
pub struct UtxoStore {
    inner: Arc<RwLock<Inner>>,
}

impl UtxoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the known outputs of `locking_script` with `outputs`.
    ///
    /// Consumed outputs that are still reported stay hidden; once the network stops
    /// reporting one it is forgotten.
    pub fn update(&self, outputs: Vec<UnspentOutput>, locking_script: &LockingScript) {
        let mut inner = self.inner.write();
        let outputs: OutputMap = outputs
            .into_iter()
            .map(|output| (output.outpoint(), UtxoEntryReference::new(locking_script.clone(), output)))
            .collect();
        trace!("utxo store: {} outputs for {}", outputs.len(), locking_script.script_public_key().script_hex());
        inner.entries.insert(locking_script.clone(), outputs);

        let Inner { entries, consumed } = &mut *inner;
        consumed.retain(|outpoint| entries.values().any(|outputs| outputs.contains_key(outpoint)));
    }

    /// Snapshot of the unconsumed outputs of `locking_scripts`, grouped by script in the
    /// given order, each group in insertion order.
    pub fn outputs_available(&self, locking_scripts: &[LockingScript]) -> Vec<UtxoEntryReference> {
        let inner = self.inner.read();
        locking_scripts
            .iter()
            .filter_map(|locking_script| inner.entries.get(locking_script))
            .flat_map(|outputs| outputs.values())
            .filter(|entry| !inner.consumed.contains(&entry.id()))
            .cloned()
            .collect()
    }

    pub fn available_amount(&self, locking_scripts: &[LockingScript]) -> u64 {
        self.outputs_available(locking_scripts).iter().map(UtxoEntryReference::amount).sum()
    }

    /// Marks outputs as spent so later builds do not select them again.
    /// Outpoints the store does not know are ignored.
    pub fn consume<'a>(&self, outpoints: impl IntoIterator<Item = &'a TransactionOutpoint>) {
        let mut inner = self.inner.write();
        for outpoint in outpoints {
            if inner.contains(outpoint) && inner.consumed.insert(*outpoint) {
                debug!("utxo store: consumed {outpoint}");
            }
        }
    }

    pub fn is_consumed(&self, outpoint: &TransactionOutpoint) -> bool {
        self.inner.read().consumed.contains(outpoint)
    }

    /// Forgets every output of `locking_script`.
    pub fn remove(&self, locking_script: &LockingScript) {
        let mut inner = self.inner.write();
        inner.entries.shift_remove(locking_script);
        let Inner { entries, consumed } = &mut *inner;
        consumed.retain(|outpoint| entries.values().any(|outputs| outputs.contains_key(outpoint)));
    }
}
