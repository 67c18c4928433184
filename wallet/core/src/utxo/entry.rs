use crate::imports::*;
use kasforge_consensus_core::tx::UtxoEntry as ConsensusUtxoEntry;
use std::cmp::Ordering;

/// A spendable output as reported by the network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnspentOutput {
    /// DAA score of the block that accepted the output.
    pub block_daa_score: u64,
    pub transaction_id: TransactionId,
    pub output_index: TransactionIndexType,
    pub amount: u64,
}

impl UnspentOutput {
    pub fn new(block_daa_score: u64, transaction_id: TransactionId, output_index: TransactionIndexType, amount: u64) -> Self {
        Self { block_daa_score, transaction_id, output_index, amount }
    }

    pub fn outpoint(&self) -> TransactionOutpoint {
        TransactionOutpoint::new(self.transaction_id, self.output_index)
    }
}

/// An [`UnspentOutput`] together with the locking script it pays to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UtxoEntry {
    pub locking_script: LockingScript,
    pub output: UnspentOutput,
}

impl UtxoEntry {
    #[inline(always)]
    pub fn amount(&self) -> u64 {
        self.output.amount
    }

    #[inline(always)]
    pub fn outpoint(&self) -> TransactionOutpoint {
        self.output.outpoint()
    }

    /// The consensus view of the entry, as committed to by signature hashes.
    pub fn to_consensus_entry(&self) -> ConsensusUtxoEntry {
        ConsensusUtxoEntry::new(self.output.amount, self.locking_script.script_public_key().clone(), self.output.block_daa_score, false)
    }
}

/// Cheaply cloneable shared handle to a [`UtxoEntry`].
#[derive(Clone, Debug)]
pub struct UtxoEntryReference {
    pub utxo: Arc<UtxoEntry>,
}

impl UtxoEntryReference {
    pub fn new(locking_script: LockingScript, output: UnspentOutput) -> Self {
        Self { utxo: Arc::new(UtxoEntry { locking_script, output }) }
    }

    pub fn id(&self) -> TransactionOutpoint {
        self.utxo.outpoint()
    }

    pub fn amount(&self) -> u64 {
        self.utxo.amount()
    }

    pub fn locking_script(&self) -> &LockingScript {
        &self.utxo.locking_script
    }
}

impl AsRef<UtxoEntry> for UtxoEntryReference {
    fn as_ref(&self) -> &UtxoEntry {
        &self.utxo
    }
}

impl From<UtxoEntry> for UtxoEntryReference {
    fn from(entry: UtxoEntry) -> Self {
        Self { utxo: Arc::new(entry) }
    }
}

// Equality and ordering compare amounts only, for sorting during selection.
// Distinct outputs of the same amount compare equal; identify outputs by `id()`.
impl Eq for UtxoEntryReference {}

impl PartialEq for UtxoEntryReference {
    fn eq(&self, other: &Self) -> bool {
        self.amount() == other.amount()
    }
}

impl PartialOrd for UtxoEntryReference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UtxoEntryReference {
    fn cmp(&self, other: &Self) -> Ordering {
        self.amount().cmp(&other.amount())
    }
}
