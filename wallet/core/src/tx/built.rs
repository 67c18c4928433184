use crate::imports::*;
use crate::tx::TransactionDto;
use kasforge_consensus_core::tx::Transaction;

/// A transaction with every signature script filled in, ready for broadcast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltTransaction {
    transaction: Transaction,
    fees: u64,
}

impl BuiltTransaction {
    pub fn new(transaction: Transaction, fees: u64) -> Self {
        Self { transaction, fees }
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// Signature-excluded hash, identical to the id of the unsigned transaction.
    pub fn id(&self) -> TransactionId {
        self.transaction.id()
    }

    /// Hash over the full transaction including signature scripts.
    pub fn hash(&self) -> Hash {
        self.transaction.hash()
    }

    pub fn fees(&self) -> u64 {
        self.fees
    }

    /// Outpoints spent by this transaction.
    pub fn outpoints(&self) -> impl Iterator<Item = &TransactionOutpoint> + '_ {
        self.transaction.inputs.iter().map(|input| &input.previous_outpoint)
    }

    pub fn to_dto(&self) -> TransactionDto {
        TransactionDto::from(&self.transaction)
    }
}
