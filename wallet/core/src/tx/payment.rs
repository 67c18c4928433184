use crate::imports::*;
use kasforge_consensus_core::tx::TransactionOutput;

/// A transaction output being paid to a locking script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentOutput {
    pub locking_script: LockingScript,
    pub amount: u64,
}

impl PaymentOutput {
    pub fn new(locking_script: LockingScript, amount: u64) -> Self {
        Self { locking_script, amount }
    }
}

impl From<PaymentOutput> for TransactionOutput {
    fn from(output: PaymentOutput) -> Self {
        Self::new(output.amount, output.locking_script.into())
    }
}

impl From<&PaymentOutput> for TransactionOutput {
    fn from(output: &PaymentOutput) -> Self {
        Self::new(output.amount, output.locking_script.script_public_key().clone())
    }
}
