use crate::imports::*;
use crate::krc20::Krc20Envelope;
use crate::tx::{BuiltTransaction, SigningPreimage, UnsignedTransaction};

/// Fees of the two transactions of a token transfer, in sompi.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenFeeParams {
    pub commit_fee: u64,
    /// Reserved in the commit output, paid by the reveal transaction.
    pub reveal_fee: u64,
}

impl TokenFeeParams {
    pub fn new(commit_fee: u64, reveal_fee: u64) -> Self {
        Self { commit_fee, reveal_fee }
    }
}

/// What it takes to rebuild the reveal transaction of an already built commit.
///
/// Persist it until the reveal is accepted: a failed reveal can then be rebuilt
/// with [`TransactionBuilder::build_reveal_for_sign`](crate::TransactionBuilder::build_reveal_for_sign)
/// without spending anything again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncompleteRevealParams {
    /// Id of the commit transaction, whose output 0 the reveal spends.
    pub transaction_id: TransactionId,
    pub target_output_amount: u64,
    pub envelope: Krc20Envelope,
}

impl IncompleteRevealParams {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn outpoint(&self) -> TransactionOutpoint {
        TransactionOutpoint::new(self.transaction_id, 0)
    }
}

/// A commit transaction and the reveal transaction spending its first output,
/// both unsigned.
///
/// The reveal already references the commit by id, which signing does not change,
/// so both can be signed in one pass.
#[derive(Clone, Debug)]
pub struct CommitRevealBundle {
    pub commit: UnsignedTransaction,
    pub reveal: UnsignedTransaction,
    pub redeem_script: Vec<u8>,
    pub params: IncompleteRevealParams,
}

impl CommitRevealBundle {
    pub fn commit_preimages(&self) -> Result<Vec<SigningPreimage>> {
        self.commit.preimages()
    }

    pub fn reveal_preimages(&self) -> Result<Vec<SigningPreimage>> {
        self.reveal.preimages()
    }

    /// True when the reveal spends output 0 of the commit.
    pub fn is_linked(&self) -> bool {
        let reveal_inputs = &self.reveal.transaction().inputs;
        reveal_inputs.len() == 1 && reveal_inputs[0].previous_outpoint == TransactionOutpoint::new(self.commit.id(), 0)
    }

    /// Finalizes both transactions from signatures given in preimage order.
    pub fn finalize<C: AsRef<[u8]>, R: AsRef<[u8]>>(
        &self,
        commit_signatures: &[C],
        reveal_signatures: &[R],
    ) -> Result<(BuiltTransaction, BuiltTransaction)> {
        Ok((self.commit.finalize(commit_signatures)?, self.reveal.finalize(reveal_signatures)?))
    }
}
