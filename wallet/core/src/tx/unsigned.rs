//!
//! [`UnsignedTransaction`]: an assembled transaction waiting for signatures.
//!

use crate::imports::*;
use crate::tx::{BuiltTransaction, SignatureKind, SigningPreimage};
use kasforge_consensus_core::{
    hashing::{
        sighash::{SigHashReusedValues, signature_hash_preimage},
        sighash_type::SIG_HASH_ALL,
    },
    tx::{Transaction, TransactionInput, UtxoEntry as ConsensusUtxoEntry, VerifiableTransaction},
};
use kasforge_txscript::{SIGNATURE_SIZE, redeem_script_key_class, signature_script_for_class};

/// The output an input spends, with what is needed to unlock it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputContext {
    pub outpoint: TransactionOutpoint,
    pub locking_script: LockingScript,
    pub entry: ConsensusUtxoEntry,
    /// Redeem script of a script hash output, revealed by the signature script.
    pub redeem_script: Option<Vec<u8>>,
}

impl InputContext {
    pub fn new(
        outpoint: TransactionOutpoint,
        locking_script: LockingScript,
        amount: u64,
        block_daa_score: u64,
        redeem_script: Option<Vec<u8>>,
    ) -> Self {
        let entry = ConsensusUtxoEntry::new(amount, locking_script.script_public_key().clone(), block_daa_score, false);
        Self { outpoint, locking_script, entry, redeem_script }
    }

    pub fn from_entry(entry: &UtxoEntryReference, redeem_script: Option<Vec<u8>>) -> Self {
        Self {
            outpoint: entry.id(),
            locking_script: entry.locking_script().clone(),
            entry: entry.as_ref().to_consensus_entry(),
            redeem_script,
        }
    }

    pub fn amount(&self) -> u64 {
        self.entry.amount
    }
}

/// An assembled transaction whose signature scripts are still empty.
///
/// Besides the wire transaction it carries, per input, the spent output and its
/// locking script, which decide the signing preimage and the signature script shape.
#[derive(Clone, Debug)]
pub struct UnsignedTransaction {
    transaction: Transaction,
    inputs: Vec<InputContext>,
    payment_value: u64,
    change_value: u64,
    fees: u64,
}

impl UnsignedTransaction {
    /// Fails unless `inputs` describes every input of `transaction`, in order.
    pub fn new(transaction: Transaction, inputs: Vec<InputContext>, payment_value: u64, change_value: u64, fees: u64) -> Result<Self> {
        if transaction.inputs.len() != inputs.len() {
            return Err(Error::InputContextCountMismatch { inputs: transaction.inputs.len(), contexts: inputs.len() });
        }
        if let Some(index) = transaction.inputs.iter().zip(&inputs).position(|(input, context)| input.previous_outpoint != context.outpoint) {
            return Err(Error::InputOutpointMismatch(index));
        }
        Ok(Self { transaction, inputs, payment_value, change_value, fees })
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn input_contexts(&self) -> &[InputContext] {
        &self.inputs
    }

    /// Signature-excluded hash of the transaction. Transactions spending its
    /// outputs reference this id, which does not change once it is signed.
    pub fn id(&self) -> TransactionId {
        self.transaction.id()
    }

    pub fn aggregate_input_value(&self) -> u64 {
        self.inputs.iter().map(InputContext::amount).sum()
    }

    pub fn aggregate_output_value(&self) -> u64 {
        self.transaction.total_output_value()
    }

    /// Value paid to the destination.
    pub fn payment_value(&self) -> u64 {
        self.payment_value
    }

    /// Value returned to the change address, zero without a change output.
    pub fn change_value(&self) -> u64 {
        self.change_value
    }

    pub fn fees(&self) -> u64 {
        self.fees
    }

    /// The signature scheme input `index` has to be signed with.
    pub fn signature_kind(&self, index: usize) -> Result<SignatureKind> {
        let context = self.inputs.get(index).ok_or(Error::InputIndexOutOfRange(index))?;
        match context.locking_script.class() {
            ScriptClass::ScriptHash => {
                let redeem_script = context.redeem_script.as_deref().ok_or(Error::MissingRedeemScript(index))?;
                SignatureKind::from_class(redeem_script_key_class(redeem_script))
            }
            class => SignatureKind::from_class(class),
        }
    }

    /// The signing preimage of input `index`. Each input commits to every input
    /// and output; only the spent output's script and amount differ between inputs.
    pub fn preimage(&self, index: usize) -> Result<SigningPreimage> {
        self.preimage_with(index, &mut SigHashReusedValues::new())
    }

    /// Signing preimages of every input, in input order. Signatures are expected back in the same order.
    pub fn preimages(&self) -> Result<Vec<SigningPreimage>> {
        let mut reused_values = SigHashReusedValues::new();
        (0..self.inputs.len()).map(|index| self.preimage_with(index, &mut reused_values)).collect()
    }

    /// The digests to sign, in input order.
    pub fn signature_hashes(&self) -> Result<Vec<Hash>> {
        Ok(self.preimages()?.into_iter().map(|preimage| preimage.hash).collect())
    }

    fn preimage_with(&self, index: usize, reused_values: &mut SigHashReusedValues) -> Result<SigningPreimage> {
        let kind = self.signature_kind(index)?;
        let preimage = signature_hash_preimage(self, index, SIG_HASH_ALL, reused_values);
        trace!("preimage for input {index} of {}: {kind:?}", self.id());
        Ok(SigningPreimage::new(index, kind, preimage))
    }

    /// Fills in one signature script per input from 64-byte signatures supplied in input order.
    ///
    /// Signatures supplied out of order still produce a transaction, one that the
    /// network rejects; the order cannot be verified without the signing keys.
    pub fn finalize<S: AsRef<[u8]>>(&self, signatures: &[S]) -> Result<BuiltTransaction> {
        if signatures.len() != self.inputs.len() {
            return Err(Error::SignatureCountMismatch { expected: self.inputs.len(), actual: signatures.len() });
        }

        let mut transaction = self.transaction.clone();
        for (index, (input, signature)) in transaction.inputs.iter_mut().zip(signatures).enumerate() {
            let signature = signature.as_ref();
            if signature.len() != SIGNATURE_SIZE {
                return Err(Error::InvalidSignatureLength { index, length: signature.len() });
            }
            let context = &self.inputs[index];
            let class = context.locking_script.class();
            if class == ScriptClass::ScriptHash && context.redeem_script.is_none() {
                return Err(Error::MissingRedeemScript(index));
            }
            input.signature_script = signature_script_for_class(class, signature, SIG_HASH_ALL, context.redeem_script.as_deref())?;
        }

        let built = BuiltTransaction::new(transaction, self.fees);
        debug!("finalized transaction {} ({} inputs)", built.id(), built.transaction().inputs.len());
        Ok(built)
    }

    /// Fills every signature script with `placeholder` pushed as signature data, the way
    /// a real signature of that size would be, to measure the mass of the signed transaction.
    pub fn finalize_with_placeholder(&self, placeholder: &[u8]) -> Result<BuiltTransaction> {
        let mut transaction = self.transaction.clone();
        for (input, context) in transaction.inputs.iter_mut().zip(&self.inputs) {
            input.signature_script = crate::tx::mass::placeholder_signature_script(placeholder, context.redeem_script.as_deref())?;
        }
        Ok(BuiltTransaction::new(transaction, self.fees))
    }
}

impl VerifiableTransaction for UnsignedTransaction {
    fn tx(&self) -> &Transaction {
        &self.transaction
    }

    fn populated_input(&self, index: usize) -> (&TransactionInput, &ConsensusUtxoEntry) {
        (&self.transaction.inputs[index], &self.inputs[index].entry)
    }
}
