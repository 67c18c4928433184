//!
//! Mass estimation of transactions that are not signed yet.
//!

use crate::imports::*;
use crate::tx::{BuiltTransaction, FeeType, PaymentOutput};
use kasforge_consensus_core::{
    config::params::MassParams,
    constants::{DEFAULT_SEQUENCE, STANDARD_SIG_OP_COUNT, TX_VERSION},
    hashing::sighash_type::SIG_HASH_ALL,
    mass::MassCalculator,
    tx::{Transaction, TransactionInput, TransactionOutput},
};
use kasforge_txscript::script_builder::ScriptBuilder;

/// Stand-in signature used when measuring the mass of an unsigned transaction.
/// One byte longer than a real signature so estimates never fall short.
pub const PLACEHOLDER_SIGNATURE: [u8; 65] = [1u8; 65];

/// Signature script pushing `placeholder` and the sighash type, followed by the
/// redeem script push for script hash inputs.
pub fn placeholder_signature_script(placeholder: &[u8], redeem_script: Option<&[u8]>) -> Result<Vec<u8>> {
    let signature: Vec<u8> = placeholder.iter().copied().chain(std::iter::once(SIG_HASH_ALL.to_u8())).collect();
    let mut builder = ScriptBuilder::new();
    builder.add_data(&signature)?;
    if let Some(redeem_script) = redeem_script {
        builder.add_data(redeem_script)?;
    }
    Ok(builder.drain())
}

/// Estimates compute mass and mass-based fees.
#[derive(Clone, Copy, Debug)]
pub struct MassEstimator {
    calculator: MassCalculator,
}

impl MassEstimator {
    pub fn new(params: &MassParams) -> Self {
        Self { calculator: MassCalculator::new_with_params(params) }
    }

    /// Mass of a native transaction with `input_count` inputs, each carrying
    /// `signature_script`, paying `outputs`.
    pub fn calc_mass_for_payment(&self, input_count: usize, signature_script: &[u8], outputs: &[PaymentOutput]) -> u64 {
        let outpoint = TransactionOutpoint::new(Hash::default(), 0);
        let inputs = (0..input_count)
            .map(|_| TransactionInput::new(outpoint, signature_script.to_vec(), DEFAULT_SEQUENCE, STANDARD_SIG_OP_COUNT))
            .collect();
        let outputs = outputs.iter().map(TransactionOutput::from).collect();
        self.calculator.calc_compute_mass(&Transaction::new_native(TX_VERSION, inputs, outputs))
    }

    pub fn calc_mass(&self, transaction: &BuiltTransaction) -> u64 {
        self.calculator.calc_compute_mass(transaction.transaction())
    }

    /// Fee of a payment under `fee_type`, measured with placeholder signature scripts.
    pub fn calc_fee_for_payment(&self, fee_type: FeeType, input_count: usize, signature_script: &[u8], outputs: &[PaymentOutput]) -> u64 {
        match fee_type {
            FeeType::Exactly(fee) => fee,
            FeeType::Rate(_) => fee_type.fee_for_mass(self.calc_mass_for_payment(input_count, signature_script, outputs)),
        }
    }
}

impl Default for MassEstimator {
    fn default() -> Self {
        Self::new(&MassParams::default())
    }
}
