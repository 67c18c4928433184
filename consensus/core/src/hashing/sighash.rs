use kasforge_hashes::{Hash, Hasher, HasherBase, TransactionSigningHash, TransactionSigningHashECDSA};

use crate::tx::{ScriptPublicKey, TransactionOutpoint, TransactionOutput, VerifiableTransaction};

use super::{HasherExtensions, PreimageHasher, sighash_type::SigHashType};

/// Holds the sub-hashes shared by every input of a transaction so that computing
/// all signature hashes stays linear in the number of inputs.
#[derive(Default)]
pub struct SigHashReusedValues {
    previous_outputs_hash: Option<Hash>,
    sequence_hash: Option<Hash>,
    sig_op_counts_hash: Option<Hash>,
    outputs_hash: Option<Hash>,
}

impl SigHashReusedValues {
    pub fn new() -> Self {
        Self { previous_outputs_hash: None, sequence_hash: None, sig_op_counts_hash: None, outputs_hash: None }
    }
}

/// Returns the cached sub-hash in `slot`, computing it on first use.
fn reused(slot: &mut Option<Hash>, compute: impl FnOnce() -> Hash) -> Hash {
    *slot.get_or_insert_with(compute)
}

fn signing_hash(write: impl FnOnce(&mut TransactionSigningHash)) -> Hash {
    let mut hasher = TransactionSigningHash::new();
    write(&mut hasher);
    hasher.finalize()
}

fn previous_outputs_hash(tx: &impl VerifiableTransaction, hash_type: SigHashType, reused_values: &mut SigHashReusedValues) -> Hash {
    if hash_type.is_sighash_anyone_can_pay() {
        return Hash::default();
    }
    reused(&mut reused_values.previous_outputs_hash, || {
        signing_hash(|hasher| tx.inputs().iter().for_each(|input| hash_outpoint(hasher, input.previous_outpoint)))
    })
}

fn sequence_hash(tx: &impl VerifiableTransaction, hash_type: SigHashType, reused_values: &mut SigHashReusedValues) -> Hash {
    if hash_type.is_sighash_single() || hash_type.is_sighash_anyone_can_pay() || hash_type.is_sighash_none() {
        return Hash::default();
    }
    reused(&mut reused_values.sequence_hash, || {
        signing_hash(|hasher| tx.inputs().iter().for_each(|input| {
            hasher.write_u64(input.sequence);
        }))
    })
}

fn sig_op_counts_hash(tx: &impl VerifiableTransaction, hash_type: SigHashType, reused_values: &mut SigHashReusedValues) -> Hash {
    if hash_type.is_sighash_anyone_can_pay() {
        return Hash::default();
    }
    reused(&mut reused_values.sig_op_counts_hash, || {
        signing_hash(|hasher| tx.inputs().iter().for_each(|input| {
            hasher.write_u8(input.sig_op_count);
        }))
    })
}

/// Zero for native transactions, which carry no payload.
fn payload_hash(tx: &impl VerifiableTransaction) -> Hash {
    match tx.tx().subnetwork_id.is_native() {
        true => Hash::default(),
        false => signing_hash(|hasher| {
            hasher.write_var_bytes(&tx.tx().payload);
        }),
    }
}

fn outputs_hash(
    tx: &impl VerifiableTransaction,
    hash_type: SigHashType,
    reused_values: &mut SigHashReusedValues,
    input_index: usize,
) -> Hash {
    if hash_type.is_sighash_none() {
        return Hash::default();
    }
    if hash_type.is_sighash_single() {
        // only the output paired with the input, if there is one
        return match tx.outputs().get(input_index) {
            Some(output) => signing_hash(|hasher| hash_output(hasher, output)),
            None => Hash::default(),
        };
    }
    reused(&mut reused_values.outputs_hash, || signing_hash(|hasher| tx.outputs().iter().for_each(|output| hash_output(hasher, output))))
}

fn hash_outpoint(hasher: &mut impl HasherBase, outpoint: TransactionOutpoint) {
    hasher.update(outpoint.transaction_id);
    hasher.write_u32(outpoint.index);
}

fn hash_output(hasher: &mut impl HasherBase, output: &TransactionOutput) {
    hasher.write_u64(output.value);
    hash_script_public_key(hasher, &output.script_public_key);
}

fn hash_script_public_key(hasher: &mut impl HasherBase, script_public_key: &ScriptPublicKey) {
    hasher.write_u16(script_public_key.version());
    hasher.write_var_bytes(script_public_key.script());
}

/// Writes the signing preimage of input `input_index` into `hasher`. The input's own
/// signature script never takes part; the locking script of the spent entry stands in its place.
///
/// # Panics
/// Panics if `input_index` is out of range.
pub fn write_signature_preimage(
    hasher: &mut impl HasherBase,
    tx: &impl VerifiableTransaction,
    input_index: usize,
    hash_type: SigHashType,
    reused_values: &mut SigHashReusedValues,
) {
    let (input, entry) = tx.populated_input(input_index);
    hasher.write_u16(tx.tx().version);
    hasher.update(previous_outputs_hash(tx, hash_type, reused_values));
    hasher.update(sequence_hash(tx, hash_type, reused_values));
    hasher.update(sig_op_counts_hash(tx, hash_type, reused_values));
    hash_outpoint(hasher, input.previous_outpoint);
    hash_script_public_key(hasher, &entry.script_public_key);
    hasher.write_u64(entry.amount);
    hasher.write_u64(input.sequence);
    hasher.write_u8(input.sig_op_count);
    hasher.update(outputs_hash(tx, hash_type, reused_values, input_index));
    hasher.write_u64(tx.tx().lock_time);
    hasher.update(tx.tx().subnetwork_id);
    hasher.write_u64(tx.tx().gas);
    hasher.update(payload_hash(tx));
    hasher.write_u8(hash_type.to_u8());
}

/// Returns the raw preimage bytes whose keyed BLAKE2b digest is the Schnorr signature hash.
pub fn signature_hash_preimage(
    tx: &impl VerifiableTransaction,
    input_index: usize,
    hash_type: SigHashType,
    reused_values: &mut SigHashReusedValues,
) -> Vec<u8> {
    let mut hasher = PreimageHasher::default();
    write_signature_preimage(&mut hasher, tx, input_index, hash_type, reused_values);
    hasher.into_bytes()
}

pub fn calc_schnorr_signature_hash(
    tx: &impl VerifiableTransaction,
    input_index: usize,
    hash_type: SigHashType,
    reused_values: &mut SigHashReusedValues,
) -> Hash {
    let mut hasher = TransactionSigningHash::new();
    write_signature_preimage(&mut hasher, tx, input_index, hash_type, reused_values);
    hasher.finalize()
}

/// ECDSA signature hash: the Schnorr hash re-hashed under the ECDSA SHA-256 domain.
pub fn calc_ecdsa_signature_hash(
    tx: &impl VerifiableTransaction,
    input_index: usize,
    hash_type: SigHashType,
    reused_values: &mut SigHashReusedValues,
) -> Hash {
    let hash = calc_schnorr_signature_hash(tx, input_index, hash_type, reused_values);
    TransactionSigningHashECDSA::hash(hash)
}
