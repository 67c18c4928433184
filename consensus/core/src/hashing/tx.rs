use super::{HasherExtensions, PreimageHasher};
use crate::{
    mass::transaction_estimated_serialized_size,
    tx::{Transaction, TransactionId, TransactionInput, TransactionOutpoint, TransactionOutput},
};
use kasforge_hashes::{Hash, HasherBase};

/// Returns the transaction hash. Note that this is different than the transaction ID.
pub fn hash(tx: &Transaction) -> Hash {
    let mut hasher = kasforge_hashes::TransactionHash::new();
    write_transaction(&mut hasher, tx, false);
    hasher.finalize()
}

/// Not intended for direct use by clients. Instead use `tx.id()`
pub fn id(tx: &Transaction) -> TransactionId {
    let mut hasher = kasforge_hashes::TransactionID::new();
    write_transaction(&mut hasher, tx, true);
    hasher.finalize()
}

/// Serializes the transaction for the TxID preimage (excluding signature scripts).
pub fn transaction_id_preimage(tx: &Transaction) -> Vec<u8> {
    let mut hasher = PreimageHasher::with_capacity(transaction_estimated_serialized_size(tx) as usize);
    write_transaction(&mut hasher, tx, true);
    hasher.into_bytes()
}

/// Serializes the full transaction, signature scripts included.
pub fn transaction_preimage(tx: &Transaction) -> Vec<u8> {
    let mut hasher = PreimageHasher::with_capacity(transaction_estimated_serialized_size(tx) as usize);
    write_transaction(&mut hasher, tx, false);
    hasher.into_bytes()
}

/// Write the transaction into the provided hasher. When `exclude_signature_script` is set every
/// signature script is replaced with an empty array and sig op counts are skipped.
fn write_transaction<T: HasherBase>(hasher: &mut T, tx: &Transaction, exclude_signature_script: bool) {
    hasher.update(tx.version.to_le_bytes()).write_len(tx.inputs.len());
    for input in tx.inputs.iter() {
        write_input(hasher, input, exclude_signature_script);
    }

    hasher.write_len(tx.outputs.len());
    for output in tx.outputs.iter() {
        write_output(hasher, output);
    }

    hasher.update(tx.lock_time.to_le_bytes()).update(tx.subnetwork_id).update(tx.gas.to_le_bytes()).write_var_bytes(&tx.payload);
}

#[inline(always)]
fn write_input<T: HasherBase>(hasher: &mut T, input: &TransactionInput, exclude_signature_script: bool) {
    write_outpoint(hasher, &input.previous_outpoint);
    if !exclude_signature_script {
        hasher.write_var_bytes(input.signature_script.as_slice()).update([input.sig_op_count]);
    } else {
        hasher.write_var_bytes(&[]);
    }
    hasher.update(input.sequence.to_le_bytes());
}

#[inline(always)]
fn write_outpoint<T: HasherBase>(hasher: &mut T, outpoint: &TransactionOutpoint) {
    hasher.update(outpoint.transaction_id).update(outpoint.index.to_le_bytes());
}

#[inline(always)]
fn write_output<T: HasherBase>(hasher: &mut T, output: &TransactionOutput) {
    hasher
        .update(output.value.to_le_bytes())
        .update(output.script_public_key.version().to_le_bytes())
        .write_var_bytes(output.script_public_key.script());
}
