use crate::{
    TxScriptError,
    opcodes::codes::{Op0, Op1, OpCheckSig, OpCheckSigECDSA, OpEndIf, OpFalse, OpIf},
    script_builder::ScriptBuilder,
    script_class::ScriptClass,
};

use super::{compressed_public_key, x_only_public_key};

/// Builds a redeem script that is spendable by `public_key` and carries `content` in a
/// never-executed `OP_FALSE OP_IF .. OP_ENDIF` branch, tagged with `protocol`:
///
/// `<pubkey> OP_CHECKSIG[ECDSA] OP_FALSE OP_IF <protocol> OP_1 <> OP_0 <content> OP_ENDIF`
///
/// The empty push after `OP_1` is the (unused) metadata field, `OP_0` marks the content field.
pub fn envelope_redeem_script(public_key: &[u8], class: ScriptClass, protocol: &[u8], content: &[u8]) -> Result<Vec<u8>, TxScriptError> {
    let mut builder = ScriptBuilder::new();
    match class {
        ScriptClass::PubKeyECDSA => builder.add_data(&compressed_public_key(public_key)?)?.add_op(OpCheckSigECDSA)?,
        ScriptClass::PubKey => builder.add_data(&x_only_public_key(public_key)?)?.add_op(OpCheckSig)?,
        ScriptClass::ScriptHash | ScriptClass::NonStandard => return Err(TxScriptError::UnsupportedScriptClass(class.to_string())),
    };
    builder.add_op(OpFalse)?.add_op(OpIf)?.add_data(protocol)?.add_op(Op1)?.add_data(&[])?.add_op(Op0)?.add_data(content)?.add_op(OpEndIf)?;
    Ok(builder.drain())
}
