//!
//! Wire representation of a signed transaction submitted to the network.
//!

use crate::imports::*;
use kasforge_consensus_core::{
    constants::{DEFAULT_SEQUENCE, STANDARD_SIG_OP_COUNT, TX_VERSION},
    serde_hex,
    tx::{Transaction, TransactionInput, TransactionOutput},
};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    pub inputs: Vec<TransactionInputDto>,
    pub outputs: Vec<TransactionOutputDto>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInputDto {
    pub previous_outpoint: PreviousOutpointDto,
    /// Lower-case hex.
    pub signature_script: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousOutpointDto {
    pub transaction_id: String,
    pub index: TransactionIndexType,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutputDto {
    pub amount: u64,
    pub script_public_key: ScriptPublicKeyDto,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptPublicKeyDto {
    pub version: u16,
    /// Lower-case hex of the script bytes.
    pub script_public_key: String,
}

impl TransactionDto {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<&TransactionInput> for TransactionInputDto {
    fn from(input: &TransactionInput) -> Self {
        Self {
            previous_outpoint: PreviousOutpointDto {
                transaction_id: input.previous_outpoint.transaction_id.to_string(),
                index: input.previous_outpoint.index,
            },
            signature_script: serde_hex::encode(&input.signature_script),
        }
    }
}

impl From<&TransactionOutput> for TransactionOutputDto {
    fn from(output: &TransactionOutput) -> Self {
        Self {
            amount: output.value,
            script_public_key: ScriptPublicKeyDto {
                version: output.script_public_key.version(),
                script_public_key: output.script_public_key.script_hex(),
            },
        }
    }
}

impl From<&Transaction> for TransactionDto {
    fn from(tx: &Transaction) -> Self {
        Self {
            inputs: tx.inputs.iter().map(TransactionInputDto::from).collect(),
            outputs: tx.outputs.iter().map(TransactionOutputDto::from).collect(),
        }
    }
}

/// Rebuilds the native transaction the DTO was produced from. Fields the DTO does
/// not carry take the values the builder always uses.
impl TryFrom<&TransactionDto> for Transaction {
    type Error = Error;

    fn try_from(dto: &TransactionDto) -> Result<Self> {
        let inputs = dto
            .inputs
            .iter()
            .map(|input| {
                let outpoint = TransactionOutpoint::new(
                    TransactionId::from_str(&input.previous_outpoint.transaction_id)?,
                    input.previous_outpoint.index,
                );
                Ok(TransactionInput::new(outpoint, serde_hex::decode(&input.signature_script)?, DEFAULT_SEQUENCE, STANDARD_SIG_OP_COUNT))
            })
            .collect::<Result<Vec<_>>>()?;
        let outputs = dto
            .outputs
            .iter()
            .map(|output| {
                let script = serde_hex::decode(&output.script_public_key.script_public_key)?;
                Ok(TransactionOutput::new(output.amount, ScriptPublicKey::from_vec(output.script_public_key.version, script)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Transaction::new_native(TX_VERSION, inputs, outputs))
    }
}
