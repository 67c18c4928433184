//!
//! Error types used by the wallet core.
//!

use kasforge_addresses::AddressError;
use kasforge_txscript::{TxScriptError, script_builder::ScriptBuilderError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Custom(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    #[error("Insufficient funds: {required} sompi required, {available} sompi available")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("Unsupported script kind: {0}")]
    UnsupportedScriptKind(String),

    #[error("Expected {expected} signatures, received {actual}")]
    SignatureCountMismatch { expected: usize, actual: usize },

    #[error("Output of {amount} sompi is below the dust threshold of {threshold} sompi")]
    DustOutputRejected { amount: u64, threshold: u64 },

    #[error("Requested amount {requested} exceeds the available balance of {available}")]
    AmountExceedsAvailable { requested: u64, available: u64 },

    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Input {0} spends a script hash output but has no redeem script")]
    MissingRedeemScript(usize),

    #[error("Signature for input {index} is {length} bytes, expected 64")]
    InvalidSignatureLength { index: usize, length: usize },

    #[error("Input index {0} is out of range")]
    InputIndexOutOfRange(usize),

    #[error("Transaction has {inputs} inputs but {contexts} input contexts")]
    InputContextCountMismatch { inputs: usize, contexts: usize },

    #[error("Input {0} does not spend the outpoint of its input context")]
    InputOutpointMismatch(usize),

    #[error(transparent)]
    ScriptBuilder(#[from] ScriptBuilderError),

    #[error(transparent)]
    TxScript(TxScriptError),

    #[error("Hex decoding error: {0}")]
    Hex(#[from] faster_hex::Error),

    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<TxScriptError> for Error {
    fn from(err: TxScriptError) -> Self {
        match err {
            TxScriptError::UnsupportedScriptClass(class) => Error::UnsupportedScriptKind(class),
            TxScriptError::ScriptBuilder(err) => Error::ScriptBuilder(err),
            err => Error::TxScript(err),
        }
    }
}
