use crate::script_builder::ScriptBuilderError;
use thiserror::Error;

#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum TxScriptError {
    #[error("unsupported public key type")]
    PubKeyFormat,

    #[error("invalid public key: {0}")]
    InvalidPublicKey(secp256k1::Error),

    #[error("invalid public key length {0}")]
    PubKeyLength(usize),

    #[error("invalid signature length {0}")]
    SigLength(usize),

    #[error("script of class {0} cannot be unlocked by a standard signature script")]
    UnsupportedScriptClass(String),

    #[error("a redeem script is required to spend a pay-to-script-hash output")]
    MissingRedeemScript,

    #[error(transparent)]
    ScriptBuilder(#[from] ScriptBuilderError),
}

impl From<secp256k1::Error> for TxScriptError {
    fn from(err: secp256k1::Error) -> Self {
        TxScriptError::InvalidPublicKey(err)
    }
}
