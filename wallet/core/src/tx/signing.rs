use crate::imports::*;
use kasforge_hashes::{Hasher, TransactionSigningHash, TransactionSigningHashECDSA};

/// Signature scheme expected by the script an input unlocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignatureKind {
    Schnorr,
    Ecdsa,
}

impl SignatureKind {
    /// The key check a script of `class` performs. Script hash outputs are resolved
    /// through their redeem script instead.
    pub fn from_class(class: ScriptClass) -> Result<Self> {
        match class {
            ScriptClass::PubKey => Ok(SignatureKind::Schnorr),
            ScriptClass::PubKeyECDSA => Ok(SignatureKind::Ecdsa),
            ScriptClass::ScriptHash | ScriptClass::NonStandard => Err(Error::UnsupportedScriptKind(class.to_string())),
        }
    }

    /// The digest a signer of this kind signs for the given signing preimage.
    pub fn digest(&self, preimage: &[u8]) -> Hash {
        let hash = TransactionSigningHash::hash(preimage);
        match self {
            SignatureKind::Schnorr => hash,
            SignatureKind::Ecdsa => TransactionSigningHashECDSA::hash(hash),
        }
    }
}

/// What an external signer needs to sign one input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningPreimage {
    pub input_index: usize,
    pub kind: SignatureKind,
    #[serde(with = "kasforge_consensus_core::serde_hex")]
    pub preimage: Vec<u8>,
    /// Digest of `preimage` for `kind`, the 32 bytes actually signed.
    pub hash: Hash,
}

impl SigningPreimage {
    pub fn new(input_index: usize, kind: SignatureKind, preimage: Vec<u8>) -> Self {
        let hash = kind.digest(&preimage);
        Self { input_index, kind, preimage, hash }
    }
}
