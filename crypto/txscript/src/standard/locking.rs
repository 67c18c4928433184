use crate::{TxScriptError, script_class::ScriptClass};
use kasforge_addresses::{Address, AddressError, Prefix, Version};
use kasforge_consensus_core::tx::{ScriptPublicKey, ScriptPublicKeyVersion};
use std::str::FromStr;

use super::{extract_script_pub_key_address, pay_to_address_script};

/// A standard locking script together with its class and the key or script hash it
/// commits to. The script bytes are always derived from `(class, payload, version)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LockingScript {
    kind: Version,
    payload: Vec<u8>,
    script_public_key: ScriptPublicKey,
}

impl LockingScript {
    pub fn from_address(address: &Address) -> Self {
        Self {
            kind: address.version,
            payload: address.payload.to_vec(),
            script_public_key: pay_to_address_script(address),
        }
    }

    /// Classifies an existing script public key. Non-standard scripts are rejected.
    pub fn try_from_script_public_key(script_public_key: &ScriptPublicKey) -> Result<Self, TxScriptError> {
        // The prefix is irrelevant to the payload extraction.
        let address = extract_script_pub_key_address(script_public_key, Prefix::Mainnet)?;
        Ok(Self::from_address(&address))
    }

    pub fn class(&self) -> ScriptClass {
        self.kind.into()
    }

    /// The address version byte matching this script.
    pub fn kind(&self) -> Version {
        self.kind
    }

    /// The x-only key, compressed ECDSA key or redeem script hash the script commits to.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn script_public_key(&self) -> &ScriptPublicKey {
        &self.script_public_key
    }

    pub fn script(&self) -> &[u8] {
        self.script_public_key.script()
    }

    pub fn version(&self) -> ScriptPublicKeyVersion {
        self.script_public_key.version()
    }

    pub fn address(&self, prefix: Prefix) -> Address {
        Address::new(prefix, self.kind, &self.payload)
    }
}

impl From<&Address> for LockingScript {
    fn from(address: &Address) -> Self {
        Self::from_address(address)
    }
}

impl FromStr for LockingScript {
    type Err = AddressError;

    fn from_str(address: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_address(&Address::try_from(address)?))
    }
}

impl From<LockingScript> for ScriptPublicKey {
    fn from(locking_script: LockingScript) -> Self {
        locking_script.script_public_key
    }
}
