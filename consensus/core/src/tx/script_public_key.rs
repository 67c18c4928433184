use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::str::FromStr;

/// Size of the underlying script vector of a script.
pub const SCRIPT_VECTOR_SIZE: usize = 36;

/// Used as the underlying type for script public key data, optimized for the common p2pk script size (34).
pub type ScriptVec = SmallVec<[u8; SCRIPT_VECTOR_SIZE]>;

/// Represents the ScriptPublicKey Version
pub type ScriptPublicKeyVersion = u16;

/// Alias the `smallvec!` macro to ease maintenance
pub use smallvec::smallvec as scriptvec;

/// A locking script together with its script version.
#[derive(Default, PartialEq, Eq, Clone, Hash, PartialOrd, Ord)]
pub struct ScriptPublicKey {
    pub version: ScriptPublicKeyVersion,
    script: ScriptVec, // Kept private to preserve read-only semantics
}

impl std::fmt::Debug for ScriptPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptPublicKey").field("version", &self.version).field("script", &faster_hex::hex_string(&self.script)).finish()
    }
}

impl ScriptPublicKey {
    pub fn new(version: ScriptPublicKeyVersion, script: ScriptVec) -> Self {
        Self { version, script }
    }

    pub fn from_vec(version: ScriptPublicKeyVersion, script: Vec<u8>) -> Self {
        Self { version, script: ScriptVec::from_vec(script) }
    }

    pub fn version(&self) -> ScriptPublicKeyVersion {
        self.version
    }

    pub fn script(&self) -> &[u8] {
        &self.script
    }

    pub fn script_hex(&self) -> String {
        faster_hex::hex_string(&self.script)
    }
}

/// Hex form is the big-endian version (4 hex chars) followed by the script bytes.
impl std::fmt::Display for ScriptPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", faster_hex::hex_string(&self.version.to_be_bytes()), self.script_hex())
    }
}

impl FromStr for ScriptPublicKey {
    type Err = faster_hex::Error;

    fn from_str(hex_str: &str) -> Result<Self, Self::Err> {
        let hex_len = hex_str.len();
        if hex_len < 4 || hex_len % 2 != 0 {
            return Err(faster_hex::Error::InvalidLength(hex_len));
        }
        let mut version = [0u8; 2];
        faster_hex::hex_decode(&hex_str.as_bytes()[..4], &mut version)?;
        let mut script = vec![0u8; (hex_len - 4) / 2];
        faster_hex::hex_decode(&hex_str.as_bytes()[4..], &mut script)?;
        Ok(Self::from_vec(u16::from_be_bytes(version), script))
    }
}

impl Serialize for ScriptPublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string())
        } else {
            Serialize::serialize(&(self.version, self.script.as_slice()), serializer)
        }
    }
}

impl<'de> Deserialize<'de> for ScriptPublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = <std::borrow::Cow<'de, str> as Deserialize>::deserialize(deserializer)?;
            ScriptPublicKey::from_str(&s).map_err(serde::de::Error::custom)
        } else {
            let (version, script) = <(ScriptPublicKeyVersion, Vec<u8>) as Deserialize>::deserialize(deserializer)?;
            Ok(Self::from_vec(version, script))
        }
    }
}

//
// Borsh serializers need to be manually implemented for `ScriptPublicKey` since
// smallvec does not currently support Borsh
//

impl BorshSerialize for ScriptPublicKey {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        borsh::BorshSerialize::serialize(&self.version, writer)?;
        borsh::BorshSerialize::serialize(&self.script.as_slice(), writer)?;
        Ok(())
    }
}

impl BorshDeserialize for ScriptPublicKey {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let version: ScriptPublicKeyVersion = borsh::BorshDeserialize::deserialize_reader(reader)?;
        let script: Vec<u8> = borsh::BorshDeserialize::deserialize_reader(reader)?;
        Ok(Self::from_vec(version, script))
    }
}
