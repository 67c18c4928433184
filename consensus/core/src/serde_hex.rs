//! Serde helpers that encode byte vectors as lower-case hex strings.

use serde::{Deserialize, Deserializer, Serializer};

pub fn encode(bytes: &[u8]) -> String {
    faster_hex::hex_string(bytes)
}

pub fn decode(hex: &str) -> Result<Vec<u8>, faster_hex::Error> {
    let mut bytes = vec![0u8; hex.len() / 2];
    faster_hex::hex_decode(hex.as_bytes(), &mut bytes)?;
    Ok(bytes)
}

pub fn serialize<S, T>(bytes: T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: AsRef<[u8]>,
{
    serializer.serialize_str(&encode(bytes.as_ref()))
}

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<Vec<u8>>,
{
    let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
    decode(&s).map(T::from).map_err(serde::de::Error::custom)
}
