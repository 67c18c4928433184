use crate::{
    TxScriptError,
    opcodes::codes::{OpBlake2b, OpCheckSig, OpCheckSigECDSA, OpData32, OpData33, OpEqual},
    script_builder::{ScriptBuilder, ScriptBuilderResult},
    script_class::ScriptClass,
};
use kasforge_addresses::{Address, Prefix, Version};
use kasforge_consensus_core::{
    hashing::sighash_type::SigHashType,
    tx::{ScriptPublicKey, ScriptVec},
};
use smallvec::SmallVec;
use std::iter::once;

mod envelope;
mod locking;

pub use envelope::envelope_redeem_script;
pub use locking::LockingScript;

/// Length of a Schnorr or ECDSA signature in its fixed-size (r || s) encoding.
pub const SIGNATURE_SIZE: usize = 64;

/// Creates a new script to pay a transaction output to a 32-byte pubkey.
fn pay_to_pub_key(address_payload: &[u8]) -> ScriptVec {
    debug_assert_eq!(address_payload.len(), 32);
    SmallVec::from_iter(once(OpData32).chain(address_payload.iter().copied()).chain(once(OpCheckSig)))
}

/// Creates a new script to pay a transaction output to a 33-byte ECDSA pubkey.
fn pay_to_pub_key_ecdsa(address_payload: &[u8]) -> ScriptVec {
    debug_assert_eq!(address_payload.len(), 33);
    SmallVec::from_iter(once(OpData33).chain(address_payload.iter().copied()).chain(once(OpCheckSigECDSA)))
}

/// Creates a new script to pay a transaction output to a script hash.
/// It is expected that the input is a valid hash.
fn pay_to_script_hash(script_hash: &[u8]) -> ScriptVec {
    debug_assert_eq!(script_hash.len(), 32);
    SmallVec::from_iter([OpBlake2b, OpData32].iter().copied().chain(script_hash.iter().copied()).chain(once(OpEqual)))
}

/// Creates a new script to pay a transaction output to the specified address.
pub fn pay_to_address_script(address: &Address) -> ScriptPublicKey {
    let script = match address.version {
        Version::PubKey => pay_to_pub_key(address.payload.as_slice()),
        Version::PubKeyECDSA => pay_to_pub_key_ecdsa(address.payload.as_slice()),
        Version::ScriptHash => pay_to_script_hash(address.payload.as_slice()),
    };
    ScriptPublicKey::new(ScriptClass::from(address.version).version(), script)
}

/// Takes a script and returns an equivalent pay-to-script-hash script
pub fn pay_to_script_hash_script(redeem_script: &[u8]) -> ScriptPublicKey {
    let redeem_script_hash = kasforge_hashes::script_hash(redeem_script);
    let script = pay_to_script_hash(&redeem_script_hash.as_bytes());
    ScriptPublicKey::new(ScriptClass::ScriptHash.version(), script)
}

/// Returns the address of the pay-to-script-hash output committing to `redeem_script`.
pub fn script_hash_address(redeem_script: &[u8], prefix: Prefix) -> Address {
    Address::new(prefix, Version::ScriptHash, &kasforge_hashes::script_hash(redeem_script).as_bytes())
}

/// Builds the signature script spending a pay-to-pubkey output: a single push of the
/// 64-byte signature followed by the sighash type byte.
pub fn pay_to_pub_key_signature_script(signature: &[u8], hash_type: SigHashType) -> Result<Vec<u8>, TxScriptError> {
    if signature.len() != SIGNATURE_SIZE {
        return Err(TxScriptError::SigLength(signature.len()));
    }
    let signature_with_type: Vec<u8> = signature.iter().copied().chain(once(hash_type.to_u8())).collect();
    Ok(ScriptBuilder::new().add_data(&signature_with_type)?.drain())
}

/// Generates a signature script that fits a pay-to-script-hash script
pub fn pay_to_script_hash_signature_script(redeem_script: Vec<u8>, signature: Vec<u8>) -> ScriptBuilderResult<Vec<u8>> {
    let redeem_script_as_data = ScriptBuilder::new().add_data(&redeem_script)?.drain();
    Ok(Vec::from_iter(signature.iter().copied().chain(redeem_script_as_data.iter().copied())))
}

/// Builds the signature script unlocking an output of the given class. Script hash outputs
/// additionally need the redeem script the output commits to.
pub fn signature_script_for_class(
    class: ScriptClass,
    signature: &[u8],
    hash_type: SigHashType,
    redeem_script: Option<&[u8]>,
) -> Result<Vec<u8>, TxScriptError> {
    match class {
        ScriptClass::PubKey | ScriptClass::PubKeyECDSA => pay_to_pub_key_signature_script(signature, hash_type),
        ScriptClass::ScriptHash => {
            let redeem_script = redeem_script.ok_or(TxScriptError::MissingRedeemScript)?;
            let signature_script = pay_to_pub_key_signature_script(signature, hash_type)?;
            Ok(pay_to_script_hash_signature_script(redeem_script.to_vec(), signature_script)?)
        }
        ScriptClass::NonStandard => Err(TxScriptError::UnsupportedScriptClass(class.to_string())),
    }
}

/// Returns the class of the key check a redeem script opens with, which decides the
/// signature flavor of the input spending it.
pub fn redeem_script_key_class(redeem_script: &[u8]) -> ScriptClass {
    if redeem_script.len() >= 35 && ScriptClass::is_pay_to_pubkey_ecdsa(&redeem_script[..35]) {
        ScriptClass::PubKeyECDSA
    } else if redeem_script.len() >= 34 && ScriptClass::is_pay_to_pubkey(&redeem_script[..34]) {
        ScriptClass::PubKey
    } else {
        ScriptClass::NonStandard
    }
}

/// Returns the 33-byte compressed form of a SEC1 public key, compressing 65-byte uncompressed keys.
pub fn compressed_public_key(public_key: &[u8]) -> Result<[u8; 33], TxScriptError> {
    match public_key.len() {
        33 | 65 => Ok(secp256k1::PublicKey::from_slice(public_key)?.serialize()),
        len => Err(TxScriptError::PubKeyLength(len)),
    }
}

/// Returns the 32-byte x-only form of a public key. SEC1 keys are reduced to their x coordinate.
pub fn x_only_public_key(public_key: &[u8]) -> Result<[u8; 32], TxScriptError> {
    match public_key.len() {
        32 => Ok(secp256k1::XOnlyPublicKey::from_slice(public_key)?.serialize()),
        33 | 65 => Ok(secp256k1::PublicKey::from_slice(public_key)?.x_only_public_key().0.serialize()),
        len => Err(TxScriptError::PubKeyLength(len)),
    }
}

/// The redeem script behind the script hash address of `public_key`: an ECDSA pay-to-pubkey
/// script of the compressed key.
pub fn standard_redeem_script(public_key: &[u8]) -> Result<Vec<u8>, TxScriptError> {
    Ok(pay_to_pub_key_ecdsa(&compressed_public_key(public_key)?).to_vec())
}

/// Derives the default address of `public_key` for the requested script class.
///
/// A script hash address commits to the ECDSA pay-to-pubkey script of the key.
pub fn address_for_public_key(public_key: &[u8], class: ScriptClass, prefix: Prefix) -> Result<Address, TxScriptError> {
    match class {
        ScriptClass::PubKey => Ok(Address::new(prefix, Version::PubKey, &x_only_public_key(public_key)?)),
        ScriptClass::PubKeyECDSA => Ok(Address::new(prefix, Version::PubKeyECDSA, &compressed_public_key(public_key)?)),
        ScriptClass::ScriptHash => Ok(script_hash_address(&standard_redeem_script(public_key)?, prefix)),
        ScriptClass::NonStandard => Err(TxScriptError::UnsupportedScriptClass(class.to_string())),
    }
}

/// Returns the address encoded in a script public key.
///
/// Only standard script classes can be mapped back to an address; any other
/// script returns the `TxScriptError::PubKeyFormat` error.
pub fn extract_script_pub_key_address(script_public_key: &ScriptPublicKey, prefix: Prefix) -> Result<Address, TxScriptError> {
    let class = ScriptClass::from_script(script_public_key);
    if script_public_key.version() > class.version() {
        return Err(TxScriptError::PubKeyFormat);
    }
    let script = script_public_key.script();
    match class {
        ScriptClass::NonStandard => Err(TxScriptError::PubKeyFormat),
        ScriptClass::PubKey => Ok(Address::new(prefix, Version::PubKey, &script[1..33])),
        ScriptClass::PubKeyECDSA => Ok(Address::new(prefix, Version::PubKeyECDSA, &script[1..34])),
        ScriptClass::ScriptHash => Ok(Address::new(prefix, Version::ScriptHash, &script[2..34])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kasforge_consensus_core::hashing::sighash_type::SIG_HASH_ALL;

    #[test]
    fn test_extract_address_and_encode_script() {
        struct Test {
            name: &'static str,
            script_pub_key: ScriptPublicKey,
            prefix: Prefix,
            expected_address: Result<Address, TxScriptError>,
        }

        // cspell:disable
        let tests = vec![
            Test {
                name: "Mainnet PubKey script and address",
                script_pub_key: ScriptPublicKey::new(
                    ScriptClass::PubKey.version(),
                    ScriptVec::from_slice(
                        &hex::decode("2079be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798ac").unwrap(),
                    ),
                ),
                prefix: Prefix::Mainnet,
                expected_address: Ok("kaspa:qpumuen7l8wthtz45p3ftn58pvrs9xlumvkuu2xet8egzkcklqtes4ypce9sf".try_into().unwrap()),
            },
            Test {
                name: "Mainnet PubKeyECDSA script and address",
                script_pub_key: ScriptPublicKey::new(
                    ScriptClass::PubKeyECDSA.version(),
                    ScriptVec::from_slice(
                        &hex::decode("2103401b9e9d698388da082f3692b10d40b7a846c5f15f2a29e63e11f5647bd01debab").unwrap(),
                    ),
                ),
                prefix: Prefix::Mainnet,
                expected_address: Ok("kaspa:qyp5qxu7n45c8zx6pqhndy43p4qt02zxchc4723fuclpraty00gpm6c8edeys5s".try_into().unwrap()),
            },
            Test {
                name: "Testnet non standard script",
                script_pub_key: ScriptPublicKey::new(
                    ScriptClass::PubKey.version(),
                    ScriptVec::from_slice(
                        &hex::decode("2001fc5f4e9d9879599c69a3dafdb835a7255e5f2e934e9322ecd3af190ab0f60eab").unwrap(),
                    ),
                ),
                prefix: Prefix::Testnet,
                expected_address: Err(TxScriptError::PubKeyFormat),
            },
            Test {
                name: "Mainnet script with unknown version",
                script_pub_key: ScriptPublicKey::new(
                    ScriptClass::PubKey.version() + 1,
                    ScriptVec::from_slice(
                        &hex::decode("2079be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798ac").unwrap(),
                    ),
                ),
                prefix: Prefix::Mainnet,
                expected_address: Err(TxScriptError::PubKeyFormat),
            },
        ];
        // cspell:enable

        for test in tests {
            let extracted = extract_script_pub_key_address(&test.script_pub_key, test.prefix);
            assert_eq!(extracted, test.expected_address, "extract address test failed for '{}'", test.name);
            if let Ok(ref address) = extracted {
                let encoded = pay_to_address_script(address);
                assert_eq!(encoded, test.script_pub_key, "encode public key script test failed for '{}'", test.name);
            }
        }
    }

    #[test]
    fn test_address_for_public_key_roundtrip() {
        struct Test {
            name: &'static str,
            public_key: &'static str,
            class: ScriptClass,
            expected_payload: &'static str,
        }

        // The generator point in compressed and uncompressed SEC1 form.
        let compressed = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
        let uncompressed = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";
        let x_only = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

        let tests = vec![
            Test { name: "schnorr from x-only key", public_key: x_only, class: ScriptClass::PubKey, expected_payload: x_only },
            Test { name: "schnorr from compressed key", public_key: compressed, class: ScriptClass::PubKey, expected_payload: x_only },
            Test { name: "ecdsa from compressed key", public_key: compressed, class: ScriptClass::PubKeyECDSA, expected_payload: compressed },
            Test {
                name: "ecdsa from uncompressed key",
                public_key: uncompressed,
                class: ScriptClass::PubKeyECDSA,
                expected_payload: compressed,
            },
        ];

        for test in tests {
            let public_key = hex::decode(test.public_key).unwrap();
            let address = address_for_public_key(&public_key, test.class, Prefix::Mainnet).unwrap();
            assert_eq!(hex::encode(&address.payload), test.expected_payload, "{} wrong payload", test.name);

            let locking = LockingScript::try_from(&address).unwrap();
            assert_eq!(locking.class(), test.class, "{} wrong class", test.name);
            assert_eq!(locking.payload(), address.payload.as_slice(), "{} wrong payload", test.name);
            assert_eq!(extract_script_pub_key_address(locking.script_public_key(), Prefix::Mainnet).unwrap(), address);
        }

        let public_key = hex::decode(compressed).unwrap();
        let address = address_for_public_key(&public_key, ScriptClass::ScriptHash, Prefix::Testnet).unwrap();
        let redeem_script = pay_to_pub_key_ecdsa(&public_key);
        assert_eq!(address.version, Version::ScriptHash);
        assert_eq!(pay_to_address_script(&address), pay_to_script_hash_script(&redeem_script));

        assert_eq!(address_for_public_key(&[2u8; 20], ScriptClass::PubKey, Prefix::Mainnet), Err(TxScriptError::PubKeyLength(20)));
        assert!(matches!(
            address_for_public_key(&[5u8; 33], ScriptClass::PubKeyECDSA, Prefix::Mainnet),
            Err(TxScriptError::InvalidPublicKey(_))
        ));
        assert!(address_for_public_key(&public_key, ScriptClass::NonStandard, Prefix::Mainnet).is_err());
    }

    #[test]
    fn test_signature_scripts() {
        let signature: Vec<u8> = (0u8..64).collect();
        let expected = format!("41{}01", hex::encode(&signature));

        for class in [ScriptClass::PubKey, ScriptClass::PubKeyECDSA] {
            let script = signature_script_for_class(class, &signature, SIG_HASH_ALL, None).unwrap();
            assert_eq!(hex::encode(&script), expected, "{class} signature script");
        }

        let redeem_script = vec![0x51; 190];
        let script = signature_script_for_class(ScriptClass::ScriptHash, &signature, SIG_HASH_ALL, Some(&redeem_script)).unwrap();
        assert_eq!(hex::encode(&script), format!("{expected}4cbe{}", hex::encode(&redeem_script)));

        assert_eq!(
            signature_script_for_class(ScriptClass::ScriptHash, &signature, SIG_HASH_ALL, None),
            Err(TxScriptError::MissingRedeemScript)
        );
        assert_eq!(pay_to_pub_key_signature_script(&signature[..63], SIG_HASH_ALL), Err(TxScriptError::SigLength(63)));
        assert!(matches!(
            signature_script_for_class(ScriptClass::NonStandard, &signature, SIG_HASH_ALL, None),
            Err(TxScriptError::UnsupportedScriptClass(_))
        ));
    }

    #[test]
    fn test_redeem_script_key_class() {
        let ecdsa = hex::decode("2103401b9e9d698388da082f3692b10d40b7a846c5f15f2a29e63e11f5647bd01debab0063").unwrap();
        let schnorr = hex::decode("2079be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798ac").unwrap();
        assert_eq!(redeem_script_key_class(&ecdsa), ScriptClass::PubKeyECDSA);
        assert_eq!(redeem_script_key_class(&schnorr), ScriptClass::PubKey);
        assert_eq!(redeem_script_key_class(&[0x51]), ScriptClass::NonStandard);
    }
}
