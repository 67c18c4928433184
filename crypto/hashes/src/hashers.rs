use crate::{HASH_SIZE, Hash};
use sha2::{Digest, Sha256};

pub trait HasherBase {
    fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self;
}

pub trait Hasher: HasherBase + Clone + Default {
    fn finalize(self) -> Hash;
    fn reset(&mut self);
    #[inline(always)]
    fn hash<A: AsRef<[u8]>>(data: A) -> Hash {
        let mut hasher = Self::default();
        hasher.update(data);
        hasher.finalize()
    }
}

macro_rules! blake2b_hasher {
    ($(struct $name:ident => $domain_sep:literal),+ $(,)? ) => {$(
        /// Keyed BLAKE2b-256 hasher; the key acts as the domain separation tag.
        #[derive(Clone)]
        pub struct $name(blake2b_simd::State);

        impl $name {
            pub const DOMAIN: &'static [u8] = $domain_sep;

            #[inline(always)]
            pub fn new() -> Self {
                Self(blake2b_simd::Params::new().hash_length(HASH_SIZE).key(Self::DOMAIN).to_state())
            }

            pub fn write<A: AsRef<[u8]>>(&mut self, data: A) {
                self.0.update(data.as_ref());
            }

            #[inline(always)]
            pub fn finalize(self) -> Hash {
                Hash::from_slice(self.0.finalize().as_bytes())
            }
        }

        impl_hasher! { struct $name }
    )*};
}

macro_rules! sha256_hasher {
    ($(struct $name:ident => $domain_sep:literal),+ $(,)? ) => {$(
        /// SHA-256 hasher prefixed with the SHA-256 digest of its domain tag.
        #[derive(Clone)]
        pub struct $name(Sha256);

        impl $name {
            pub const DOMAIN: &'static [u8] = $domain_sep;

            #[inline(always)]
            pub fn new() -> Self {
                let mut hasher = Sha256::new();
                hasher.update(Sha256::digest(Self::DOMAIN));
                Self(hasher)
            }

            pub fn write<A: AsRef<[u8]>>(&mut self, data: A) {
                self.0.update(data.as_ref());
            }

            #[inline(always)]
            pub fn finalize(self) -> Hash {
                Hash::from_slice(self.0.finalize().as_slice())
            }
        }

        impl_hasher! { struct $name }
    )*};
}

macro_rules! impl_hasher {
    (struct $name:ident) => {
        impl HasherBase for $name {
            #[inline(always)]
            fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self {
                self.write(data);
                self
            }
        }

        impl Hasher for $name {
            #[inline(always)]
            fn finalize(self) -> Hash {
                $name::finalize(self)
            }

            fn reset(&mut self) {
                *self = Self::new();
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

blake2b_hasher! {
    struct TransactionHash => b"TransactionHash",
    struct TransactionID => b"TransactionID",
    struct TransactionSigningHash => b"TransactionSigningHash",
}

sha256_hasher! {
    struct TransactionSigningHashECDSA => b"TransactionSigningHashECDSA",
}

/// Unkeyed BLAKE2b-256, used to commit to redeem scripts in pay-to-script-hash outputs.
pub fn script_hash(script: &[u8]) -> Hash {
    Hash::from_slice(blake2b_simd::Params::new().hash_length(HASH_SIZE).to_state().update(script).finalize().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_domain_separation() {
        let data = b"kasforge";
        let digests = [TransactionHash::hash(data), TransactionID::hash(data), TransactionSigningHash::hash(data), script_hash(data)];
        for (i, a) in digests.iter().enumerate() {
            for b in digests.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_incremental_updates_match_one_shot() {
        let mut hasher = TransactionSigningHash::new();
        hasher.update([1u8, 2]).update([3u8]);
        assert_eq!(hasher.finalize(), TransactionSigningHash::hash([1u8, 2, 3]));

        let mut hasher = TransactionSigningHashECDSA::new();
        hasher.update([7u8; 40]);
        hasher.reset();
        hasher.update([9u8; 32]);
        assert_eq!(hasher.finalize(), TransactionSigningHashECDSA::hash([9u8; 32]));
    }

    #[test]
    fn test_ecdsa_signing_hash() {
        let schnorr = Hash::from_str("5e8f95f3ee2b0f42e6cbd19c1bf97b3f8fe8e91a8bc5b37d5f8a7ae7ab51fb6f").unwrap();
        let mut direct = Sha256::new();
        direct.update(Sha256::digest(b"TransactionSigningHashECDSA"));
        direct.update(schnorr.as_bytes());
        assert_eq!(TransactionSigningHashECDSA::hash(schnorr), Hash::from_slice(direct.finalize().as_slice()));
    }
}
