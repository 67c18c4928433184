use crate::{Address, AddressError, PayloadVec, Prefix, Version};

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";
const CHECKSUM_LEN: usize = 8;

// Inverse of CHARSET, indexed by ASCII code. `0xff` marks characters outside the alphabet.
const REV_CHARSET: [u8; 128] = {
    let mut table = [0xffu8; 128];
    let mut i = 0;
    while i < CHARSET.len() {
        table[CHARSET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

// Cashaddr-style polymod over 5-bit groups with a 40-bit checksum.
fn polymod(values: impl Iterator<Item = u8>) -> u64 {
    const GENERATORS: [u64; 5] = [0x98f2bc8e61, 0x79b76d99e2, 0xf33e5fb3c4, 0xae2eabe2a8, 0x1e4f43e470];
    let mut c = 1u64;
    for d in values {
        let c0 = c >> 35;
        c = ((c & 0x07ffffffff) << 5) ^ (d as u64);
        for (bit, generator) in GENERATORS.iter().enumerate() {
            if (c0 >> bit) & 1 != 0 {
                c ^= generator;
            }
        }
    }
    c ^ 1
}

fn checksum(prefix: Prefix, payload: &[u8]) -> u64 {
    let prefix = prefix.as_str().bytes().map(|c| c & 0x1f);
    polymod(prefix.chain([0u8]).chain(payload.iter().copied()).chain([0u8; CHECKSUM_LEN]))
}

/// Regroups a bit stream from `from`-bit to `to`-bit words. When `pad` is set the
/// trailing partial word is zero-padded on the right, otherwise it is dropped.
fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Vec<u8> {
    let mut acc = 0u32;
    let mut bits = 0u32;
    let max = (1u32 << to) - 1;
    let max_acc = (1u32 << (from + to - 1)) - 1;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);
    for &value in data {
        acc = ((acc << from) | value as u32) & max_acc;
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max) as u8);
        }
    }
    if pad && bits > 0 {
        out.push(((acc << (to - bits)) & max) as u8);
    }
    out
}

impl Address {
    pub(crate) fn encode_payload(&self) -> String {
        let mut versioned = Vec::with_capacity(self.payload.len() + 1);
        versioned.push(self.version as u8);
        versioned.extend_from_slice(&self.payload);
        let fivebit_payload = convert_bits(&versioned, 8, 5, true);

        let checksum = checksum(self.prefix, &fivebit_payload);
        let fivebit_checksum = convert_bits(&checksum.to_be_bytes()[3..], 8, 5, true);

        fivebit_payload.iter().chain(fivebit_checksum.iter()).map(|&c| CHARSET[c as usize] as char).collect()
    }

    pub(crate) fn decode_payload(prefix: Prefix, address: &str) -> Result<Self, AddressError> {
        let address_u5 = address
            .bytes()
            .map(|b| match REV_CHARSET.get(b as usize) {
                Some(&value) if value != 0xff => Ok(value),
                _ => Err(AddressError::DecodingError(b as char)),
            })
            .collect::<Result<Vec<u8>, _>>()?;

        if address_u5.len() <= CHECKSUM_LEN {
            return Err(AddressError::InvalidLength(address_u5.len()));
        }

        let (payload_u5, checksum_u5) = address_u5.split_at(address_u5.len() - CHECKSUM_LEN);
        let mut checksum_bytes = [0u8; 8];
        checksum_bytes[3..].copy_from_slice(&convert_bits(checksum_u5, 5, 8, false));
        if checksum(prefix, payload_u5) != u64::from_be_bytes(checksum_bytes) {
            return Err(AddressError::BadChecksum);
        }

        let payload_u8 = convert_bits(payload_u5, 5, 8, false);
        let (&version, payload) = payload_u8.split_first().ok_or(AddressError::InvalidLength(0))?;
        let version = Version::try_from(version)?;
        if payload.len() != version.public_key_len() {
            return Err(AddressError::InvalidPayloadLength { version, length: payload.len() });
        }
        Ok(Self { prefix, version, payload: PayloadVec::from_slice(payload) })
    }
}
