use serde::{Deserialize, Serialize};

pub const SIG_HASH_ALL: SigHashType = SigHashType(0b00000001);
pub const SIG_HASH_NONE: SigHashType = SigHashType(0b00000010);
pub const SIG_HASH_SINGLE: SigHashType = SigHashType(0b00000100);
pub const SIG_HASH_ANY_ONE_CAN_PAY: SigHashType = SigHashType(0b10000000);

/// SIG_HASH_MASK defines the number of bits of the hash type which are used
/// to identify which outputs are signed.
pub const SIG_HASH_MASK: u8 = 0b00000111;

const ALLOWED_SIG_HASH_TYPES_VALUES: [u8; 6] = [
    SIG_HASH_ALL.0,
    SIG_HASH_NONE.0,
    SIG_HASH_SINGLE.0,
    SIG_HASH_ALL.0 | SIG_HASH_ANY_ONE_CAN_PAY.0,
    SIG_HASH_NONE.0 | SIG_HASH_ANY_ONE_CAN_PAY.0,
    SIG_HASH_SINGLE.0 | SIG_HASH_ANY_ONE_CAN_PAY.0,
];

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid sighash type {0:#04x}")]
pub struct InvalidSigHashType(pub u8);

/// The sighash flag appended to every signature. The builders only ever emit [`SIG_HASH_ALL`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SigHashType(pub(crate) u8);

impl SigHashType {
    pub fn is_sighash_all(self) -> bool {
        self.0 & SIG_HASH_MASK == SIG_HASH_ALL.0
    }

    pub fn is_sighash_none(self) -> bool {
        self.0 & SIG_HASH_MASK == SIG_HASH_NONE.0
    }

    pub fn is_sighash_single(self) -> bool {
        self.0 & SIG_HASH_MASK == SIG_HASH_SINGLE.0
    }

    pub fn is_sighash_anyone_can_pay(self) -> bool {
        self.0 & SIG_HASH_ANY_ONE_CAN_PAY.0 == SIG_HASH_ANY_ONE_CAN_PAY.0
    }

    pub fn to_u8(self) -> u8 {
        self.0
    }

    pub fn from_u8(val: u8) -> Result<Self, InvalidSigHashType> {
        if !ALLOWED_SIG_HASH_TYPES_VALUES.contains(&val) {
            return Err(InvalidSigHashType(val));
        }

        Ok(Self(val))
    }
}

impl Default for SigHashType {
    fn default() -> Self {
        SIG_HASH_ALL
    }
}

impl TryFrom<u8> for SigHashType {
    type Error = InvalidSigHashType;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value)
    }
}

impl From<SigHashType> for u8 {
    fn from(value: SigHashType) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sighash_type_flags() {
        struct Test {
            name: &'static str,
            value: u8,
            valid: bool,
            all: bool,
            anyone_can_pay: bool,
        }

        let tests = vec![
            Test { name: "all", value: 0x01, valid: true, all: true, anyone_can_pay: false },
            Test { name: "all anyone can pay", value: 0x81, valid: true, all: true, anyone_can_pay: true },
            Test { name: "none", value: 0x02, valid: true, all: false, anyone_can_pay: false },
            Test { name: "single anyone can pay", value: 0x84, valid: true, all: false, anyone_can_pay: true },
            Test { name: "zero", value: 0x00, valid: false, all: false, anyone_can_pay: false },
            Test { name: "all and none", value: 0x03, valid: false, all: false, anyone_can_pay: false },
        ];

        for test in tests {
            match SigHashType::from_u8(test.value) {
                Ok(hash_type) => {
                    assert!(test.valid, "{} should be rejected", test.name);
                    assert_eq!(hash_type.is_sighash_all(), test.all, "{} all flag", test.name);
                    assert_eq!(hash_type.is_sighash_anyone_can_pay(), test.anyone_can_pay, "{} anyone can pay flag", test.name);
                    assert_eq!(hash_type.to_u8(), test.value, "{} roundtrip", test.name);
                }
                Err(err) => {
                    assert!(!test.valid, "{} should be accepted", test.name);
                    assert_eq!(err, InvalidSigHashType(test.value));
                }
            }
        }

        assert_eq!(SigHashType::default(), SIG_HASH_ALL);
        assert!(serde_json::from_str::<SigHashType>("3").is_err());
        assert_eq!(serde_json::from_str::<SigHashType>("1").unwrap(), SIG_HASH_ALL);
    }
}
