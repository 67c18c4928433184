//!
//! Fee modes and dust handling of change outputs.
//!

use crate::imports::*;

/// How the fee of a transaction is determined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "value")]
pub enum FeeType {
    /// A fixed fee in sompi, supplied by the caller.
    Exactly(u64),
    /// Sompi per gram of transaction mass.
    Rate(u64),
}

impl FeeType {
    /// The fee of a transaction of the given mass.
    pub fn fee_for_mass(&self, mass: u64) -> u64 {
        match self {
            FeeType::Exactly(fee) => *fee,
            FeeType::Rate(rate) => mass.saturating_mul(*rate),
        }
    }

    pub fn is_rate(&self) -> bool {
        matches!(self, FeeType::Rate(_))
    }
}

impl From<u64> for FeeType {
    fn from(fee: u64) -> Self {
        FeeType::Exactly(fee)
    }
}

/// Outcome of applying the dust policy to the change of a selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChangeResolution {
    /// Value of the change output, zero when no change output is emitted.
    pub change_value: u64,
    /// Fee actually paid, including any folded change.
    pub fees: u64,
}

impl ChangeResolution {
    pub fn has_change(&self) -> bool {
        self.change_value > 0
    }
}

/// Splits the value left after paying `payment_value` and `fee` into change and fees.
///
/// Change below `dust_threshold` is added to the fee or rejected with
/// [`Error::DustOutputRejected`] depending on `policy`.
pub fn resolve_change(
    aggregate_input_value: u64,
    payment_value: u64,
    fee: u64,
    dust_threshold: u64,
    policy: DustPolicy,
) -> Result<ChangeResolution> {
    let required = payment_value.saturating_add(fee);
    let change = aggregate_input_value
        .checked_sub(required)
        .ok_or(Error::InsufficientFunds { required, available: aggregate_input_value })?;

    match change {
        0 => Ok(ChangeResolution { change_value: 0, fees: fee }),
        change if change >= dust_threshold => Ok(ChangeResolution { change_value: change, fees: fee }),
        change => match policy {
            DustPolicy::FoldIntoFee => {
                debug!("change of {change} is below the dust threshold of {dust_threshold}, folding it into the fee");
                Ok(ChangeResolution { change_value: 0, fees: fee + change })
            }
            DustPolicy::Reject => {
                warn!("rejecting change of {change} below the dust threshold of {dust_threshold}");
                Err(Error::DustOutputRejected { amount: change, threshold: dust_threshold })
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DEFAULT_DUST_THRESHOLD;

    #[test]
    fn test_resolve_change() {
        struct Test {
            name: &'static str,
            aggregate_input_value: u64,
            payment_value: u64,
            fee: u64,
            policy: DustPolicy,
            expected: std::result::Result<ChangeResolution, (u64, u64)>,
        }

        let tests = vec![
            Test {
                name: "change above dust",
                aggregate_input_value: 500_000_000,
                payment_value: 100_000,
                fee: 30_000_000,
                policy: DustPolicy::Reject,
                expected: Ok(ChangeResolution { change_value: 469_900_000, fees: 30_000_000 }),
            },
            Test {
                name: "no change",
                aggregate_input_value: 20_010_000,
                payment_value: 20_000_000,
                fee: 10_000,
                policy: DustPolicy::Reject,
                expected: Ok(ChangeResolution { change_value: 0, fees: 10_000 }),
            },
            Test {
                name: "dust folded into fee",
                aggregate_input_value: 30_000_000,
                payment_value: 20_000_000,
                fee: 10_000,
                policy: DustPolicy::FoldIntoFee,
                expected: Ok(ChangeResolution { change_value: 0, fees: 10_000_000 }),
            },
            Test {
                name: "dust rejected",
                aggregate_input_value: 30_000_000,
                payment_value: 20_000_000,
                fee: 10_000,
                policy: DustPolicy::Reject,
                expected: Err((9_990_000, DEFAULT_DUST_THRESHOLD)),
            },
            Test {
                name: "change exactly at the threshold",
                aggregate_input_value: 40_010_000,
                payment_value: 20_000_000,
                fee: 10_000,
                policy: DustPolicy::Reject,
                expected: Ok(ChangeResolution { change_value: 20_000_000, fees: 10_000 }),
            },
        ];

        for test in tests {
            let result = resolve_change(test.aggregate_input_value, test.payment_value, test.fee, DEFAULT_DUST_THRESHOLD, test.policy);
            match (result, test.expected) {
                (Ok(resolution), Ok(expected)) => {
                    assert_eq!(resolution, expected, "{}", test.name);
                    assert_eq!(test.aggregate_input_value, test.payment_value + resolution.change_value + resolution.fees, "{}", test.name);
                }
                (Err(Error::DustOutputRejected { amount, threshold }), Err(expected)) => {
                    assert_eq!((amount, threshold), expected, "{}", test.name)
                }
                (result, expected) => panic!("{}: expected {:?}, got {:?}", test.name, expected, result),
            }
        }
    }

    #[test]
    fn test_fee_type() {
        assert_eq!(FeeType::from(4_297).fee_for_mass(1_000), 4_297);
        assert_eq!(FeeType::Rate(2).fee_for_mass(1_553), 3_106);
        assert!(FeeType::Rate(1).is_rate());
        assert_eq!(serde_json::to_string(&FeeType::Rate(3)).unwrap(), r#"{"type":"rate","value":3}"#);
        assert!(resolve_change(100, 90, 11, 0, DustPolicy::FoldIntoFee).is_err());
    }
}
