//!
//! [`BuilderSettings`] controlling network selection, dust handling, input
//! selection and mass estimation of the [`TransactionBuilder`](crate::TransactionBuilder).
//!

use crate::imports::*;
use kasforge_consensus_core::config::params::MassParams;

/// 0.2 KAS, the smallest change output the builder emits.
pub const DEFAULT_DUST_THRESHOLD: u64 = 20_000_000;

/// What happens to change that would fall below the dust threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DustPolicy {
    /// The change output is omitted and its value is added to the fee.
    #[default]
    FoldIntoFee,
    /// The build fails with [`Error::DustOutputRejected`].
    Reject,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuilderSettings {
    pub network: NetworkType,
    pub dust_threshold: u64,
    pub dust_policy: DustPolicy,
    pub selection_strategy: SelectionStrategy,
    pub mass_params: MassParams,
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            network: NetworkType::Mainnet,
            dust_threshold: DEFAULT_DUST_THRESHOLD,
            dust_policy: DustPolicy::default(),
            selection_strategy: SelectionStrategy::default(),
            mass_params: MassParams::default(),
        }
    }
}

impl BuilderSettings {
    pub fn new(network: NetworkType) -> Self {
        Self { network, ..Default::default() }
    }

    pub fn with_selection_strategy(mut self, selection_strategy: SelectionStrategy) -> Self {
        self.selection_strategy = selection_strategy;
        self
    }

    pub fn with_dust_policy(mut self, dust_policy: DustPolicy) -> Self {
        self.dust_policy = dust_policy;
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn prefix(&self) -> Prefix {
        self.network.prefix()
    }

    /// Decodes `address` and checks its prefix against the configured network.
    /// On test networks any non-mainnet prefix is accepted.
    pub fn parse_address(&self, address: &str) -> Result<Address> {
        let address = Address::try_from(address)?;
        let expected = self.prefix();
        let accepted = address.prefix == expected || (self.network.is_testnet() && !address.prefix.is_mainnet());
        if !accepted {
            return Err(kasforge_addresses::AddressError::UnexpectedPrefix { expected, actual: address.prefix }.into());
        }
        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_toml() {
        let settings = BuilderSettings::from_toml_str(
            r#"
            network = "testnet"
            dustPolicy = "reject"
            selectionStrategy = "sweepAll"

            [massParams]
            massPerTxByte = 1
            massPerScriptPubKeyByte = 10
            massPerSigOp = 1000
            "#,
        )
        .unwrap();

        assert_eq!(settings.network, NetworkType::Testnet);
        assert_eq!(settings.dust_threshold, DEFAULT_DUST_THRESHOLD);
        assert_eq!(settings.dust_policy, DustPolicy::Reject);
        assert_eq!(settings.selection_strategy, SelectionStrategy::SweepAll);
        assert_eq!(settings.mass_params, MassParams::default());

        let text = settings.to_toml_string().unwrap();
        assert_eq!(BuilderSettings::from_toml_str(&text).unwrap(), settings);

        assert_eq!(BuilderSettings::from_toml_str("").unwrap(), BuilderSettings::default());
        assert!(BuilderSettings::from_toml_str("dustPolicy = \"burn\"").is_err());
    }

    #[test]
    fn test_parse_address_prefix() {
        struct Test {
            name: &'static str,
            network: NetworkType,
            address: &'static str,
            accepted: bool,
        }

        // cspell:disable
        let tests = vec![
            Test {
                name: "mainnet address on mainnet",
                network: NetworkType::Mainnet,
                address: "kaspa:qyp5qxu7n45c8zx6pqhndy43p4qt02zxchc4723fuclpraty00gpm6c8edeys5s",
                accepted: true,
            },
            Test {
                name: "mainnet address on testnet",
                network: NetworkType::Testnet,
                address: "kaspa:qyp5qxu7n45c8zx6pqhndy43p4qt02zxchc4723fuclpraty00gpm6c8edeys5s",
                accepted: false,
            },
            Test {
                name: "testnet address on testnet",
                network: NetworkType::Testnet,
                address: "kaspatest:qyp5qxu7n45c8zx6pqhndy43p4qt02zxchc4723fuclpraty00gpm6cvdgyh3m9",
                accepted: true,
            },
            Test {
                name: "devnet address on testnet",
                network: NetworkType::Testnet,
                address: "kaspadev:qyp5qxu7n45c8zx6pqhndy43p4qt02zxchc4723fuclpraty00gpm6ccp3kypk9",
                accepted: true,
            },
            Test {
                name: "testnet address on mainnet",
                network: NetworkType::Mainnet,
                address: "kaspatest:qyp5qxu7n45c8zx6pqhndy43p4qt02zxchc4723fuclpraty00gpm6cvdgyh3m9",
                accepted: false,
            },
            Test {
                name: "corrupted checksum",
                network: NetworkType::Mainnet,
                address: "kaspa:qyp5qxu7n45c8zx6pqhndy43p4qt02zxchc4723fuclpraty00gpm6c8edeys5q",
                accepted: false,
            },
        ];
        // cspell:enable

        for test in tests {
            let result = BuilderSettings::new(test.network).parse_address(test.address);
            assert_eq!(result.is_ok(), test.accepted, "{}: unexpected result {:?}", test.name, result);
            if let Err(err) = result {
                assert!(matches!(err, Error::InvalidAddress(_)), "{}: unexpected error {err}", test.name);
            }
        }
    }
}
