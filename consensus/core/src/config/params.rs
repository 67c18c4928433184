use serde::{Deserialize, Serialize};

/// Mass factors used when estimating the compute mass of a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MassParams {
    pub mass_per_tx_byte: u64,
    pub mass_per_script_pub_key_byte: u64,
    pub mass_per_sig_op: u64,
}

pub const MAINNET_MASS_PARAMS: MassParams = MassParams { mass_per_tx_byte: 1, mass_per_script_pub_key_byte: 10, mass_per_sig_op: 1000 };

impl Default for MassParams {
    fn default() -> Self {
        MAINNET_MASS_PARAMS
    }
}
