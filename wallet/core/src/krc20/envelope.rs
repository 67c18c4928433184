use crate::imports::*;
use kasforge_txscript::envelope_redeem_script;

/// Tag pushed ahead of the operation inside the redeem script.
pub const ENVELOPE_PROTOCOL_TAG: &[u8] = b"kasplex";
pub const KRC20_PROTOCOL: &str = "krc-20";
pub const OP_TRANSFER: &str = "transfer";

/// A KRC20 operation as inscribed in the redeem script.
///
/// Serializes to compact JSON with keys in the order indexers expect:
/// `{"amt":..,"op":..,"p":..,"tick":..,"to":..}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Krc20Envelope {
    /// Token amount in the smallest token unit, as a decimal string.
    #[serde(rename = "amt")]
    pub amount: String,
    pub op: String,
    #[serde(rename = "p")]
    pub protocol: String,
    pub tick: String,
    pub to: String,
}

impl Krc20Envelope {
    /// A transfer of `amount` units of `ticker` to `recipient`. The ticker is upper-cased.
    pub fn transfer(amount: u64, ticker: &str, recipient: &Address) -> Self {
        Self {
            amount: amount.to_string(),
            op: OP_TRANSFER.to_string(),
            protocol: KRC20_PROTOCOL.to_string(),
            tick: ticker.to_uppercase(),
            to: recipient.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The redeem script committing to this operation, spendable by `public_key`.
    ///
    /// Script hash sources sign with their ECDSA key, so their envelopes use an ECDSA check.
    pub fn redeem_script(&self, public_key: &[u8], class: ScriptClass) -> Result<Vec<u8>> {
        let class = match class {
            ScriptClass::ScriptHash => ScriptClass::PubKeyECDSA,
            class => class,
        };
        Ok(envelope_redeem_script(public_key, class, ENVELOPE_PROTOCOL_TAG, self.to_json()?.as_bytes())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // cspell:disable
    const PUBLIC_KEY: &str = "03401b9e9d698388da082f3692b10d40b7a846c5f15f2a29e63e11f5647bd01deb";
    const RECIPIENT: &str = "kaspa:qyptjw50kqcp6a7xmx8juv0xvmgtmem4fvlte88clt2kafas863narspv9sj34u";
    // cspell:enable

    #[test]
    fn test_transfer_envelope_json() {
        let envelope = Krc20Envelope::transfer(100_000_000, "ggmf", &Address::try_from(RECIPIENT).unwrap());
        assert_eq!(envelope.tick, "GGMF");
        assert_eq!(
            envelope.to_json().unwrap(),
            format!(r#"{{"amt":"100000000","op":"transfer","p":"krc-20","tick":"GGMF","to":"{RECIPIENT}"}}"#)
        );
    }

    #[test]
    fn test_redeem_script_key_check() {
        struct Test {
            name: &'static str,
            class: ScriptClass,
            prefix: &'static str,
        }

        let tests = vec![
            Test { name: "ecdsa source", class: ScriptClass::PubKeyECDSA, prefix: "21" },
            Test { name: "script hash source", class: ScriptClass::ScriptHash, prefix: "21" },
            Test { name: "schnorr source", class: ScriptClass::PubKey, prefix: "20" },
        ];

        let envelope = Krc20Envelope::transfer(1, "kas", &Address::try_from(RECIPIENT).unwrap());
        let public_key = hex::decode(PUBLIC_KEY).unwrap();
        for test in tests {
            let script = envelope.redeem_script(&public_key, test.class).unwrap();
            assert!(hex::encode(&script).starts_with(test.prefix), "{}", test.name);
            assert!(script.windows(ENVELOPE_PROTOCOL_TAG.len()).any(|w| w == ENVELOPE_PROTOCOL_TAG), "{}", test.name);
        }

        assert!(matches!(envelope.redeem_script(&public_key, ScriptClass::NonStandard), Err(Error::UnsupportedScriptKind(_))));
    }
}
