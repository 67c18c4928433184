//!
//! Assembly of unsigned transactions from selected inputs and payment outputs.
//!

use crate::imports::*;
use crate::tx::{InputContext, PaymentOutput, UnsignedTransaction};
use kasforge_consensus_core::{
    constants::{DEFAULT_SEQUENCE, STANDARD_SIG_OP_COUNT, TX_VERSION},
    tx::{Transaction, TransactionInput, TransactionOutput},
};

/// Builds the unsigned transaction spending `inputs` in the given order.
///
/// The destination is always output 0; the change output, when present, follows it.
/// Inputs get the default sequence and one signature operation. Fails with
/// [`Error::InsufficientFunds`] when the outputs exceed the inputs.
pub fn build_unsigned(inputs: Vec<InputContext>, destination: &PaymentOutput, change: Option<&PaymentOutput>) -> Result<UnsignedTransaction> {
    let transaction_inputs = inputs
        .iter()
        .map(|input| TransactionInput::new(input.outpoint, vec![], DEFAULT_SEQUENCE, STANDARD_SIG_OP_COUNT))
        .collect::<Vec<_>>();
    let outputs =
        std::iter::once(destination).chain(change).map(TransactionOutput::from).collect::<Vec<_>>();

    let aggregate_input_value: u64 = inputs.iter().map(InputContext::amount).sum();
    let payment_value = destination.amount;
    let change_value = change.map(|output| output.amount).unwrap_or_default();
    let required = payment_value.checked_add(change_value).ok_or(Error::InsufficientFunds { required: u64::MAX, available: aggregate_input_value })?;
    let fees = aggregate_input_value.checked_sub(required).ok_or(Error::InsufficientFunds { required, available: aggregate_input_value })?;

    let transaction = Transaction::new_native(TX_VERSION, transaction_inputs, outputs);
    trace!("assembled {} with {} inputs, payment {payment_value}, change {change_value}, fees {fees}", transaction.id(), inputs.len());
    UnsignedTransaction::new(transaction, inputs, payment_value, change_value, fees)
}

/// Builds the unsigned transaction spending store entries, all sharing `redeem_script`
/// when they pay to a script hash.
pub fn build_unsigned_from_entries(
    entries: &[UtxoEntryReference],
    redeem_script: Option<&[u8]>,
    destination: &PaymentOutput,
    change: Option<&PaymentOutput>,
) -> Result<UnsignedTransaction> {
    let inputs = entries
        .iter()
        .map(|entry| {
            let redeem_script = (entry.locking_script().class() == ScriptClass::ScriptHash).then(|| redeem_script.map(<[u8]>::to_vec)).flatten();
            InputContext::from_entry(entry, redeem_script)
        })
        .collect();
    build_unsigned(inputs, destination, change)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    // cspell:disable
    const SOURCE: &str = "kaspa:qyp5qxu7n45c8zx6pqhndy43p4qt02zxchc4723fuclpraty00gpm6c8edeys5s";
    const DESTINATION: &str = "kaspa:qyptjw50kqcp6a7xmx8juv0xvmgtmem4fvlte88clt2kafas863narspv9sj34u";
    // cspell:enable

    fn entries() -> Vec<UtxoEntryReference> {
        let source = LockingScript::from_str(SOURCE).unwrap();
        [
            ("414f096361040f27e3ebfd02965c27d1492a69880dbf1544bf213e7159709134", 0, 20_000_000),
            ("5f7deb4c490de237e0dcc9dae4216f80247a671ca30eaab411d2963c6e070113", 1, 19_736_854),
            ("c97e84228b68aa37a0c51c5a93f0005eb9543a353b6cf59c33052eab33f16e0b", 0, 20_000_000),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (id, index, amount))| {
            UtxoEntryReference::new(source.clone(), UnspentOutput::new(i as u64 + 1, TransactionId::from_str(id).unwrap(), index, amount))
        })
        .collect()
    }

    #[test]
    fn test_build_unsigned_ordering_and_conservation() {
        let entries = entries();
        let destination = PaymentOutput::new(LockingScript::from_str(DESTINATION).unwrap(), 20_000_000);
        let change = PaymentOutput::new(LockingScript::from_str(SOURCE).unwrap(), 39_732_557);

        let unsigned = build_unsigned_from_entries(&entries, None, &destination, Some(&change)).unwrap();
        let tx = unsigned.transaction();

        assert_eq!(tx.inputs.iter().map(|input| input.previous_outpoint).collect_vec(), entries.iter().map(|e| e.id()).collect_vec());
        assert!(tx.inputs.iter().all(|input| input.signature_script.is_empty() && input.sig_op_count == 1 && input.sequence == 0));
        assert_eq!(tx.outputs[0], TransactionOutput::from(&destination));
        assert_eq!(tx.outputs[1], TransactionOutput::from(&change));
        assert_eq!(unsigned.fees(), 4_297);
        assert_eq!(unsigned.aggregate_input_value(), unsigned.aggregate_output_value() + unsigned.fees());
        assert_eq!(unsigned.id(), build_unsigned_from_entries(&entries, None, &destination, Some(&change)).unwrap().id());

        let without_change = build_unsigned_from_entries(&entries[..1], None, &destination, None).unwrap();
        assert_eq!(without_change.transaction().outputs.len(), 1);
        assert_eq!(without_change.change_value(), 0);
        assert_eq!(without_change.fees(), 0);
    }

    #[test]
    fn test_outputs_exceeding_inputs_are_rejected() {
        struct Test {
            name: &'static str,
            payment: u64,
            change: Option<u64>,
            required: u64,
        }

        let tests = vec![
            Test { name: "payment above inputs", payment: 20_000_001, change: None, required: 20_000_001 },
            Test { name: "change pushes outputs above inputs", payment: 15_000_000, change: Some(5_000_001), required: 20_000_001 },
            Test { name: "output sum overflows", payment: u64::MAX, change: Some(1), required: u64::MAX },
        ];

        let entries = entries();
        let source = LockingScript::from_str(SOURCE).unwrap();
        for test in tests {
            let destination = PaymentOutput::new(LockingScript::from_str(DESTINATION).unwrap(), test.payment);
            let change = test.change.map(|amount| PaymentOutput::new(source.clone(), amount));
            let result = build_unsigned_from_entries(&entries[..1], None, &destination, change.as_ref());
            match result {
                Err(Error::InsufficientFunds { required, available }) => {
                    assert_eq!(required, test.required, "{} wrong required amount", test.name);
                    assert_eq!(available, 20_000_000, "{} wrong available amount", test.name);
                }
                other => panic!("{} expected insufficient funds, got {:?}", test.name, other.map(|tx| tx.id())),
            }
        }
    }
}
