//!
//! Input selection over a snapshot of spendable outputs.
//!

use crate::imports::*;

/// Order in which spendable outputs are considered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionStrategy {
    /// Largest outputs first, ties kept in insertion order. Minimizes the input count.
    #[default]
    LargestFirst,
    /// Outputs in the order they were supplied.
    InsertionOrder,
    /// Every supplied output is spent, consolidating the balance.
    SweepAll,
}

/// Outputs chosen to fund a transaction.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    pub entries: Vec<UtxoEntryReference>,
    pub aggregate_input_value: u64,
}

impl Selection {
    /// Value left over once `amount` and `fee` are paid.
    pub fn change(&self, amount: u64, fee: u64) -> u64 {
        self.aggregate_input_value.saturating_sub(amount.saturating_add(fee))
    }

    fn push(&mut self, entry: UtxoEntryReference) {
        self.aggregate_input_value += entry.amount();
        self.entries.push(entry);
    }
}

/// Accumulates `available` in `strategy` order until the running sum covers `amount`
/// plus the fee `fee_for` computes for the entries selected so far.
///
/// Fails with [`Error::InsufficientFunds`] when the outputs run out first.
pub fn select<F>(strategy: SelectionStrategy, available: Vec<UtxoEntryReference>, amount: u64, fee_for: F) -> Result<Selection>
where
    F: Fn(&[UtxoEntryReference]) -> u64,
{
    let ordered = match strategy {
        SelectionStrategy::LargestFirst => available.into_iter().sorted_by(|a, b| b.cmp(a)).collect_vec(),
        SelectionStrategy::InsertionOrder | SelectionStrategy::SweepAll => available,
    };

    let mut selection = Selection::default();
    let mut required = amount;
    for entry in ordered {
        selection.push(entry);
        required = amount.saturating_add(fee_for(&selection.entries));
        if strategy != SelectionStrategy::SweepAll && selection.aggregate_input_value >= required {
            break;
        }
    }

    if selection.entries.is_empty() || selection.aggregate_input_value < required {
        return Err(Error::InsufficientFunds { required, available: selection.aggregate_input_value });
    }

    debug!(
        "selected {} inputs ({:?}) worth {} for amount {} and fee {}",
        selection.entries.len(),
        strategy,
        selection.aggregate_input_value,
        amount,
        required - amount
    );
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn entries(amounts: &[u64]) -> Vec<UtxoEntryReference> {
        // cspell:disable
        let owner = LockingScript::from_str("kaspa:qyp5qxu7n45c8zx6pqhndy43p4qt02zxchc4723fuclpraty00gpm6c8edeys5s").unwrap();
        // cspell:enable
        amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| UtxoEntryReference::new(owner.clone(), UnspentOutput::new(0, Hash::from_u64_word(i as u64 + 1), 0, *amount)))
            .collect()
    }

    fn amounts(selection: &Selection) -> Vec<u64> {
        selection.entries.iter().map(UtxoEntryReference::amount).collect()
    }

    #[test]
    fn test_select_strategies() {
        struct Test {
            name: &'static str,
            strategy: SelectionStrategy,
            available: Vec<u64>,
            amount: u64,
            fee: u64,
            expected: Option<Vec<u64>>,
        }

        let tests = vec![
            Test {
                name: "largest first picks the single large output",
                strategy: SelectionStrategy::LargestFirst,
                available: vec![10_000_000, 10_000_000, 500_000_000],
                amount: 100_000,
                fee: 30_000_000,
                expected: Some(vec![500_000_000]),
            },
            Test {
                name: "insertion order accumulates the small outputs first",
                strategy: SelectionStrategy::InsertionOrder,
                available: vec![10_000_000, 10_000_000, 500_000_000],
                amount: 100_000,
                fee: 30_000,
                expected: Some(vec![10_000_000]),
            },
            Test {
                name: "sweep spends everything",
                strategy: SelectionStrategy::SweepAll,
                available: vec![10_000_000, 10_000_000, 500_000_000],
                amount: 100_000,
                fee: 30_000,
                expected: Some(vec![10_000_000, 10_000_000, 500_000_000]),
            },
            Test {
                name: "exact cover",
                strategy: SelectionStrategy::InsertionOrder,
                available: vec![60, 40, 100],
                amount: 90,
                fee: 10,
                expected: Some(vec![60, 40]),
            },
            Test {
                name: "insufficient",
                strategy: SelectionStrategy::LargestFirst,
                available: vec![60, 40],
                amount: 90,
                fee: 11,
                expected: None,
            },
            Test { name: "nothing available", strategy: SelectionStrategy::SweepAll, available: vec![], amount: 1, fee: 0, expected: None },
        ];

        for test in tests {
            let result = select(test.strategy, entries(&test.available), test.amount, |_| test.fee);
            match (result, test.expected) {
                (Ok(selection), Some(expected)) => {
                    assert_eq!(amounts(&selection), expected, "{}: unexpected selection", test.name);
                    assert_eq!(selection.aggregate_input_value, expected.iter().sum::<u64>(), "{}", test.name);
                }
                (Err(Error::InsufficientFunds { required, available }), None) => {
                    assert_eq!(required, test.amount + test.fee, "{}", test.name);
                    assert_eq!(available, test.available.iter().sum::<u64>(), "{}", test.name);
                }
                (result, expected) => panic!("{}: expected {:?}, got {:?}", test.name, expected, result.map(|s| amounts(&s))),
            }
        }
    }

    #[test]
    fn test_select_with_input_dependent_fee() {
        // every input adds 1_000 to the fee
        let selection = select(SelectionStrategy::InsertionOrder, entries(&[5_000, 5_000, 5_000]), 8_000, |selected| {
            1_000 * selected.len() as u64
        })
        .unwrap();
        assert_eq!(amounts(&selection), vec![5_000, 5_000]);
        assert_eq!(selection.change(8_000, 2_000), 0);

        let selection =
            select(SelectionStrategy::InsertionOrder, entries(&[5_000, 5_000, 5_000]), 9_000, |selected| 1_000 * selected.len() as u64)
                .unwrap();
        assert_eq!(amounts(&selection), vec![5_000, 5_000, 5_000]);
        assert_eq!(selection.change(9_000, 3_000), 3_000);
    }
}
