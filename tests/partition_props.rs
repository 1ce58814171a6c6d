//! Property tests for the combination partition engine.
//!
//! The engine is compared against a brute force over every set partition
//! of the input (restricted growth strings), which is slow but obviously
//! correct for small inputs.

use casino_engine::cards::{standard_deck, Card};
use casino_engine::rules::{partition, partition_exists};
use proptest::prelude::*;

/// Try every assignment of cards to groups; true if one has every group
/// summing to `target`.
fn brute_force(values: &[u8], target: u8) -> bool {
    fn assign(values: &[u8], target: u8, index: usize, sums: &mut Vec<u32>) -> bool {
        if index == values.len() {
            return sums.iter().all(|&s| s == u32::from(target));
        }
        let value = u32::from(values[index]);
        for g in 0..sums.len() {
            if sums[g] + value <= u32::from(target) {
                sums[g] += value;
                if assign(values, target, index + 1, sums) {
                    return true;
                }
                sums[g] -= value;
            }
        }
        sums.push(value);
        let found = assign(values, target, index + 1, sums);
        sums.pop();
        found
    }

    if target == 0 || target > 10 {
        return values.is_empty();
    }
    assign(values, target, 0, &mut Vec::new())
}

fn hand_of_cards() -> impl Strategy<Value = Vec<Card>> {
    proptest::sample::subsequence(standard_deck(), 0..=9).prop_shuffle()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Property: the engine finds a partition exactly when one exists.
    #[test]
    fn prop_partition_is_exhaustive(cards in hand_of_cards(), target in 1u8..=10) {
        let values: Vec<u8> = cards.iter().map(|c| c.value()).collect();
        prop_assert_eq!(
            partition_exists(&cards, target),
            brute_force(&values, target),
            "cards {:?} target {}", cards, target
        );
    }

    /// Property: a successful partition covers every card exactly once and
    /// every group sums to the target; a failed one reports everything as
    /// uncovered.
    #[test]
    fn prop_partition_groups_are_valid(cards in hand_of_cards(), target in 1u8..=10) {
        let result = partition(&cards, target);

        if result.is_covered() {
            let mut grouped: Vec<Card> = result.combos.iter().flatten().copied().collect();
            let mut expected = cards.clone();
            grouped.sort();
            expected.sort();
            prop_assert_eq!(grouped, expected);
            for combo in &result.combos {
                prop_assert!(!combo.is_empty());
                prop_assert_eq!(combo.iter().map(|c| c.value()).sum::<u8>(), target);
            }
        } else {
            prop_assert!(result.combos.is_empty());
            prop_assert_eq!(result.uncovered, cards);
        }
    }

    /// Property: the same input always yields the same grouping.
    #[test]
    fn prop_partition_is_deterministic(cards in hand_of_cards(), target in 1u8..=10) {
        prop_assert_eq!(partition(&cards, target), partition(&cards, target));
    }
}

#[test]
fn test_brute_force_sanity() {
    assert!(brute_force(&[4, 6], 10));
    assert!(brute_force(&[], 7));
    assert!(!brute_force(&[5, 5, 2], 6));
    assert!(brute_force(&[1, 2, 3, 4, 5, 6, 9], 10));
}
