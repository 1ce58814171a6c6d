//! Combination partition engine.
//!
//! Decides whether a set of cards can be split into disjoint groups that
//! each sum to a target value, using **every** card. This backs multi-card
//! captures, base builds, reinforcements and stack merges.
//!
//! ## Algorithm
//!
//! 1. Reject early when the total is not a multiple of the target.
//! 2. Enumerate every subset summing to the target (depth-first over card
//!    indices, pruning once the running sum exceeds it). Subsets are
//!    bitmasks over the input positions.
//! 3. Exact-cover backtracking: always branch on the lowest uncovered card,
//!    trying the subsets that contain it largest first.
//!
//! The result depends only on the input order, so repeated calls return the
//! same grouping.

use smallvec::SmallVec;

use crate::cards::Card;

/// Highest value a group may sum to.
pub const MAX_GROUP_VALUE: u8 = 10;

/// One group of cards summing to the target.
pub type Combo = SmallVec<[Card; 4]>;

/// Outcome of a partition search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partition {
    /// Groups, each summing to the target. Empty on failure.
    pub combos: Vec<Combo>,
    /// Cards not covered. Empty on success; the whole input on failure.
    pub uncovered: Vec<Card>,
}

impl Partition {
    /// Every card belongs to some group.
    #[must_use]
    pub fn is_covered(&self) -> bool {
        self.uncovered.is_empty()
    }

    /// The cards form a single group.
    #[must_use]
    pub fn is_single(&self) -> bool {
        self.is_covered() && self.combos.len() == 1
    }
}

/// Check whether `cards` split exactly into groups summing to `target`.
///
/// ```
/// use casino_engine::cards::Card;
/// use casino_engine::rules::partition_exists;
///
/// let cards: Vec<Card> = ["9S", "AD", "4H", "6C"].iter().map(|c| c.parse().unwrap()).collect();
/// assert!(partition_exists(&cards, 10));
/// assert!(!partition_exists(&cards[..3], 10));
/// ```
#[must_use]
pub fn partition_exists(cards: &[Card], target: u8) -> bool {
    search(cards, target).is_some()
}

/// Find a full partition of `cards` into groups summing to `target`.
#[must_use]
pub fn partition(cards: &[Card], target: u8) -> Partition {
    match search(cards, target) {
        Some(masks) => Partition {
            combos: masks
                .into_iter()
                .map(|mask| {
                    cards
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| mask & (1u64 << i) != 0)
                        .map(|(_, c)| *c)
                        .collect()
                })
                .collect(),
            uncovered: Vec::new(),
        },
        None => Partition {
            combos: Vec::new(),
            uncovered: cards.to_vec(),
        },
    }
}

/// Exact-cover search. Returns the chosen subset masks in selection order.
fn search(cards: &[Card], target: u8) -> Option<Vec<u64>> {
    if cards.is_empty() {
        return Some(Vec::new());
    }
    if target == 0 || target > MAX_GROUP_VALUE || cards.len() > 64 {
        return None;
    }

    let total: u32 = cards.iter().map(|c| u32::from(c.value())).sum();
    if total % u32::from(target) != 0 {
        return None;
    }

    let values: Vec<u8> = cards.iter().map(|c| c.value()).collect();
    let mut subsets = Vec::new();
    enumerate_subsets(&values, target, 0, 0, 0, &mut subsets);
    // Stable: equal sizes keep enumeration order.
    subsets.sort_by_key(|mask: &u64| std::cmp::Reverse(mask.count_ones()));

    let full = if cards.len() == 64 { u64::MAX } else { (1u64 << cards.len()) - 1 };
    let mut chosen = Vec::new();
    if cover(&subsets, full, 0, &mut chosen) {
        Some(chosen)
    } else {
        None
    }
}

fn enumerate_subsets(
    values: &[u8],
    target: u8,
    start: usize,
    mask: u64,
    sum: u8,
    out: &mut Vec<u64>,
) {
    for i in start..values.len() {
        let next = sum + values[i];
        if next > target {
            continue;
        }
        let next_mask = mask | (1u64 << i);
        if next == target {
            out.push(next_mask);
        } else {
            enumerate_subsets(values, target, i + 1, next_mask, next, out);
        }
    }
}

fn cover(subsets: &[u64], full: u64, used: u64, chosen: &mut Vec<u64>) -> bool {
    if used == full {
        return true;
    }
    let pivot = (!used & full).trailing_zeros();
    let pivot_bit = 1u64 << pivot;

    for &subset in subsets {
        if subset & pivot_bit == 0 || subset & used != 0 {
            continue;
        }
        chosen.push(subset);
        if cover(subsets, full, used | subset, chosen) {
            return true;
        }
        chosen.pop();
    }
    false
}
