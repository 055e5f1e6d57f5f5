//! Pass 1: canonical top-down ordering.
//!
//! Produces a left-to-right order per tier that is independent of coordinate assignment, so
//! the whole layout is repeatable for identical input. The earliest tier is ordered by id;
//! each later tier's blood members are ordered by the minimum order-index of either recorded
//! parent, with same-parent siblings falling back to id order. Married-in spouses do not get
//! ordered on their own: they inherit their partner's order-index and ride along in the
//! partner's unit during placement.

use rustc_hash::FxHashMap;
use stemma_core::{GenerationLabel, PersonId, PersonIndex};
use std::collections::BTreeMap;

/// Canonical per-tier order, ascending by tier.
#[derive(Debug, Clone, Default)]
pub struct TierOrder {
    /// `(tier, blood members in canonical order)`.
    pub tiers: Vec<(i32, Vec<PersonId>)>,
    /// All members of each tier (blood and married-in), sorted by id.
    pub members: BTreeMap<i32, Vec<PersonId>>,
}

pub fn canonical_order(
    index: &PersonIndex<'_>,
    labels: &FxHashMap<PersonId, GenerationLabel>,
) -> TierOrder {
    let mut members: BTreeMap<i32, Vec<PersonId>> = BTreeMap::new();
    for (&id, label) in labels {
        members.entry(label.tier).or_default().push(id);
    }
    for list in members.values_mut() {
        list.sort_unstable();
    }

    // Global order-index across tiers; parents are always on an earlier tier once tiers have
    // been clamped, so each tier only reads indexes written by previous iterations.
    let mut order_index: FxHashMap<PersonId, usize> = FxHashMap::default();
    let mut tiers: Vec<(i32, Vec<PersonId>)> = Vec::with_capacity(members.len());

    for (i, (&tier, tier_members)) in members.iter().enumerate() {
        let mut blood: Vec<PersonId> = tier_members
            .iter()
            .copied()
            .filter(|id| !labels[id].married_in)
            .collect();

        // The earliest tier stays in id order (the membership list is already sorted).
        if i > 0 {
            blood.sort_by_key(|&id| (parent_order(index, &order_index, id), id));
        }

        for (pos, &id) in blood.iter().enumerate() {
            order_index.insert(id, pos);
            // A married-in parent has to be comparable too when a grandchild records only
            // that side; give spouses their partner's index.
            for spouse in index.spouses_of(id) {
                if labels
                    .get(&spouse.id)
                    .is_some_and(|l| l.married_in && l.tier == tier)
                {
                    order_index.entry(spouse.id).or_insert(pos);
                }
            }
        }

        tiers.push((tier, blood));
    }

    TierOrder { tiers, members }
}

fn parent_order(
    index: &PersonIndex<'_>,
    order_index: &FxHashMap<PersonId, usize>,
    id: PersonId,
) -> usize {
    let Some(person) = index.lookup(id) else {
        return usize::MAX;
    };
    person
        .parent_ids()
        .filter_map(|parent| order_index.get(&parent).copied())
        .min()
        .unwrap_or(usize::MAX)
}
