//! Unit grouping: the atomic placement primitive.
//!
//! A unit is one person (single) or a blood member plus the spouse(s) sharing their tier
//! (family), placed as one block. Units are transient; nothing here survives the layout call.

use crate::config::LayoutConfig;
use rustc_hash::{FxHashMap, FxHashSet};
use stemma_core::{GenerationLabel, PersonId, PersonIndex};

#[derive(Debug, Clone)]
pub struct Unit {
    pub tier: i32,
    /// Left-to-right: the anchor first, then co-tier spouses (blood before married-in,
    /// id order inside each class).
    pub members: Vec<PersonId>,
}

impl Unit {
    pub fn width(&self, config: &LayoutConfig) -> f64 {
        config.unit_width(self.members.len())
    }
}

/// Groups one tier into units following the canonical blood order. Married-in members whose
/// partner is missing from the tier (asymmetric data) fall back to single units appended in
/// id order, so no visible person is ever dropped.
pub fn build_units(
    index: &PersonIndex<'_>,
    labels: &FxHashMap<PersonId, GenerationLabel>,
    tier: i32,
    blood_order: &[PersonId],
    tier_members: &[PersonId],
) -> Vec<Unit> {
    let mut placed: FxHashSet<PersonId> = FxHashSet::default();
    let mut units: Vec<Unit> = Vec::new();

    for &anchor in blood_order {
        if !placed.insert(anchor) {
            continue;
        }
        let mut members = vec![anchor];
        // Any co-tier spouse joins the anchor's unit: a root couple is two blood members, a
        // marriage into the line is blood + married-in. Blood sits left, married-in right,
        // id order inside each class.
        let mut spouses: Vec<PersonId> = index
            .spouses_of(anchor)
            .map(|s| s.id)
            .filter(|id| {
                !placed.contains(id) && labels.get(id).is_some_and(|l| l.tier == tier)
            })
            .collect();
        spouses.sort_unstable_by_key(|id| (labels[id].married_in, *id));
        for spouse in spouses {
            placed.insert(spouse);
            members.push(spouse);
        }
        units.push(Unit { tier, members });
    }

    for &id in tier_members {
        if placed.insert(id) {
            units.push(Unit {
                tier,
                members: vec![id],
            });
        }
    }

    units
}
