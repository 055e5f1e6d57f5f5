//! Layout entrypoint: clamp tiers, order, group into units, assign coordinates.

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::unit::Unit;
use crate::{order, position, unit};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::Serialize;
use stemma_core::{GenerationLabel, PersonId, PersonIndex};

/// Placement of one person: integer tier plus left-edge x. The vertical coordinate derives
/// from the tier via [`LayoutConfig::row_y`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodePosition {
    pub tier: i32,
    pub x: f64,
}

/// Lays out every person in `generations`, producing an overlap-free x per person.
///
/// Tiers recorded inconsistently with a parent's tier are clamped to parent tier + 1 rather
/// than rejected; a fully disconnected person keeps tier 0 and still receives a coordinate.
/// Running twice on identical input yields identical output.
pub fn layout(
    index: &PersonIndex<'_>,
    generations: &IndexMap<PersonId, GenerationLabel>,
    config: &LayoutConfig,
) -> Result<IndexMap<PersonId, NodePosition>> {
    config.validate()?;
    if generations.is_empty() {
        return Ok(IndexMap::new());
    }

    let labels = clamp_tiers(index, generations);
    let order = order::canonical_order(index, &labels);

    let tiers: Vec<(i32, Vec<Unit>)> = order
        .tiers
        .iter()
        .map(|(tier, blood)| {
            let units = unit::build_units(index, &labels, *tier, blood, &order.members[tier]);
            (*tier, units)
        })
        .collect();

    let xs = position::place(index, &labels, config, &tiers);

    let mut out: IndexMap<PersonId, NodePosition> = IndexMap::with_capacity(labels.len());
    for (tier, units) in &tiers {
        for u in units {
            for &member in &u.members {
                let Some(&x) = xs.get(&member) else { continue };
                out.insert(member, NodePosition { tier: *tier, x });
            }
        }
    }

    tracing::debug!(persons = out.len(), tiers = tiers.len(), "layout complete");
    Ok(out)
}

/// Repairs tiers that disagree with a recorded parent's tier: the child is clamped to
/// parent tier + 1 and a married-in spouse re-inherits the partner's clamped tier.
///
/// A clamp can move a person that someone else already read (a married-in spouse whose
/// partner clamps later, a child whose recorded parent is married-in), so the sweep runs
/// to a fixpoint. The sweep count is capped, keeping malformed cycles bounded.
fn clamp_tiers(
    index: &PersonIndex<'_>,
    generations: &IndexMap<PersonId, GenerationLabel>,
) -> FxHashMap<PersonId, GenerationLabel> {
    let mut labels: FxHashMap<PersonId, GenerationLabel> =
        generations.iter().map(|(&id, &l)| (id, l)).collect();

    let ids: Vec<PersonId> = generations.keys().copied().collect();

    for _ in 0..=ids.len() {
        let mut changed = false;

        let mut pass: Vec<PersonId> = ids
            .iter()
            .copied()
            .filter(|id| !labels[id].married_in)
            .collect();
        pass.sort_unstable_by_key(|id| (labels[id].tier, *id));

        for id in pass {
            let Some(person) = index.lookup(id) else {
                continue;
            };
            let parent_tier = person
                .parent_ids()
                .filter_map(|parent| labels.get(&parent))
                .map(|l| l.tier)
                .max();
            if let Some(parent_tier) = parent_tier {
                if labels[&id].tier != parent_tier + 1 {
                    labels.insert(id, GenerationLabel::blood(parent_tier + 1));
                    changed = true;
                }
            }
        }

        // Married-in members re-inherit only after every blood clamp of the sweep has
        // landed; resolving them inline can read a partner's pre-clamp tier.
        for &id in &ids {
            let label = labels[&id];
            if !label.married_in {
                continue;
            }
            let partner_tier = index
                .spouses_of(id)
                .filter_map(|s| labels.get(&s.id))
                .filter(|l| !l.married_in)
                .map(|l| l.tier)
                .min();
            if let Some(tier) = partner_tier {
                if tier != label.tier {
                    labels.insert(id, GenerationLabel::spouse(tier));
                    changed = true;
                }
            }
        }

        if !changed {
            break;
        }
    }

    // Clamping can push a whole malformed cluster downward; shift back so the earliest
    // occupied tier is 0 again.
    let min_tier = labels.values().map(|l| l.tier).min().unwrap_or(0);
    if min_tier != 0 {
        for label in labels.values_mut() {
            label.tier -= min_tier;
        }
    }

    labels
}
