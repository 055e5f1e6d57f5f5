//! Pass 2: bottom-up coordinate assignment.
//!
//! The deepest tier is packed left-to-right in canonical order. Each shallower tier centers
//! its units over their already-placed children, defers units with no positioned children,
//! interpolates the deferred ones between their nearest positioned siblings, and then places
//! everything in canonical order with a cascading push-right so bounding boxes never overlap.
//! Afterwards childless spouses are snapped flush beside their partner and the whole diagram
//! is shifted so the minimum x is 0.

use crate::config::LayoutConfig;
use crate::unit::Unit;
use rustc_hash::FxHashMap;
use stemma_core::{GenerationLabel, PersonId, PersonIndex};

/// Assigns a left-edge x to every person in `tiers` (ascending tier order expected).
pub fn place(
    index: &PersonIndex<'_>,
    labels: &FxHashMap<PersonId, GenerationLabel>,
    config: &LayoutConfig,
    tiers: &[(i32, Vec<Unit>)],
) -> FxHashMap<PersonId, f64> {
    let mut xs: FxHashMap<PersonId, f64> = FxHashMap::default();
    let mut snap_candidates: Vec<PersonId> = Vec::new();

    for (depth, (_, units)) in tiers.iter().enumerate().rev() {
        let deepest = depth == tiers.len() - 1;

        if deepest {
            let mut cursor = 0.0_f64;
            for unit in units {
                place_unit(unit, cursor, config, &mut xs);
                cursor += unit.width(config) + config.horizontal_gap;
            }
        } else {
            let ideals: Vec<Option<f64>> = units
                .iter()
                .map(|unit| ideal_x(index, unit, config, &xs))
                .collect();

            let mut cursor = f64::NEG_INFINITY;
            for (i, unit) in units.iter().enumerate() {
                let ideal = match ideals[i] {
                    Some(x) => x,
                    None => interpolate(units, &ideals, i, config),
                };
                let x = ideal.max(cursor);
                place_unit(unit, x, config, &mut xs);
                cursor = x + unit.width(config) + config.horizontal_gap;
            }
        }

        for unit in units {
            if unit.members.len() == 1 && labels[&unit.members[0]].married_in {
                snap_candidates.push(unit.members[0]);
            }
        }
    }

    snap_childless_spouses(index, labels, config, &snap_candidates, &mut xs);
    normalize_left_edge(&mut xs);
    xs
}

fn place_unit(unit: &Unit, x: f64, config: &LayoutConfig, xs: &mut FxHashMap<PersonId, f64>) {
    for (k, &member) in unit.members.iter().enumerate() {
        xs.insert(
            member,
            x + k as f64 * (config.node_width + config.spouse_gap),
        );
    }
}

/// Ideal left edge of a unit: centered over the midpoint of its children's placed centers.
/// `None` when no child of any member has a position yet.
fn ideal_x(
    index: &PersonIndex<'_>,
    unit: &Unit,
    config: &LayoutConfig,
    xs: &FxHashMap<PersonId, f64>,
) -> Option<f64> {
    let mut min_center = f64::INFINITY;
    let mut max_center = f64::NEG_INFINITY;
    let mut found = false;

    for &member in &unit.members {
        for child in index.children_of(member) {
            let Some(&cx) = xs.get(&child.id) else {
                continue;
            };
            let center = cx + config.node_width / 2.0;
            min_center = min_center.min(center);
            max_center = max_center.max(center);
            found = true;
        }
    }

    if !found {
        return None;
    }
    Some((min_center + max_center) / 2.0 - unit.width(config) / 2.0)
}

/// A deferred unit sits between its nearest positioned siblings, adjacent to the single
/// neighbor when only one side has a position, and at zero with no neighbor at all.
fn interpolate(units: &[Unit], ideals: &[Option<f64>], i: usize, config: &LayoutConfig) -> f64 {
    let prev = (0..i).rev().find(|&j| ideals[j].is_some());
    let next = (i + 1..units.len()).find(|&j| ideals[j].is_some());
    let width = units[i].width(config);

    match (prev, next) {
        (Some(p), Some(n)) => {
            let prev_right = ideals[p].unwrap_or(0.0) + units[p].width(config);
            let next_left = ideals[n].unwrap_or(0.0);
            (prev_right + next_left) / 2.0 - width / 2.0
        }
        (Some(p), None) => {
            ideals[p].unwrap_or(0.0) + units[p].width(config) + config.horizontal_gap
        }
        (None, Some(n)) => ideals[n].unwrap_or(0.0) - width - config.horizontal_gap,
        (None, None) => 0.0,
    }
}

/// A married-in spouse that drifted away from their partner (separate unit) and has no
/// children of their own is pulled flush beside the partner.
fn snap_childless_spouses(
    index: &PersonIndex<'_>,
    labels: &FxHashMap<PersonId, GenerationLabel>,
    config: &LayoutConfig,
    candidates: &[PersonId],
    xs: &mut FxHashMap<PersonId, f64>,
) {
    for &id in candidates {
        let has_own_children = index
            .children_of(id)
            .any(|child| labels.contains_key(&child.id));
        if has_own_children {
            continue;
        }

        let tier = labels[&id].tier;
        let partner = index
            .spouses_of(id)
            .filter(|s| {
                labels
                    .get(&s.id)
                    .is_some_and(|l| !l.married_in && l.tier == tier)
                    && xs.contains_key(&s.id)
            })
            .map(|s| s.id)
            .min();

        if let Some(partner) = partner {
            let snapped = xs[&partner] + config.node_width + config.spouse_gap;
            xs.insert(id, snapped);
        }
    }
}

fn normalize_left_edge(xs: &mut FxHashMap<PersonId, f64>) {
    let min_x = xs.values().copied().fold(f64::INFINITY, f64::min);
    if !min_x.is_finite() || min_x == 0.0 {
        return;
    }
    for x in xs.values_mut() {
        *x -= min_x;
    }
}
