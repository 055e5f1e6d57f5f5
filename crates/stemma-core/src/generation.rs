//! Tier (generation) assignment over a visible working set.
//!
//! Breadth-first propagation: `tier(child) = tier(parent) + 1` across every parent edge, and a
//! spouse with no blood-parent edge inherits the partner's tier. The first discovered tier
//! wins; there is no rebalancing pass. Blood descendants own the integer tier, married-in
//! spouses carry the sub-rank flag used only for left/right tie-breaking during layout.

use crate::index::PersonIndex;
use crate::model::{GenerationLabel, Person, PersonId};
use crate::visibility::VisibleSet;
use indexmap::IndexMap;
use std::collections::VecDeque;

/// Assigns a generation label to every member of `visible`.
///
/// Seeds are the members with no recorded parent inside the working set whose spouse (if any,
/// inside the working set) also has none; they own tier 0. Members unreachable from any seed
/// (parent cycles from data-entry errors, orphaned spouse chains) are re-seeded at tier 0 in
/// snapshot order, so every visible person receives a label and the pass terminates on any
/// finite input.
pub fn assign(index: &PersonIndex<'_>, visible: &VisibleSet) -> IndexMap<PersonId, GenerationLabel> {
    let mut tiers: IndexMap<PersonId, GenerationLabel> = IndexMap::new();
    let mut frontier: VecDeque<PersonId> = VecDeque::new();

    for p in members(index, visible) {
        if has_working_parent(index, visible, p) {
            continue;
        }
        let spouse_has_parent = index
            .spouses_of(p.id)
            .filter(|s| visible.contains(&s.id))
            .any(|s| has_working_parent(index, visible, s));
        if spouse_has_parent {
            continue;
        }
        tiers.insert(p.id, GenerationLabel::blood(0));
        frontier.push_back(p.id);
    }

    propagate(index, visible, &mut tiers, &mut frontier);
    seed_stragglers(index, visible, &mut tiers);
    tiers
}

/// Assigns labels relative to a single person: the seed owns tier 0 and every descendant
/// tier counts down from it. Used for the filtered-descendants view.
pub fn assign_relative(
    index: &PersonIndex<'_>,
    visible: &VisibleSet,
    root: PersonId,
) -> IndexMap<PersonId, GenerationLabel> {
    let mut tiers: IndexMap<PersonId, GenerationLabel> = IndexMap::new();
    let mut frontier: VecDeque<PersonId> = VecDeque::new();

    if visible.contains(&root) {
        tiers.insert(root, GenerationLabel::blood(0));
        frontier.push_back(root);
    }

    propagate(index, visible, &mut tiers, &mut frontier);
    seed_stragglers(index, visible, &mut tiers);
    tiers
}

fn propagate(
    index: &PersonIndex<'_>,
    visible: &VisibleSet,
    tiers: &mut IndexMap<PersonId, GenerationLabel>,
    frontier: &mut VecDeque<PersonId>,
) {
    while let Some(id) = frontier.pop_front() {
        let tier = tiers[&id].tier;

        for spouse in index.spouses_of(id) {
            if !visible.contains(&spouse.id) || tiers.contains_key(&spouse.id) {
                continue;
            }
            // A spouse with their own blood-parent edge gets their tier from that edge
            // instead of inheriting the partner's.
            if has_working_parent(index, visible, spouse) {
                continue;
            }
            tiers.insert(spouse.id, GenerationLabel::spouse(tier));
            frontier.push_back(spouse.id);
        }

        for child in index.children_of(id) {
            if !visible.contains(&child.id) || tiers.contains_key(&child.id) {
                continue;
            }
            tiers.insert(child.id, GenerationLabel::blood(tier + 1));
            frontier.push_back(child.id);
        }
    }
}

/// Re-seeds members the main propagation could not reach. A two-person parent cycle, for
/// example, leaves both members with a recorded parent, so neither qualifies as a seed.
fn seed_stragglers(
    index: &PersonIndex<'_>,
    visible: &VisibleSet,
    tiers: &mut IndexMap<PersonId, GenerationLabel>,
) {
    loop {
        let Some(next) = members(index, visible).find(|p| !tiers.contains_key(&p.id)) else {
            return;
        };
        tracing::trace!(id = %next.id, "re-seeding unreachable member at tier 0");
        let mut frontier: VecDeque<PersonId> = VecDeque::new();
        tiers.insert(next.id, GenerationLabel::blood(0));
        frontier.push_back(next.id);
        propagate(index, visible, tiers, &mut frontier);
    }
}

fn members<'a, 'i>(
    index: &'i PersonIndex<'a>,
    visible: &'i VisibleSet,
) -> impl Iterator<Item = &'a Person> + 'i
where
    'a: 'i,
{
    index.persons().iter().filter(|p| visible.contains(&p.id))
}

fn has_working_parent(index: &PersonIndex<'_>, visible: &VisibleSet, p: &Person) -> bool {
    p.parent_ids()
        .any(|parent| visible.contains(&parent) && index.contains(parent))
}
