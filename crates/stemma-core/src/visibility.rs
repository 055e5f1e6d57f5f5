//! Breadth-first visibility closure and ancestor closure.
//!
//! Both traversals are iterative work-lists with an explicit visited set: each id is admitted
//! at most once, so they terminate on any finite snapshot, including ones with relationship
//! cycles from data-entry errors. Cycles are tolerated silently; genealogical data is
//! frequently imperfect and a malformed edge must never abort a solve. Dangling edges are
//! simply not followed.

use crate::error::{Error, Result};
use crate::index::PersonIndex;
use crate::model::{GenerationLabel, PersonId, RootAssertion};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Ids included by a visibility pass. Recomputed fully on each call.
pub type VisibleSet = FxHashSet<PersonId>;

#[derive(Debug, Clone, Copy, Default)]
pub struct SolveOptions {
    /// Optional ceiling on admitted persons. Exceeding it yields [`Error::Oversize`] instead
    /// of partial output, letting the caller narrow the root and retry.
    pub max_visited: Option<usize>,
}

/// Computes the closure of everyone visible from `seeds`: every seed, every transitive
/// descendant of a seed via father/mother edges, and every spouse of anyone included.
///
/// Seeds referencing ids absent from the snapshot are skipped, matching the traversal rule
/// for dangling edges.
pub fn visible_set(
    index: &PersonIndex<'_>,
    seeds: impl IntoIterator<Item = PersonId>,
    options: SolveOptions,
) -> Result<VisibleSet> {
    let mut visited: VisibleSet = FxHashSet::default();
    let mut frontier: VecDeque<PersonId> = VecDeque::new();

    for seed in seeds {
        if index.contains(seed) {
            admit(seed, &mut visited, &mut frontier, options)?;
        }
    }

    while let Some(id) = frontier.pop_front() {
        for spouse in index.spouses_of(id) {
            admit(spouse.id, &mut visited, &mut frontier, options)?;
        }
        for child in index.children_of(id) {
            admit(child.id, &mut visited, &mut frontier, options)?;
            for spouse in index.spouses_of(child.id) {
                admit(spouse.id, &mut visited, &mut frontier, options)?;
            }
        }
    }

    tracing::debug!(visible = visited.len(), "visibility closure complete");
    Ok(visited)
}

fn admit(
    id: PersonId,
    visited: &mut VisibleSet,
    frontier: &mut VecDeque<PersonId>,
    options: SolveOptions,
) -> Result<()> {
    if !visited.insert(id) {
        return Ok(());
    }
    if let Some(limit) = options.max_visited {
        if visited.len() > limit {
            return Err(Error::Oversize { limit });
        }
    }
    frontier.push_back(id);
    Ok(())
}

/// Walks upward from a person (and their spouses) to the oldest known ancestors, then
/// intersects the collected ids against the root assertions to find the owning family ids.
///
/// Output order follows `roots`; a family appears at most once.
pub fn owning_families(
    index: &PersonIndex<'_>,
    person_id: PersonId,
    roots: &[RootAssertion],
) -> Result<Vec<String>> {
    let person = index.get(person_id)?;

    let mut visited: FxHashSet<PersonId> = FxHashSet::default();
    let mut frontier: VecDeque<PersonId> = VecDeque::new();

    visited.insert(person.id);
    frontier.push_back(person.id);
    for spouse in index.spouses_of(person.id) {
        if visited.insert(spouse.id) {
            frontier.push_back(spouse.id);
        }
    }

    while let Some(id) = frontier.pop_front() {
        let Some(p) = index.lookup(id) else {
            continue;
        };
        for parent in p.parent_ids() {
            if !index.contains(parent) {
                continue;
            }
            if visited.insert(parent) {
                frontier.push_back(parent);
            }
        }
    }

    let mut families: Vec<String> = Vec::new();
    for root in roots {
        if root.root_ids().any(|id| visited.contains(&id))
            && !families.iter().any(|f| f == &root.family_id)
        {
            families.push(root.family_id.clone());
        }
    }
    Ok(families)
}

/// The filtered-descendants payload: visibility closure seeded at one person, with tiers
/// assigned relative to that person (the seed owns tier 0).
///
/// This is the id -> generation-label mapping the HTTP wrapper serves and the client
/// renderer consumes.
pub fn descendant_generations(
    index: &PersonIndex<'_>,
    root_id: PersonId,
    options: SolveOptions,
) -> Result<IndexMap<PersonId, GenerationLabel>> {
    let root = index.get(root_id)?;
    let visible = visible_set(index, [root.id], options)?;
    Ok(crate::generation::assign_relative(index, &visible, root.id))
}
