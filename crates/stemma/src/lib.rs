#![forbid(unsafe_code)]

//! `stemma` is a headless family-tree engine.
//!
//! Given an immutable snapshot of person records plus declared root ancestors, it computes:
//! - which persons are visible (descendant closure of the roots plus discovered spouses),
//! - an integer tier per person (parents above children, spouses sharing their partner's
//!   tier), and
//! - an overlap-free horizontal coordinate per person.
//!
//! Everything is recomputed per invocation and nothing is cached; re-invoke on a fresh
//! snapshot after any write. Request routing, storage, and the actual drawing of boxes and
//! lines live outside this workspace.

pub use stemma_core::*;

pub mod layout {
    pub use stemma_layout::{LayoutConfig, NodePosition, Unit, layout};
}

use indexmap::IndexMap;
use serde::Serialize;
use stemma_layout::{LayoutConfig, NodePosition};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Solve(#[from] stemma_core::Error),
    #[error(transparent)]
    Layout(#[from] stemma_layout::Error),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Full output of one solve: the visible ids with their generation labels, plus a tier and
/// x coordinate per person. Map orders are deterministic for identical input.
#[derive(Debug, Clone, Serialize)]
pub struct FamilyLayout {
    pub generations: IndexMap<PersonId, GenerationLabel>,
    pub positions: IndexMap<PersonId, NodePosition>,
}

impl FamilyLayout {
    pub fn is_visible(&self, id: PersonId) -> bool {
        self.generations.contains_key(&id)
    }
}

/// Runs the whole pipeline: index the snapshot, walk outward from the declared roots, assign
/// tiers, and lay the visible set out as a diagram.
pub fn layout_family(
    persons: &[Person],
    roots: &[RootAssertion],
    config: &LayoutConfig,
    options: SolveOptions,
) -> EngineResult<FamilyLayout> {
    let index = PersonIndex::build(persons)?;
    let seeds: Vec<PersonId> = roots.iter().flat_map(|r| r.root_ids()).collect();
    let visible = visible_set(&index, seeds, options)?;
    let generations = generation::assign(&index, &visible);
    let positions = stemma_layout::layout(&index, &generations, config)?;
    tracing::debug!(
        snapshot = persons.len(),
        visible = generations.len(),
        "family pipeline complete"
    );
    Ok(FamilyLayout {
        generations,
        positions,
    })
}

/// The generation-labeled id map for one person's descendants, as served by the HTTP-style
/// wrapper (`"3"` = blood descendant three tiers below the requested person, `"3.1"` = a
/// co-tier spouse).
pub fn descendants(
    persons: &[Person],
    root_id: PersonId,
    options: SolveOptions,
) -> EngineResult<IndexMap<PersonId, String>> {
    let index = PersonIndex::build(persons)?;
    let labels = descendant_generations(&index, root_id, options)?;
    Ok(labels
        .into_iter()
        .map(|(id, label)| (id, label.to_string()))
        .collect())
}

/// The family ids whose declared roots sit above a person, via the upward ancestor closure.
pub fn families_of(
    persons: &[Person],
    person_id: PersonId,
    roots: &[RootAssertion],
) -> EngineResult<Vec<String>> {
    let index = PersonIndex::build(persons)?;
    Ok(owning_families(&index, person_id, roots)?)
}
