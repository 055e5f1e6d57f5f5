//! Id-keyed lookup plus reverse relationship indexes over a record snapshot.
//!
//! The index borrows the snapshot and never copies or mutates records. Building it up front
//! turns the per-hop full scans of the naive traversal into O(1) lookups, making the whole
//! visibility closure O(n).

use crate::error::{Error, Result};
use crate::model::{Person, PersonId};
use rustc_hash::FxHashMap;

#[derive(Debug)]
pub struct PersonIndex<'a> {
    persons: &'a [Person],
    by_id: FxHashMap<PersonId, usize>,
    /// parent id -> indexes of persons whose father_id or mother_id is that parent.
    children: FxHashMap<PersonId, Vec<usize>>,
    /// person id -> indexes of persons in the (symmetric) spouse relation with that person.
    spouses: FxHashMap<PersonId, Vec<usize>>,
}

impl<'a> PersonIndex<'a> {
    /// Builds the index. A duplicate id in the snapshot is fatal: every downstream pass
    /// assumes ids are unique keys.
    pub fn build(persons: &'a [Person]) -> Result<Self> {
        let mut by_id: FxHashMap<PersonId, usize> =
            FxHashMap::with_capacity_and_hasher(persons.len(), Default::default());
        for (i, p) in persons.iter().enumerate() {
            if by_id.insert(p.id, i).is_some() {
                return Err(Error::DuplicatePerson { id: p.id });
            }
        }

        let mut children: FxHashMap<PersonId, Vec<usize>> = FxHashMap::default();
        let mut spouses: FxHashMap<PersonId, Vec<usize>> = FxHashMap::default();

        for (i, p) in persons.iter().enumerate() {
            for parent in p.parent_ids() {
                children.entry(parent).or_default().push(i);
            }

            // Spouse edges are recorded one-way and are frequently unreciprocated. Index the
            // symmetric closure: A -> B makes B a spouse of A and A a spouse of B.
            if let Some(spouse) = p.spouse_id {
                spouses.entry(spouse).or_default().push(i);
                if let Some(&j) = by_id.get(&spouse) {
                    spouses.entry(p.id).or_default().push(j);
                }
            }
        }

        for list in spouses.values_mut() {
            list.sort_unstable();
            list.dedup();
        }

        Ok(Self {
            persons,
            by_id,
            children,
            spouses,
        })
    }

    pub fn persons(&self) -> &'a [Person] {
        self.persons
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn get(&self, id: PersonId) -> Result<&'a Person> {
        self.lookup(id).ok_or(Error::PersonNotFound { id })
    }

    /// Like [`PersonIndex::get`] but for traversal contexts, where a dangling edge is simply
    /// not followed rather than surfaced as an error.
    pub fn lookup(&self, id: PersonId) -> Option<&'a Person> {
        self.by_id.get(&id).map(|&i| &self.persons[i])
    }

    /// Persons whose father_id or mother_id equals `id`, in snapshot order.
    pub fn children_of(&self, id: PersonId) -> impl Iterator<Item = &'a Person> + '_ {
        self.children
            .get(&id)
            .into_iter()
            .flatten()
            .map(|&i| &self.persons[i])
    }

    /// Persons in the spouse relation with `id`, resolved bidirectionally.
    pub fn spouses_of(&self, id: PersonId) -> impl Iterator<Item = &'a Person> + '_ {
        self.spouses
            .get(&id)
            .into_iter()
            .flatten()
            .map(|&i| &self.persons[i])
    }
}
