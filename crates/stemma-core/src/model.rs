//! Person records and derived generation labels.
//!
//! Records are an immutable snapshot handed over by the storage layer; nothing in this crate
//! mutates them. Relationship edges (`father_id`, `mother_id`, `spouse_id`) reference other
//! records by id and are not guaranteed to be consistent or reciprocated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable unique identifier of a person record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct PersonId(pub i64);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for PersonId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

/// One person record as delivered by the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub family_id: String,
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub father_id: Option<PersonId>,
    #[serde(default)]
    pub mother_id: Option<PersonId>,
    /// Single outgoing spouse edge. Not guaranteed to be mirrored by the referenced record;
    /// [`crate::PersonIndex::spouses_of`] resolves the relation bidirectionally.
    #[serde(default)]
    pub spouse_id: Option<PersonId>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub marriage_date: Option<NaiveDate>,
    #[serde(default)]
    pub death_date: Option<NaiveDate>,
}

impl Person {
    /// Recorded parent edges, missing ones skipped.
    pub fn parent_ids(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.father_id.into_iter().chain(self.mother_id)
    }

    pub fn has_recorded_parent(&self) -> bool {
        self.father_id.is_some() || self.mother_id.is_some()
    }
}

/// Declared top-of-pedigree ancestor pair for a family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootAssertion {
    pub family_id: String,
    #[serde(default)]
    pub father_id: Option<PersonId>,
    #[serde(default)]
    pub mother_id: Option<PersonId>,
}

impl RootAssertion {
    pub fn root_ids(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.father_id.into_iter().chain(self.mother_id)
    }
}

/// Vertical rank of a person in the diagram plus the married-in sub-rank.
///
/// `tier` is 0-based internally (0 = earliest known ancestors). The endpoint string form is
/// 1-based to match the payload the reference renderer consumes: `"3"` for a blood descendant
/// on the third row, `"3.1"` for a spouse sharing that row without a blood-parent edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationLabel {
    pub tier: i32,
    pub married_in: bool,
}

impl GenerationLabel {
    pub fn blood(tier: i32) -> Self {
        Self {
            tier,
            married_in: false,
        }
    }

    pub fn spouse(tier: i32) -> Self {
        Self {
            tier,
            married_in: true,
        }
    }
}

impl fmt::Display for GenerationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.married_in {
            write!(f, "{}.1", self.tier + 1)
        } else {
            write!(f, "{}", self.tier + 1)
        }
    }
}
