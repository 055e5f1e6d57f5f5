use crate::model::PersonId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source collection contains the same id twice. This is a data-integrity failure and
    /// aborts the solve; everything downstream assumes ids are unique.
    #[error("Duplicate person id in source collection: {id}")]
    DuplicatePerson { id: PersonId },

    #[error("Person not found: {id}")]
    PersonNotFound { id: PersonId },

    /// The caller-imposed visited-node ceiling was exceeded. Recoverable: narrow the root or
    /// raise the limit and re-invoke. No partial output is produced.
    #[error("Visibility traversal exceeded the configured ceiling of {limit} persons")]
    Oversize { limit: usize },
}
