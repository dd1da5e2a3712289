use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Duplicate record id: {0}")]
    DuplicateRecordId(Uuid),
}
