//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod tree;
pub mod validate;

pub use entities::{Gender, Person, PersonDraft, PersonId, PersonUpdate};
pub use error::{DomainError, DomainResult, ValidationError};
pub use tree::{FamilyTree, PersonDetails, TreeNode};
