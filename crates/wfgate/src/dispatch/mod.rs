//! Request normalization and collaborator dispatch.
//!
//! Inbound payloads are coerced to a single structured representation, then
//! handed to an external collaborator. Collaborator failures come back as
//! plain `Result`s; the HTTP layer owns the status mapping.

mod collaborator;
mod normalize;

pub use collaborator::{Collaborator, LogCollaborator};
pub use normalize::{normalize, InputError, NormalizedRequest};
