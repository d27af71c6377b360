//! Identity model and credential store.
//!
//! The gateway only ever reads credentials: handlers resolve a username to a
//! stored record and verify passwords against its bcrypt hash. The backing
//! storage is pluggable behind [`UserStore`]; the shipped implementation is
//! an in-memory table seeded from configuration.

mod model;
mod store;

pub use model::{hash_password, Identity, StoredUser};
pub use store::{InMemoryUserStore, UserStore};
