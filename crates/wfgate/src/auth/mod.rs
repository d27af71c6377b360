//! Bearer-token authentication.
//!
//! Tokens are stateless signed JWTs: validity is determined purely by
//! signature, expiry, and whether the subject still resolves in the
//! credential store. Nothing is persisted server-side.

mod claims;
mod codec;
mod error;
mod middleware;

pub use claims::Claims;
pub use codec::TokenCodec;
pub use error::AuthError;
pub use middleware::{auth_middleware, bearer_token_from_header, AuthState, CurrentUser};
