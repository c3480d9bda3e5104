//! Client-side session core: reading token claims, persisting the session,
//! and the single decision point for "is this client signed in".

pub mod codec;
pub mod guard;
pub mod token_store;

pub use codec::{decode, is_expired};
pub use guard::{LogoutReason, SessionGuard};
pub use token_store::TokenStore;
