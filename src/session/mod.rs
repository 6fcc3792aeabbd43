//! Session State
//!
//! The display identity persisted between runs and the cosmetic role
//! label derived from it.
//!
//! ## Note on roles
//!
//! [`RoleLabel`] is a presentation hint. Nothing in this crate consults it
//! before issuing a request; the analytics API decides what each identity
//! may see.

mod identity;
mod store;

pub use identity::{Identity, RoleLabel};
pub use store::{FileIdentityStore, IdentityStore, MemoryIdentityStore, IDENTITY_KEY};

use thiserror::Error;

/// Errors raised by identity stores
#[derive(Error, Debug)]
pub enum SessionError {
    /// Reading or writing the persisted identity failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The in-memory slot was poisoned by a panicking writer
    #[error("Lock error: {0}")]
    Lock(String),
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;
