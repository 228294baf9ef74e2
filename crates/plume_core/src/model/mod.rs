//! Domain model for accounts and the content they own.
//!
//! # Responsibility
//! - Define canonical records used by repositories and services.
//! - Keep per-record predicates pure and storage-free.
//!
//! # Invariants
//! - Every record is identified by a stable UUID assigned at creation.
//! - Every content item references exactly one owning account.

pub mod account;
pub mod content;
pub mod validation;
