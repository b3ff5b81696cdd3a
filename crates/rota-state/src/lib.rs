//! rota-state — embedded roster store for rota.
//!
//! Backed by [redb](https://docs.rs/redb), provides persistent and in-memory
//! storage for hearings, agents, and campaigns.
//!
//! # Architecture
//!
//! All domain types are JSON-serialized into redb's `&[u8]` value columns.
//! Keys are zero-padded decimal ids, so redb's byte-ordered iteration yields
//! records in ascending id order — the hearing ordering the assignment
//! engine depends on.
//!
//! The `RosterStore` is `Clone` + `Send` + `Sync` (backed by `Arc<Database>`).

pub mod error;
pub mod store;
pub mod tables;
pub mod types;

pub use error::{StateError, StateResult};
pub use store::RosterStore;
pub use types::*;
