//! redb table definitions for the rota roster store.
//!
//! Each table uses `&str` keys and `&[u8]` values (JSON-serialized domain
//! types). Keys are zero-padded decimal ids so that byte-ordered iteration
//! is ascending id order.

use redb::TableDefinition;

/// Hearings keyed by `{hearing_id:010}`.
pub const HEARINGS: TableDefinition<&str, &[u8]> = TableDefinition::new("hearings");

/// Agents keyed by `{agent_id:010}`.
pub const AGENTS: TableDefinition<&str, &[u8]> = TableDefinition::new("agents");

/// Campaigns keyed by `{campaign_id:010}`.
pub const CAMPAIGNS: TableDefinition<&str, &[u8]> = TableDefinition::new("campaigns");
