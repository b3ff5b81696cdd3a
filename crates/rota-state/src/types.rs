//! Domain types for the rota roster store.
//!
//! These types represent the persisted state of hearings, agents, and
//! campaigns. All types are serializable to/from JSON for storage in redb
//! tables.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Unique identifier for a hearing.
pub type HearingId = u64;

/// Unique identifier for an agent.
pub type AgentId = u64;

/// Unique identifier for a campaign.
pub type CampaignId = u64;

// ── Hearing ────────────────────────────────────────────────────────

/// A single schedulable hearing occurrence within a campaign.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hearing {
    pub id: HearingId,
    /// Day the hearing takes place.
    pub date: NaiveDate,
    /// Wall-clock time slot (e.g. "09:30").
    pub time: String,
    /// Courtroom identifier.
    pub room: String,
    /// Case reference number.
    pub case_ref: String,
    /// Name of the party involved.
    pub party_name: String,
    /// Party document number.
    pub party_doc: String,
    /// Counsel representing the party.
    pub lawyer_name: String,
    /// Free-text subject of the hearing.
    pub subject: String,
    /// Court/division name (backfilled when the campaign's court changes).
    pub court: String,
    /// Hearing-type tag (e.g. "conciliation", "judgment").
    pub kind: String,
    /// Shift the hearing falls in.
    pub shift: Shift,
    /// Owning campaign.
    pub campaign_id: CampaignId,
    /// Assigned agent, if any. At most one agent at a time.
    pub agent_id: Option<AgentId>,
}

/// Shift of the day a hearing falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    Morning,
    Afternoon,
}

/// Grouping key for hearings: two hearings belong to the same group iff
/// their (date, room, shift) triples are equal by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub date: NaiveDate,
    pub room: String,
    pub shift: Shift,
}

impl Hearing {
    /// Build the key for the hearings table.
    pub fn table_key(&self) -> String {
        hearing_key(self.id)
    }

    /// The (date, room, shift) triple this hearing is grouped by.
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            date: self.date,
            room: self.room.clone(),
            shift: self.shift,
        }
    }

    /// Whether `other` belongs to the same group as `self`.
    pub fn same_group(&self, other: &Hearing) -> bool {
        self.date == other.date && self.room == other.room && self.shift == other.shift
    }
}

/// Zero-padded hearings table key. Padding keeps redb's byte-ordered
/// iteration equal to ascending id order.
pub fn hearing_key(id: HearingId) -> String {
    format!("{id:010}")
}

// ── Agent ──────────────────────────────────────────────────────────

/// A schedulable worker with a role, active status, and workload counters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub role: Role,
    pub status: AgentStatus,
    /// Count of hearings currently held.
    pub balance: i64,
    /// Fixed multiplier reflecting relative capacity.
    pub weight: i64,
    /// Always `balance * weight`; recomputed on every balance change and
    /// never written independently.
    pub weighted_balance: i64,
}

/// Role-group of an agent. The two roles are disjoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Attorney,
    Representative,
}

/// Whether an agent participates in scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Active,
    Inactive,
}

impl Agent {
    /// Create a new agent with an empty workload.
    pub fn new(id: AgentId, name: impl Into<String>, role: Role, weight: i64) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            status: AgentStatus::Active,
            balance: 0,
            weight,
            weighted_balance: 0,
        }
    }

    /// Build the key for the agents table.
    pub fn table_key(&self) -> String {
        agent_key(self.id)
    }

    /// Record one hearing assigned to this agent. The only path that
    /// increments `balance`; `weighted_balance` is recomputed in the same
    /// step.
    pub fn record_assignment(&mut self) {
        self.balance += 1;
        self.weighted_balance = self.balance * self.weight;
    }

    /// Record one hearing taken away from this agent. Symmetric to
    /// [`record_assignment`](Self::record_assignment).
    pub fn record_unassignment(&mut self) {
        self.balance -= 1;
        self.weighted_balance = self.balance * self.weight;
    }

    pub fn is_active(&self) -> bool {
        self.status == AgentStatus::Active
    }
}

/// Zero-padded agents table key.
pub fn agent_key(id: AgentId) -> String {
    format!("{id:010}")
}

// ── Campaign ───────────────────────────────────────────────────────

/// A scheduling campaign spanning a date range for one court/division.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Campaign {
    pub id: CampaignId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Court/division name shared by the campaign's hearings.
    pub court: String,
    pub status: CampaignStatus,
}

/// Scheduling status of a campaign. The transition is one-way:
/// `Unscheduled` → `Scheduled`, set before the assignment loop runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Unscheduled,
    Scheduled,
}

impl Campaign {
    /// Build the key for the campaigns table.
    pub fn table_key(&self) -> String {
        campaign_key(self.id)
    }
}

/// Zero-padded campaigns table key.
pub fn campaign_key(id: CampaignId) -> String {
    format!("{id:010}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_hearing(id: HearingId, date: &str, room: &str, shift: Shift) -> Hearing {
        Hearing {
            id,
            date: date.parse().unwrap(),
            time: "09:30".to_string(),
            room: room.to_string(),
            case_ref: format!("case-{id}"),
            party_name: "Some Party".to_string(),
            party_doc: "000.000.000-00".to_string(),
            lawyer_name: "Some Lawyer".to_string(),
            subject: "contract dispute".to_string(),
            court: "1st Civil Court".to_string(),
            kind: "conciliation".to_string(),
            shift,
            campaign_id: 1,
            agent_id: None,
        }
    }

    #[test]
    fn balance_recomputes_weighted_balance() {
        let mut agent = Agent::new(1, "Ana", Role::Attorney, 2);

        agent.record_assignment();
        assert_eq!(agent.balance, 1);
        assert_eq!(agent.weighted_balance, 2);

        agent.record_assignment();
        assert_eq!(agent.balance, 2);
        assert_eq!(agent.weighted_balance, 4);

        agent.record_unassignment();
        assert_eq!(agent.balance, 1);
        assert_eq!(agent.weighted_balance, 2);
    }

    #[test]
    fn weighted_balance_invariant_holds_through_mixed_mutations() {
        let mut agent = Agent::new(7, "Bruno", Role::Representative, 3);
        for _ in 0..5 {
            agent.record_assignment();
        }
        for _ in 0..2 {
            agent.record_unassignment();
        }
        assert_eq!(agent.weighted_balance, agent.balance * agent.weight);
        assert_eq!(agent.balance, 3);
    }

    #[test]
    fn same_group_is_reflexive_and_symmetric() {
        let a = test_hearing(1, "2024-03-01", "101", Shift::Morning);
        let b = test_hearing(2, "2024-03-01", "101", Shift::Morning);

        assert!(a.same_group(&a));
        assert!(a.same_group(&b));
        assert!(b.same_group(&a));
    }

    #[test]
    fn same_group_requires_all_three_fields() {
        let base = test_hearing(1, "2024-03-01", "101", Shift::Morning);

        let other_room = test_hearing(2, "2024-03-01", "102", Shift::Morning);
        let other_date = test_hearing(3, "2024-03-02", "101", Shift::Morning);
        let other_shift = test_hearing(4, "2024-03-01", "101", Shift::Afternoon);

        assert!(!base.same_group(&other_room));
        assert!(!base.same_group(&other_date));
        assert!(!base.same_group(&other_shift));
    }

    #[test]
    fn group_key_matches_same_group() {
        let a = test_hearing(1, "2024-03-01", "101", Shift::Morning);
        let b = test_hearing(2, "2024-03-01", "101", Shift::Morning);
        let c = test_hearing(3, "2024-03-01", "101", Shift::Afternoon);

        assert_eq!(a.group_key(), b.group_key());
        assert_ne!(a.group_key(), c.group_key());
    }

    #[test]
    fn table_keys_are_zero_padded() {
        assert_eq!(hearing_key(42), "0000000042");
        assert_eq!(agent_key(1), "0000000001");
        assert_eq!(campaign_key(1_000_000), "0001000000");
        // Padded keys preserve numeric order under byte comparison.
        assert!(hearing_key(9) < hearing_key(10));
    }
}
