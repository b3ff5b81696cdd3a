//! Roster manifest parser.
//!
//! A manifest declares one campaign with its hearings and the agent pool,
//! in TOML, and is imported into the store by `rota import`.
//!
//! ```toml
//! [campaign]
//! id = 1
//! start_date = "2024-03-01"
//! end_date = "2024-03-15"
//! court = "1st Civil Court"
//!
//! [[agents]]
//! id = 1
//! name = "Ana"
//! role = "attorney"
//! weight = 2
//!
//! [[hearings]]
//! id = 1
//! date = "2024-03-01"
//! time = "09:30"
//! room = "101"
//! case_ref = "0001234-56.2024"
//! shift = "morning"
//! ```

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use rota_state::{
    Agent, AgentStatus, Campaign, CampaignStatus, Hearing, Role, Shift,
};

#[derive(Debug, Deserialize)]
pub struct RosterManifest {
    pub campaign: CampaignEntry,
    #[serde(default)]
    pub agents: Vec<AgentEntry>,
    #[serde(default)]
    pub hearings: Vec<HearingEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CampaignEntry {
    pub id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub court: String,
}

#[derive(Debug, Deserialize)]
pub struct AgentEntry {
    pub id: u64,
    pub name: String,
    pub role: Role,
    #[serde(default = "default_weight")]
    pub weight: i64,
    #[serde(default)]
    pub inactive: bool,
}

#[derive(Debug, Deserialize)]
pub struct HearingEntry {
    pub id: u64,
    pub date: NaiveDate,
    pub time: String,
    pub room: String,
    pub case_ref: String,
    pub shift: Shift,
    #[serde(default)]
    pub party_name: String,
    #[serde(default)]
    pub party_doc: String,
    #[serde(default)]
    pub lawyer_name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default = "default_kind")]
    pub kind: String,
}

fn default_weight() -> i64 {
    1
}

fn default_kind() -> String {
    "hearing".to_string()
}

impl RosterManifest {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let manifest: RosterManifest = toml::from_str(&content)?;
        Ok(manifest)
    }

    pub fn campaign(&self) -> Campaign {
        Campaign {
            id: self.campaign.id,
            start_date: self.campaign.start_date,
            end_date: self.campaign.end_date,
            court: self.campaign.court.clone(),
            status: CampaignStatus::Unscheduled,
        }
    }

    pub fn agents(&self) -> Vec<Agent> {
        self.agents
            .iter()
            .map(|entry| {
                let mut agent = Agent::new(entry.id, entry.name.clone(), entry.role, entry.weight);
                if entry.inactive {
                    agent.status = AgentStatus::Inactive;
                }
                agent
            })
            .collect()
    }

    /// Hearings inherit the campaign's id and court; agents are unassigned
    /// until a schedule run.
    pub fn hearings(&self) -> Vec<Hearing> {
        self.hearings
            .iter()
            .map(|entry| Hearing {
                id: entry.id,
                date: entry.date,
                time: entry.time.clone(),
                room: entry.room.clone(),
                case_ref: entry.case_ref.clone(),
                party_name: entry.party_name.clone(),
                party_doc: entry.party_doc.clone(),
                lawyer_name: entry.lawyer_name.clone(),
                subject: entry.subject.clone(),
                court: self.campaign.court.clone(),
                kind: entry.kind.clone(),
                shift: entry.shift,
                campaign_id: self.campaign.id,
                agent_id: None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
[campaign]
id = 1
start_date = "2024-03-01"
end_date = "2024-03-15"
court = "1st Civil Court"

[[agents]]
id = 1
name = "Ana"
role = "attorney"
weight = 2

[[agents]]
id = 2
name = "Bruno"
role = "representative"

[[hearings]]
id = 1
date = "2024-03-01"
time = "09:30"
room = "101"
case_ref = "0001234-56.2024"
shift = "morning"
"#;

    #[test]
    fn parses_full_manifest() {
        let manifest: RosterManifest = toml::from_str(MANIFEST).unwrap();

        assert_eq!(manifest.campaign.id, 1);
        assert_eq!(manifest.agents.len(), 2);
        assert_eq!(manifest.hearings.len(), 1);
    }

    #[test]
    fn agent_defaults_apply() {
        let manifest: RosterManifest = toml::from_str(MANIFEST).unwrap();
        let agents = manifest.agents();

        assert_eq!(agents[0].weight, 2);
        assert_eq!(agents[1].weight, 1); // defaulted
        assert_eq!(agents[1].role, Role::Representative);
        assert!(agents.iter().all(|a| a.balance == 0 && a.weighted_balance == 0));
    }

    #[test]
    fn hearings_inherit_campaign_fields() {
        let manifest: RosterManifest = toml::from_str(MANIFEST).unwrap();
        let hearings = manifest.hearings();

        assert_eq!(hearings[0].campaign_id, 1);
        assert_eq!(hearings[0].court, "1st Civil Court");
        assert_eq!(hearings[0].shift, Shift::Morning);
        assert_eq!(hearings[0].agent_id, None);
    }

    #[test]
    fn campaign_starts_unscheduled() {
        let manifest: RosterManifest = toml::from_str(MANIFEST).unwrap();
        assert_eq!(manifest.campaign().status, CampaignStatus::Unscheduled);
    }

    #[test]
    fn manifest_without_agents_or_hearings_parses() {
        let minimal = r#"
[campaign]
id = 2
start_date = "2024-04-01"
end_date = "2024-04-02"
court = "Labor Court"
"#;
        let manifest: RosterManifest = toml::from_str(minimal).unwrap();
        assert!(manifest.agents().is_empty());
        assert!(manifest.hearings().is_empty());
    }
}
