use std::collections::HashMap;

use rota_scheduler::{RoleSelector, Scheduler};
use rota_state::{AgentId, RosterStore};

pub fn schedule(
    store: &RosterStore,
    campaign_id: u64,
    selector: RoleSelector,
) -> anyhow::Result<()> {
    let scheduler = Scheduler::new(store.clone());
    let hearings = scheduler.generate_schedule(campaign_id, selector)?;

    let names: HashMap<AgentId, String> = store
        .list_agents()?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect();

    println!("✓ Scheduled {} hearings for campaign {campaign_id}", hearings.len());
    for hearing in &hearings {
        let agent = hearing
            .agent_id
            .and_then(|id| names.get(&id).cloned())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {} {} room {} {:?} → {}",
            hearing.id, hearing.date, hearing.room, hearing.shift, agent
        );
    }
    Ok(())
}
