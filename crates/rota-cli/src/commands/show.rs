use rota_state::RosterStore;

pub fn campaigns(store: &RosterStore) -> anyhow::Result<()> {
    let campaigns = store.list_campaigns()?;
    if campaigns.is_empty() {
        println!("no campaigns");
        return Ok(());
    }
    for c in campaigns {
        println!(
            "{}  {} → {}  {}  {:?}",
            c.id, c.start_date, c.end_date, c.court, c.status
        );
    }
    Ok(())
}

pub fn agents(store: &RosterStore) -> anyhow::Result<()> {
    let agents = store.list_active_agents()?;
    if agents.is_empty() {
        println!("no active agents");
        return Ok(());
    }
    for a in agents {
        println!(
            "{}  {}  {:?}  balance {} × weight {} = {}",
            a.id, a.name, a.role, a.balance, a.weight, a.weighted_balance
        );
    }
    Ok(())
}

pub fn hearings(store: &RosterStore, campaign_id: u64) -> anyhow::Result<()> {
    let hearings = store.list_hearings_for_campaign(campaign_id)?;
    if hearings.is_empty() {
        println!("no hearings for campaign {campaign_id}");
        return Ok(());
    }
    for h in hearings {
        let agent = h
            .agent_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}  {} {} room {} {:?}  case {}  agent {}",
            h.id, h.date, h.time, h.room, h.shift, h.case_ref, agent
        );
    }
    Ok(())
}
