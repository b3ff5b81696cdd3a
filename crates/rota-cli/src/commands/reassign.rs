use rota_scheduler::Scheduler;
use rota_state::RosterStore;

pub fn reassign(store: &RosterStore, hearing_id: u64, agent_id: u64) -> anyhow::Result<()> {
    let scheduler = Scheduler::new(store.clone());
    let hearing = scheduler.reassign_agent(hearing_id, agent_id)?;

    println!(
        "✓ Group of hearing {hearing_id} ({} room {} {:?}) moved to agent {agent_id}",
        hearing.date, hearing.room, hearing.shift
    );
    Ok(())
}

pub fn update_court(store: &RosterStore, campaign_id: u64, court: &str) -> anyhow::Result<()> {
    let scheduler = Scheduler::new(store.clone());
    let campaign = scheduler.update_campaign_court(campaign_id, court)?;

    println!("✓ Campaign {} now sits at {}", campaign.id, campaign.court);
    Ok(())
}
