use std::path::Path;

use rota_state::RosterStore;

use crate::manifest::RosterManifest;

pub fn import(store: &RosterStore, path: &Path) -> anyhow::Result<()> {
    let manifest = RosterManifest::from_file(path)?;

    store.put_campaign(&manifest.campaign())?;
    let agents = manifest.agents();
    for agent in &agents {
        store.put_agent(agent)?;
    }
    let hearings = manifest.hearings();
    for hearing in &hearings {
        store.put_hearing(hearing)?;
    }

    println!(
        "✓ Imported campaign {} ({} agents, {} hearings)",
        manifest.campaign.id,
        agents.len(),
        hearings.len()
    );
    Ok(())
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

[[hearings]]
id = 1
date = "2024-03-01"
time = "09:30"
room = "101"
case_ref = "0001234-56.2024"
shift = "morning"

[[hearings]]
id = 2
date = "2024-03-01"
time = "10:00"
room = "101"
case_ref = "0001234-57.2024"
shift = "morning"
"#;

    #[test]
    fn import_loads_manifest_into_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.toml");
        std::fs::write(&path, MANIFEST).unwrap();

        let store = RosterStore::open_in_memory().unwrap();
        import(&store, &path).unwrap();

        assert!(store.get_campaign(1).unwrap().is_some());
        assert_eq!(store.list_active_agents().unwrap().len(), 1);
        assert_eq!(store.list_hearings_for_campaign(1).unwrap().len(), 2);
    }

    #[test]
    fn import_fails_on_missing_file() {
        let store = RosterStore::open_in_memory().unwrap();
        assert!(import(&store, Path::new("nope/roster.toml")).is_err());
    }
}
