//! Scheduler — assigns agents to a campaign's hearings.
//!
//! The `Scheduler` is the single mutation path for agent balances and
//! hearing→agent links. It exposes three operations:
//!
//! - `generate_schedule`: walk a campaign's hearings in store order and
//!   assign each (date, room, shift) group to the least-loaded agent,
//!   skipping one rank when the previous group's agent would repeat
//! - `reassign_agent`: move an entire hearing group from its current agent
//!   to another, rebalancing both
//! - `update_campaign_court`: rename a campaign's court and backfill the
//!   name onto its hearings
//!
//! Ordering precondition: `generate_schedule` consumes hearings exactly in
//! the order `RosterStore::list_hearings_for_campaign` returns them
//! (ascending id). Grouping and fairness outcomes are defined relative to
//! that order; callers must not reorder hearings between load and process.

use tracing::{debug, info};

use rota_state::{
    AgentId, Campaign, CampaignId, CampaignStatus, Hearing, HearingId, RosterStore,
};

use crate::error::{SchedulerError, SchedulerResult};
use crate::events::{NoopObserver, ScheduleEvent, ScheduleObserver};
use crate::pool::{PoolKind, PoolSet, RoleSelector, selection_index};

/// The assignment and reassignment engine over a roster store.
pub struct Scheduler {
    state: RosterStore,
}

impl Scheduler {
    pub fn new(state: RosterStore) -> Self {
        Self { state }
    }

    /// Generate the schedule for a campaign. See
    /// [`generate_schedule_observed`](Self::generate_schedule_observed).
    pub fn generate_schedule(
        &self,
        campaign_id: CampaignId,
        selector: RoleSelector,
    ) -> SchedulerResult<Vec<Hearing>> {
        self.generate_schedule_observed(campaign_id, selector, &mut NoopObserver)
    }

    /// Generate the schedule for a campaign, emitting events to `observer`.
    ///
    /// The campaign is flagged `Scheduled` before the assignment loop runs.
    /// If the loop fails partway (pool exhausted, store failure), the
    /// campaign stays flagged with only a prefix of hearings assigned —
    /// callers must treat that as a recoverable inconsistency requiring a
    /// re-run or manual audit, not a silent success.
    ///
    /// Within one group every hearing is drawn from the same rank position;
    /// pools are only re-ranked at group boundaries, and only the pool the
    /// previous group drew from.
    pub fn generate_schedule_observed(
        &self,
        campaign_id: CampaignId,
        selector: RoleSelector,
        observer: &mut dyn ScheduleObserver,
    ) -> SchedulerResult<Vec<Hearing>> {
        let mut campaign = self
            .state
            .get_campaign(campaign_id)?
            .ok_or(SchedulerError::CampaignNotFound(campaign_id))?;

        let hearings = self.state.list_hearings_for_campaign(campaign_id)?;
        let Some(first) = hearings.first() else {
            return Err(SchedulerError::EmptyCampaign(campaign_id));
        };

        let mut pools = PoolSet::load(&self.state)?;

        campaign.status = CampaignStatus::Scheduled;
        self.state.put_campaign(&campaign)?;
        observer.on_event(&ScheduleEvent::CampaignMarkedScheduled { campaign_id });
        info!(
            campaign = campaign_id,
            hearings = hearings.len(),
            selector = ?selector,
            "campaign marked scheduled, assignment starting"
        );

        let mut repeated = false;
        let mut last_kind: Option<PoolKind> = None;
        let mut representative: &Hearing = first;

        for hearing in &hearings {
            if !representative.same_group(hearing) {
                observer.on_event(&ScheduleEvent::GroupBoundary {
                    hearing_id: hearing.id,
                });
                // Only the pool the previous group drew from is re-ranked.
                if let Some(kind) = last_kind {
                    let pool = pools.pool_mut(kind);
                    repeated = pool.reorder(selection_index(repeated));
                    observer.on_event(&ScheduleEvent::PoolReordered {
                        pool: kind,
                        repeat_flagged: repeated,
                        ranking: pool.ranking(),
                    });
                    debug!(pool = %kind, repeated, "pool re-ranked at group boundary");
                }
                representative = hearing;
            }

            let kind = selector.pool_kind();
            let rank = selection_index(repeated);
            let agent = pools.pool_mut(kind).select_mut(rank)?;
            agent.record_assignment();

            let mut assigned = hearing.clone();
            assigned.agent_id = Some(agent.id);
            self.state.put_agent(agent)?;
            self.state.put_hearing(&assigned)?;
            observer.on_event(&ScheduleEvent::HearingAssigned {
                hearing_id: hearing.id,
                agent_id: agent.id,
                rank,
                pool: kind,
            });
            last_kind = Some(kind);
        }

        Ok(self.state.list_hearings_for_campaign(campaign_id)?)
    }

    /// Move the whole hearing group containing `hearing_id` from its current
    /// agent to `new_agent_id`.
    ///
    /// Every hearing in the campaign sharing the target's (date, room,
    /// shift) moves together; the outgoing agent's balance drops and the
    /// incoming agent's rises by exactly the number of hearings moved.
    /// Returns the last hearing written.
    pub fn reassign_agent(
        &self,
        hearing_id: HearingId,
        new_agent_id: AgentId,
    ) -> SchedulerResult<Hearing> {
        let hearing = self
            .state
            .get_hearing(hearing_id)?
            .ok_or(SchedulerError::HearingNotFound(hearing_id))?;
        let mut incoming = self
            .state
            .get_agent(new_agent_id)?
            .ok_or(SchedulerError::AgentNotFound(new_agent_id))?;

        let outgoing_id = hearing
            .agent_id
            .ok_or(SchedulerError::HearingUnassigned(hearing_id))?;
        if outgoing_id == new_agent_id {
            // Moving a group onto its current agent changes nothing.
            return Ok(hearing);
        }
        let mut outgoing = self
            .state
            .get_agent(outgoing_id)?
            .ok_or(SchedulerError::AgentNotFound(outgoing_id))?;

        let group: Vec<Hearing> = self
            .state
            .list_hearings_for_campaign(hearing.campaign_id)?
            .into_iter()
            .filter(|h| h.same_group(&hearing))
            .collect();

        info!(
            hearing = hearing_id,
            from = outgoing.id,
            to = incoming.id,
            moved = group.len(),
            "reassigning hearing group"
        );

        let mut last = None;
        for mut member in group {
            outgoing.record_unassignment();
            incoming.record_assignment();
            member.agent_id = Some(incoming.id);

            self.state.put_agent(&incoming)?;
            self.state.put_agent(&outgoing)?;
            self.state.put_hearing(&member)?;
            last = Some(member);
        }

        // The group always contains the target hearing itself.
        last.ok_or(SchedulerError::HearingNotFound(hearing_id))
    }

    /// Rename a campaign's court/division and backfill the new name onto
    /// every hearing in the campaign. Hearings are untouched when the name
    /// is unchanged.
    pub fn update_campaign_court(
        &self,
        campaign_id: CampaignId,
        court: &str,
    ) -> SchedulerResult<Campaign> {
        let mut campaign = self
            .state
            .get_campaign(campaign_id)?
            .ok_or(SchedulerError::CampaignNotFound(campaign_id))?;

        if campaign.court != court {
            let hearings = self.state.list_hearings_for_campaign(campaign_id)?;
            info!(
                campaign = campaign_id,
                hearings = hearings.len(),
                court,
                "backfilling court name onto campaign hearings"
            );
            for mut hearing in hearings {
                hearing.court = court.to_string();
                self.state.put_hearing(&hearing)?;
            }
            campaign.court = court.to_string();
        }

        self.state.put_campaign(&campaign)?;
        Ok(campaign)
    }
}
