//! rota-scheduler — weighted fair assignment of agents to hearings.
//!
//! Walks a campaign's hearings in store order, groups adjacent hearings by
//! (date, room, shift), and assigns each group to the least-loaded agent by
//! weighted balance. At each group boundary the engine re-ranks the pool it
//! just drew from and, if the front-most agent did not change, shifts the
//! next group's pick down one rank so the same agent is not handed two
//! distinct groups in a row.
//!
//! # Architecture
//!
//! ```text
//! Scheduler
//!   ├── RosterStore (read hearings/agents/campaign, write assignments)
//!   ├── PoolSet (attorney / representative / all, ranked ascending)
//!   └── ScheduleObserver (optional, side-effect-free event stream)
//! ```
//!
//! The engine is synchronous and non-reentrant per campaign: a scheduling
//! run is expected to finish before anything else touches the campaign's
//! hearings or agents.

pub mod error;
pub mod events;
pub mod pool;
pub mod scheduler;

pub use error::{SchedulerError, SchedulerResult};
pub use events::{EventLog, NoopObserver, ScheduleEvent, ScheduleObserver};
pub use pool::{PoolKind, PoolSet, RankedPool, RoleSelector, selection_index};
pub use scheduler::Scheduler;
