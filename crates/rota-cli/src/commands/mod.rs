pub mod import;
pub mod reassign;
pub mod schedule;
pub mod show;
