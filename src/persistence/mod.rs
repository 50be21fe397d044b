//! Session snapshot persistence
//!
//! One JSON record per save slot. Reading never fails: a missing or
//! unreadable file means "no prior save".

pub mod snapshot;

pub use snapshot::{CommandOutcome, Snapshot, handle_command, load, save};
