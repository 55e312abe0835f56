//! Daily WOD schedule pipeline: parse the published quasi-markdown schedule
//! text into per-location, per-program entries for one calendar date and
//! synchronize them idempotently into the remote record store.

pub mod config;
pub mod dates;
pub mod error;
pub mod noise;
pub mod schedule;
pub mod sync;

pub use error::{SyncError, SyncResult};
