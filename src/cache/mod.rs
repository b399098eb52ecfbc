//! Caching utilities for the Agenda server.

pub mod snapshot;

pub use snapshot::TimedSnapshot;
