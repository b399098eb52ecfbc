//! SQLite storage bootstrap and schema migrations.
//!
//! Migration version is tracked via `PRAGMA user_version`. No application
//! data is read or written before migrations succeed.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
