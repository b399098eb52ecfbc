//! Data models for the agenda directory.
//!
//! This module contains the stored record and the request payload used to
//! create one.

pub mod agenda;

pub use agenda::{Agenda, NewAgenda, ValidatedAgenda};
