//! Domain value objects and types.
//!
//! Type-safe wrappers for the agenda record's identifier and its two
//! mandatory text fields. Each wrapper validates at construction time so an
//! unvalidated value can never reach the repository.

pub mod agenda_id;
pub mod errors;
pub mod morada;
pub mod phone;

pub use agenda_id::AgendaId;
pub use errors::ValidationError;
pub use morada::Morada;
pub use phone::PhoneNumbers;
