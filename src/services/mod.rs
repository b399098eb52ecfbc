//! Application service layer.
//!
//! Services contain the directory's business rules and sit between the HTTP
//! handlers and the repository.

mod agenda_service;

pub use agenda_service::{AgendaService, AgendaServiceImpl};
