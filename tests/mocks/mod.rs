//! In-memory test doubles.

pub mod mock_agenda_repository;

#[allow(unused_imports)]
pub use mock_agenda_repository::MockAgendaRepository;
