mod sqlite_agenda_repository;
mod traits;

pub use sqlite_agenda_repository::SqliteAgendaRepository;
pub use traits::AgendaRepository;
