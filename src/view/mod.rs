//! Server-rendered list page.
//!
//! [`AgendaListProducer`] supplies the ordered directory listing and
//! [`render_index`] turns it into the HTML served at `/`.

mod list_producer;
mod render;

pub use list_producer::AgendaListProducer;
pub use render::{escape_html, render_index};
