//! HTML rendering for the list page.

use crate::models::Agenda;
use std::fmt::Write;

/// Escape text for use inside HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Render the directory listing as a complete HTML page.
pub fn render_index(agendas: &[Agenda]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Agenda</title>\n</head>\n<body>\n<h1>Agenda</h1>\n",
    );

    if agendas.is_empty() {
        html.push_str("<p class=\"empty\">No registered entries.</p>\n");
    } else {
        html.push_str(
            "<table>\n<thead><tr><th>Id</th><th>Morada</th><th>Numbers</th><th>REST URL</th></tr></thead>\n<tbody>\n",
        );
        for agenda in agendas {
            // Writing into a String cannot fail.
            let _ = writeln!(
                html,
                "<tr><td>{id}</td><td>{morada}</td><td>{numbers}</td><td><a href=\"/agenda/{id}\">/agenda/{id}</a></td></tr>",
                id = agenda.id,
                morada = escape_html(&agenda.morada),
                numbers = escape_html(&agenda.numbers),
            );
        }
        html.push_str("</tbody>\n</table>\n");
        let _ = writeln!(html, "<p>REST URL for all entries: <a href=\"/agenda\">/agenda</a></p>");
    }

    html.push_str("</body>\n</html>\n");
    html
}
