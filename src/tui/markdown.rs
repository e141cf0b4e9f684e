//! Markdown rendering for generated text.
//!
//! Thin wrapper around `tui-markdown`: converts markdown to owned
//! ratatui `Line`s so the result can outlive the source string.

use ratatui::text::{Line, Span};

/// Parse markdown text and return styled lines suitable for a `Paragraph`.
pub fn render_markdown(text: &str) -> Vec<Line<'static>> {
    let rendered = tui_markdown::from_str(text);
    rendered
        .lines
        .into_iter()
        .map(|line| {
            let spans: Vec<Span<'static>> = line
                .spans
                .into_iter()
                .map(|span| Span::styled(span.content.into_owned(), span.style))
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Plain text split into unstyled lines, blank lines preserved.
pub fn render_plain(text: &str) -> Vec<Line<'static>> {
    text.lines().map(|l| Line::from(l.to_string())).collect()
}
