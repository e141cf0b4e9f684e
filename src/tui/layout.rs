//! Studio layout.
//!
//! ```text
//! ┌ File  View  Help ─────────────────────────────────────────┐  menu bar
//! │ ✦ AI Creative Studio   Powered by Advanced AI        ☾    │  header
//! ├──────────────┬────────────────────────────────────────────┤
//! │ ▸ Image Gen  │  AI Image Generator                        │
//! │   Text Gen   │  ┌ Describe the image ... ┐                │
//! │              │  │ > prompt                │                │
//! │ Features     │  └─────────────────────────┘                │
//! │ • ...        │  [ Generate Image ]                        │
//! │              │  ┌ Generated Image ─────────┐               │
//! │              │  │ url / text               │               │
//! ├──────────────┴────────────────────────────────────────────┤
//! │ status / key hints                                        │  status bar
//! └───────────────────────────────────────────────────────────┘
//! ```

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use tui_menu::Menu;

use crate::generation::{ContentType, GenerationError, LifecycleState};
use crate::shell::ActiveTab;

use super::app::StudioApp;
use super::dashboard::{spinner_frame, truncate};
use super::markdown::{render_markdown, render_plain};
use super::prompt::PromptInput;
use super::theme::Theme;

const SIDEBAR_WIDTH: u16 = 26;
const FEATURES: [&str; 4] = [
    "AI Image Generation",
    "AI Text Generation",
    "Real-time Preview",
    "Export & Download",
];

/// Draw the full TUI layout.
pub fn draw(f: &mut Frame, app: &mut StudioApp) {
    let theme = Theme::for_appearance(app.shell.appearance());
    f.render_widget(
        Block::default().style(Style::default().bg(theme.bg).fg(theme.fg)),
        f.area(),
    );

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // menu bar
            Constraint::Length(2), // header
            Constraint::Min(10),   // body
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    draw_header(f, app, theme, outer[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(30)])
        .split(outer[2]);
    draw_sidebar(f, app, theme, body[0]);
    match app.shell.active_tab() {
        ActiveTab::Image => draw_image_panel(f, app, theme, body[1]),
        ActiveTab::Text => draw_text_panel(f, app, theme, body[1]),
    }

    draw_status(f, app, theme, outer[3]);

    if app.show_help {
        draw_shortcuts(f, theme, outer[2]);
    }

    f.render_widget(
        Paragraph::new("").style(Style::default().bg(theme.menu_bg)),
        outer[0],
    );
    // Menu bar last so dropdowns overlay the content below.
    let menu_area = Rect {
        x: outer[0].x,
        y: outer[0].y,
        width: outer[0].width,
        height: outer[0].height + outer[1].height + outer[2].height,
    };
    let menu_widget = Menu::new()
        .default_style(Style::default().fg(theme.menu_fg).bg(theme.menu_bg))
        .highlight(
            Style::default()
                .fg(theme.bg)
                .bg(theme.border_focused)
                .add_modifier(Modifier::BOLD),
        )
        .dropdown_width(20)
        .dropdown_style(Style::default().fg(theme.menu_fg).bg(theme.menu_bg));
    f.render_stateful_widget(menu_widget, menu_area, &mut app.menu_state);
}

fn draw_header(f: &mut Frame, app: &StudioApp, theme: &Theme, area: Rect) {
    let mode = if app.shell.dark_mode() {
        Span::styled("☀ light ^D ", Style::default().fg(theme.muted))
    } else {
        Span::styled("☾ dark ^D ", Style::default().fg(theme.muted))
    };
    let title = Line::from(vec![
        Span::styled(" ✦ ", Style::default().fg(theme.secondary)),
        Span::styled(
            "AI Creative Studio",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Powered by Advanced AI", Style::default().fg(theme.muted)),
    ]);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(12)])
        .split(area);
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border_normal));
    f.render_widget(Paragraph::new(title).block(block.clone()), cols[0]);
    f.render_widget(Paragraph::new(Line::from(mode)).block(block), cols[1]);
}

fn draw_sidebar(f: &mut Frame, app: &StudioApp, theme: &Theme, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::raw(""));
    for tab in ActiveTab::ALL {
        let active = tab == app.shell.active_tab();
        let accent = match tab {
            ActiveTab::Image => theme.primary,
            ActiveTab::Text => theme.secondary,
        };
        let style = if active {
            Style::default()
                .fg(theme.bg)
                .bg(accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg)
        };
        let marker = if active { " ▸ " } else { "   " };
        lines.push(Line::from(Span::styled(
            format!("{marker}{:<width$}", tab.label(), width = SIDEBAR_WIDTH as usize - 5),
            style,
        )));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        " Features",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for feature in FEATURES {
        lines.push(Line::from(Span::styled(
            format!(" • {feature}"),
            Style::default().fg(theme.muted),
        )));
    }

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(theme.border_normal));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Title + description rows shared by both panels.
fn panel_heading<'a>(title: &'a str, description: &'a str, accent: ratatui::style::Color, theme: &Theme) -> Vec<Line<'a>> {
    vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(description, Style::default().fg(theme.muted))),
    ]
}

fn draw_prompt(
    f: &mut Frame,
    prompt: &mut PromptInput,
    label: &str,
    placeholder: &str,
    theme: &Theme,
    area: Rect,
) {
    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused));
    let inner = block.inner(area);
    f.render_widget(block, area);
    // Cache area for key routing (the editor maps keys against it)
    prompt.set_area(inner);

    if prompt.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled(placeholder, Style::default().fg(theme.muted)))
                .wrap(Wrap { trim: false }),
            inner,
        );
        f.set_cursor_position(Position::new(inner.x, inner.y));
        return;
    }
    f.render_widget(prompt.editor(), inner);
    if let Some((x, y)) = prompt.editor().get_visible_cursor(&inner) {
        f.set_cursor_position(Position::new(x, y));
    }
}

fn action_line<'a>(
    loading: bool,
    idle_label: &'a str,
    tick: u64,
    accent: ratatui::style::Color,
    theme: &Theme,
) -> Line<'a> {
    let button = if loading {
        Span::styled(
            format!(" {} Generating... ", spinner_frame(tick)),
            Style::default().fg(theme.bg).bg(theme.muted),
        )
    } else {
        Span::styled(
            format!(" ✦ {idle_label} "),
            Style::default()
                .fg(theme.bg)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
        )
    };
    Line::from(vec![
        Span::styled("Press Enter (or Ctrl+Enter) to generate   ", Style::default().fg(theme.muted)),
        button,
    ])
}

fn error_line<'a>(error: Option<&GenerationError>, theme: &Theme) -> Line<'a> {
    match error {
        Some(GenerationError::EmptyPrompt) => Line::from(Span::styled(
            GenerationError::EmptyPrompt.to_string(),
            Style::default().fg(theme.error),
        )),
        Some(e @ GenerationError::GenerationFailed(_)) => Line::from(vec![
            Span::styled(e.to_string(), Style::default().fg(theme.error)),
            Span::styled("  (Enter to retry)", Style::default().fg(theme.muted)),
        ]),
        None => Line::raw(""),
    }
}

fn empty_state<'a>(title: &'a str, body: &'a str, accent: ratatui::style::Color, theme: &Theme) -> Paragraph<'a> {
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled("✦", Style::default().fg(accent))).centered(),
        Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD))).centered(),
        Line::from(Span::styled(body, Style::default().fg(theme.muted))).centered(),
    ];
    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_normal)),
        )
        .wrap(Wrap { trim: true })
}

fn draw_image_panel(f: &mut Frame, app: &mut StudioApp, theme: &Theme, area: Rect) {
    let area = padded(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // heading
            Constraint::Length(5), // prompt
            Constraint::Length(1), // action
            Constraint::Length(1), // error
            Constraint::Min(5),    // result
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(panel_heading(
            "AI Image Generator",
            "Transform your ideas into stunning images using advanced AI technology",
            theme.primary,
            theme,
        )),
        rows[0],
    );
    draw_prompt(
        f,
        &mut app.image_prompt,
        "Describe the image you want to generate",
        "e.g., A futuristic cityscape at sunset with flying cars and neon lights...",
        theme,
        rows[1],
    );

    let lc = app.image.lifecycle();
    f.render_widget(
        Paragraph::new(action_line(lc.is_loading(), "Generate Image", app.tick, theme.primary, theme)),
        rows[2],
    );
    f.render_widget(Paragraph::new(error_line(lc.error(), theme)), rows[3]);

    if let Some(result) = lc.result() {
        let width = rows[4].width.saturating_sub(4) as usize;
        let lines = vec![
            Line::from(vec![
                Span::styled("Image  ", Style::default().fg(theme.muted)),
                Span::styled(
                    truncate(&result.payload.url, width.saturating_sub(7)),
                    Style::default()
                        .fg(theme.primary)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]),
            Line::raw(""),
            Line::from(Span::styled(
                format!("Prompt: \"{}\"", result.produced_from().prompt),
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::ITALIC),
            )),
        ];
        let block = Block::default()
            .title(" Generated Image ")
            .title_bottom(Line::from(Span::styled(
                " ⤓ Download ^S ",
                Style::default().fg(theme.success),
            )))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.success));
        f.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            rows[4],
        );
    } else if lc.state() != LifecycleState::Pending {
        f.render_widget(
            empty_state(
                "Ready to Create",
                "Enter a prompt above and watch AI bring your imagination to life",
                theme.primary,
                theme,
            ),
            rows[4],
        );
    }
}

fn draw_text_panel(f: &mut Frame, app: &mut StudioApp, theme: &Theme, area: Rect) {
    let area = padded(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // heading
            Constraint::Length(2), // content type selector
            Constraint::Length(5), // prompt
            Constraint::Length(1), // action
            Constraint::Length(1), // error
            Constraint::Min(5),    // result
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(panel_heading(
            "AI Text Generator",
            "Create compelling content with AI-powered text generation",
            theme.secondary,
            theme,
        )),
        rows[0],
    );
    f.render_widget(Paragraph::new(content_type_line(app.content_type, theme)), rows[1]);
    draw_prompt(
        f,
        &mut app.text_prompt,
        "What would you like to generate?",
        "e.g., The future of artificial intelligence in healthcare...",
        theme,
        rows[2],
    );

    let lc = app.text.lifecycle();
    f.render_widget(
        Paragraph::new(action_line(lc.is_loading(), "Generate Text", app.tick, theme.secondary, theme)),
        rows[3],
    );
    f.render_widget(Paragraph::new(error_line(lc.error(), theme)), rows[4]);

    if let Some(result) = lc.result() {
        let body = match result.produced_from().params {
            ContentType::Blog => render_markdown(&result.payload),
            _ => render_plain(&result.payload),
        };
        let copy_label = if app.text.is_copied() {
            Span::styled(" ✓ Copied! ", Style::default().fg(theme.success).add_modifier(Modifier::BOLD))
        } else {
            Span::styled(" ⧉ Copy ^Y ", Style::default().fg(theme.success))
        };
        let block = Block::default()
            .title(" Generated Content ")
            .title_bottom(Line::from(copy_label))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.success))
            .style(Style::default().bg(theme.code_bg));
        f.render_widget(
            Paragraph::new(body).block(block).wrap(Wrap { trim: false }),
            rows[5],
        );
    } else if lc.state() != LifecycleState::Pending {
        f.render_widget(
            empty_state(
                "Ready to Write",
                "Choose a content type, enter your prompt, and let AI create amazing content for you",
                theme.secondary,
                theme,
            ),
            rows[5],
        );
    }
}

fn content_type_line(selected: ContentType, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::styled("Content Type  ", Style::default().add_modifier(Modifier::BOLD))];
    for t in ContentType::ALL {
        let style = if t == selected {
            Style::default()
                .fg(theme.bg)
                .bg(theme.secondary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };
        spans.push(Span::styled(format!(" {} ", t.label()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("^T", Style::default().fg(theme.muted)));
    Line::from(spans)
}

fn draw_status(f: &mut Frame, app: &StudioApp, theme: &Theme, area: Rect) {
    let hints = match app.shell.active_tab() {
        ActiveTab::Image => "⏎ generate  ^S download  Tab switch  ^D theme  F10 menu  Esc quit",
        ActiveTab::Text => "⏎ generate  ^T type  ^Y copy  Tab switch  ^D theme  F10 menu  Esc quit",
    };
    let mut spans = Vec::new();
    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!(" {status} "),
            Style::default().fg(theme.bg).bg(theme.border_focused),
        ));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(hints, Style::default().fg(theme.muted)));
    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.menu_bg)),
        area,
    );
}

fn draw_shortcuts(f: &mut Frame, theme: &Theme, area: Rect) {
    let bindings = [
        ("Enter / Ctrl+Enter", "Generate"),
        ("Alt+Enter", "New line in prompt"),
        ("Tab", "Switch generator"),
        ("Ctrl+T", "Next content type (text)"),
        ("Ctrl+S", "Download image"),
        ("Ctrl+Y", "Copy text"),
        ("Ctrl+D", "Toggle dark mode"),
        ("Ctrl+W / Ctrl+U", "Delete word / line"),
        ("F10", "Menu"),
        ("Esc / Ctrl+C", "Quit"),
    ];
    let lines: Vec<Line> = bindings
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!(" {key:<20}"), Style::default().fg(theme.primary)),
                Span::raw(*what),
            ])
        })
        .collect();

    let width = 48.min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let popup = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Shortcuts ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_focused))
                .style(Style::default().bg(theme.bg).fg(theme.fg)),
        ),
        popup,
    );
}

fn padded(area: Rect) -> Rect {
    Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use crate::tui::app::tests::test_app;
    use crate::tui::event::TuiMessage;

    fn screen(app: &mut StudioApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 36)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn typed_prompt_replaces_placeholder() {
        let (mut app, _ch, _) = test_app();
        app.image_prompt.set_text("harbor at dawn");
        let s = screen(&mut app);
        assert!(s.contains("harbor at dawn"));
        assert!(!s.contains("e.g., A futuristic cityscape"));
    }

    #[test]
    fn idle_image_tab_shows_empty_state() {
        let (mut app, _ch, _) = test_app();
        let s = screen(&mut app);
        assert!(s.contains("AI Creative Studio"));
        assert!(s.contains("AI Image Generator"));
        assert!(s.contains("Ready to Create"));
        assert!(s.contains("Generate Image"));
    }

    #[test]
    fn empty_prompt_error_is_rendered() {
        let (mut app, _ch, _) = test_app();
        app.submit_active();
        let s = screen(&mut app);
        assert!(s.contains("Please enter a prompt"));
    }

    #[tokio::test(start_paused = true)]
    async fn text_result_and_copy_indicator_render() {
        let (mut app, mut ch, _) = test_app();
        app.shell.set_active_tab(ActiveTab::Text);
        app.text_prompt.set_text("tea");
        app.submit_active();
        assert!(screen(&mut app).contains("Generating..."));

        let event = ch.text.recv().await.unwrap();
        app.update(TuiMessage::Text(event));
        let s = screen(&mut app);
        assert!(s.contains("Generated Content"));
        assert!(s.contains("comprehensive blog post"));

        app.copy_result();
        assert!(screen(&mut app).contains("Copied!"));
    }
}
