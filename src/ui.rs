use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
};
use crate::app::{App, Role, Screen, EXAMPLE_CARDS};

/// (row, column) of the cursor inside the input text, counted in chars.
/// Both counters saturate at u16::MAX.
fn cursor_position(input: &str, cursor: usize) -> (u16, u16) {
    let mut row = 0usize;
    let mut col = 0usize;
    for c in input.chars().take(cursor) {
        if c == '\n' {
            row += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    (
        row.min(u16::MAX as usize) as u16,
        col.min(u16::MAX as usize) as u16,
    )
}

/// Input lines clipped to the visible window. Only the cursor's own line
/// shifts by the horizontal scroll; other lines keep their start.
fn clip_input_lines(input: &str, cursor_row: u16, x_scroll: u16, width: u16) -> String {
    input
        .split('\n')
        .enumerate()
        .map(|(row, line)| {
            let skip = if row == cursor_row as usize {
                x_scroll as usize
            } else {
                0
            };
            line.chars()
                .skip(skip)
                .take(width as usize)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, input (grows with content), footer
    let input_height = app.input_height() + 2; // +2 for borders
    let [header_area, body_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(input_height),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    match app.screen {
        Screen::Welcome => render_welcome(app, frame, body_area),
        Screen::Chat => render_transcript(app, frame, body_area),
    }

    render_input(app, frame, input_area);
    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" nido ", Style::default().fg(Color::Cyan).bold()),
        Span::styled("early learning assistant", Style::default().fg(Color::Gray)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(" [{}]", app.responder.as_str()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let mut hints = vec![
        Span::styled(" Enter ", key_style),
        Span::styled(" send ", label_style),
        Span::styled(" Shift+Enter ", key_style),
        Span::styled(" new line ", label_style),
    ];

    if app.screen == Screen::Welcome && app.input.is_empty() {
        hints.extend(vec![
            Span::styled(" ↑/↓ ", key_style),
            Span::styled(" examples ", label_style),
        ]);
    } else {
        hints.extend(vec![
            Span::styled(" ↑/↓ ", key_style),
            Span::styled(" scroll ", label_style),
        ]);
    }

    hints.extend(vec![
        Span::styled(" Esc ", key_style),
        Span::styled(" quit ", label_style),
    ]);

    let footer = Paragraph::new(Line::from(hints)).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}

fn render_welcome(app: &mut App, frame: &mut Frame, area: Rect) {
    app.transcript_area = None;

    // Narrow centered column, like a card stack
    let column_width = area.width.saturating_sub(4).min(64);
    let column_x = area.x + area.width.saturating_sub(column_width) / 2;
    let column = Rect::new(column_x, area.y, column_width, area.height);

    let [greeting_area, c0, c1, c2, _] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Min(0),
    ])
    .areas(column);

    let greeting = Text::from(vec![
        Line::default(),
        Line::from(Span::styled(
            "Hi! I'm nido.",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::default(),
        Line::from("Ask me anything about your child's development, activities, or daily routines."),
        Line::from(Span::styled(
            "Pick a question below, or just start typing.",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(Paragraph::new(greeting).wrap(Wrap { trim: true }), greeting_area);

    // Store card areas for mouse hit-testing
    let card_areas = [c0, c1, c2];
    app.example_areas = card_areas.to_vec();

    for (idx, (card, card_area)) in EXAMPLE_CARDS.iter().zip(card_areas).enumerate() {
        let selected = idx == app.selected_example;
        let border_color = if selected { Color::Cyan } else { Color::DarkGray };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(format!(" {} ", card.title));

        let prompt_style = if selected {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let prompt = Paragraph::new(Span::styled(card.prompt, prompt_style))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(prompt, card_area);
    }
}

fn render_transcript(app: &mut App, frame: &mut Frame, area: Rect) {
    app.example_areas.clear();
    app.transcript_area = Some(area);

    // Store dimensions for scroll calculations (inner size minus borders)
    app.transcript_height = area.height.saturating_sub(2);
    app.transcript_width = area.width.saturating_sub(2);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Conversation ");

    let mut lines: Vec<Line> = Vec::new();

    for msg in &app.messages {
        match msg.role {
            Role::User => {
                lines.push(Line::from(Span::styled(
                    "You:",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )));
            }
            Role::Assistant => {
                lines.push(Line::from(Span::styled(
                    "nido:",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )));
            }
        }
        // Newlines in the text become line breaks; no other markup
        for line in msg.text.lines() {
            lines.push(Line::from(line));
        }
        lines.push(Line::default());
    }

    if app.is_awaiting_reply() {
        lines.push(Line::from(Span::styled(
            "nido:",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("Typing{}", dots),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    let total_lines = lines.len() as u16;

    let transcript = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.scroll, 0));

    frame.render_widget(transcript, area);

    // Render scrollbar
    if total_lines > app.transcript_height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("^"))
            .end_symbol(Some("v"));

        let mut scrollbar_state =
            ScrollbarState::new(total_lines as usize).position(app.scroll as usize);

        frame.render_stateful_widget(
            scrollbar,
            area.inner(ratatui::layout::Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

fn render_input(app: &mut App, frame: &mut Frame, area: Rect) {
    let [input_area, button_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(10)]).areas(area);

    // Store the button area for mouse hit-testing
    app.send_button_area = Some(button_area);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Message ");

    let inner_width = input_area.width.saturating_sub(2);
    let input_rows = app.input_height();
    let (cursor_row, cursor_col) = cursor_position(&app.input, app.cursor);

    // Scroll so the cursor stays visible in both directions
    let x_scroll = if inner_width == 0 {
        0
    } else {
        cursor_col.saturating_sub(inner_width - 1)
    };
    let y_scroll = cursor_row.saturating_sub(input_rows - 1);

    let visible_text = clip_input_lines(&app.input, cursor_row, x_scroll, inner_width);

    // Cyan to match the "You:" style - visible in both light and dark terminals
    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(Color::Cyan))
        .block(input_block)
        .scroll((y_scroll, 0));

    frame.render_widget(input, input_area);

    frame.set_cursor_position((
        input_area.x + 1 + (cursor_col - x_scroll),
        input_area.y + 1 + (cursor_row - y_scroll),
    ));

    // Send button: dimmed while a reply is pending or there is nothing to send
    let can_send = !app.is_awaiting_reply() && !app.input.trim().is_empty();
    let (border_color, label_style) = if can_send {
        (
            Color::Cyan,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    } else {
        (Color::DarkGray, Style::default().fg(Color::DarkGray))
    };

    let label = if app.is_awaiting_reply() { "Wait" } else { "Send" };
    let button = Paragraph::new(Span::styled(label, label_style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );

    frame.render_widget(button, button_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_position_single_line() {
        assert_eq!(cursor_position("", 0), (0, 0));
        assert_eq!(cursor_position("abc", 2), (0, 2));
        assert_eq!(cursor_position("abc", 3), (0, 3));
    }

    #[test]
    fn test_cursor_position_after_newline() {
        assert_eq!(cursor_position("ab\ncd", 3), (1, 0));
        assert_eq!(cursor_position("ab\ncd", 5), (1, 2));
    }

    #[test]
    fn test_cursor_position_counts_chars_not_bytes() {
        assert_eq!(cursor_position("vo\ncê", 5), (1, 2));
    }

    #[test]
    fn test_cursor_position_saturates_on_giant_line() {
        let input = "a".repeat(70_000);
        assert_eq!(cursor_position(&input, 70_000), (0, u16::MAX));
    }

    #[test]
    fn test_clip_shifts_only_the_cursor_line() {
        // Cursor far right on the second line; the first keeps its start
        let clipped = clip_input_lines("first line stays put\n0123456789abcdef", 1, 8, 8);
        assert_eq!(clipped, "first li\n89abcdef");
    }

    #[test]
    fn test_clip_without_scroll_keeps_line_starts() {
        let clipped = clip_input_lines("abc\ndefgh", 0, 0, 4);
        assert_eq!(clipped, "abc\ndefg");
    }
}
