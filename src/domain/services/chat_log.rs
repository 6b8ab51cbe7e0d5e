use ratatui::prelude::Color;
use ratatui::prelude::Line;
use ratatui::prelude::Modifier;
use ratatui::prelude::Span;
use ratatui::prelude::Style;

use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

const THINKING_TEXT: &str = "Reasoning deeply...";

/// Renders the conversation into styled terminal lines. The same builder is
/// used for drawing and for scroll bounds so the two can never disagree.
pub struct ChatLog {}

impl ChatLog {
    pub fn lines(messages: &[Message], width: u16) -> Vec<Line<'static>> {
        let wrap_width = usize::from(width.saturating_sub(2).max(10));
        let mut lines: Vec<Line<'static>> = vec![];

        for message in messages {
            lines.push(Line::from(Span::styled(
                format!("{}:", message.author.to_string()),
                Style::default()
                    .fg(author_color(&message.author))
                    .add_modifier(Modifier::BOLD),
            )));

            if message.is_pending() && message.text.is_empty() {
                lines.push(Line::from(Span::styled(
                    THINKING_TEXT.to_string(),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )));
            } else {
                let style = text_style(message);
                for text_line in message.as_string_lines(wrap_width) {
                    lines.push(Line::from(Span::styled(text_line, style)));
                }
            }

            lines.push(Line::from(""));
        }

        return lines;
    }

    pub fn line_count(messages: &[Message], width: u16) -> u16 {
        return ChatLog::lines(messages, width).len() as u16;
    }
}

fn author_color(author: &Author) -> Color {
    match author {
        Author::User => return Color::Cyan,
        Author::FocusFlow => return Color::Yellow,
        Author::Assistant => return Color::Magenta,
    }
}

fn text_style(message: &Message) -> Style {
    if message.message_type() == MessageType::Error {
        return Style::default().fg(Color::Red);
    }

    return Style::default();
}
