use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

pub struct TextArea {}

impl<'a> TextArea {
    pub fn chat_input() -> tui_textarea::TextArea<'a> {
        return TextArea::with_title("Ask anything (e.g. 'Plan my study schedule for finals')");
    }

    pub fn task_input() -> tui_textarea::TextArea<'a> {
        return TextArea::with_title("Add a new task");
    }

    fn with_title(title: &'static str) -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(title)
                .padding(Padding::new(1, 1, 0, 0)),
        );

        return textarea;
    }
}
