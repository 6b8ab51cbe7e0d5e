#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use uuid::Uuid;

use super::Author;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    Normal,
    Error,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Message {
    id: String,
    pub author: Author,
    pub text: String,
    mtype: MessageType,
    pending: bool,
}

fn create_id() -> String {
    return Uuid::new_v4().to_string();
}

impl Message {
    pub fn new(author: Author, text: &str) -> Message {
        return Message {
            id: create_id(),
            author: author.clone(),
            text: text.to_string().replace('\t', "  "),
            mtype: MessageType::Normal,
            pending: false,
        };
    }

    pub fn new_with_type(author: Author, mtype: MessageType, text: &str) -> Message {
        return Message {
            id: create_id(),
            author: author.clone(),
            text: text.to_string().replace('\t', "  "),
            mtype,
            pending: false,
        };
    }

    /// An empty reply that is still waiting on its first streamed fragment.
    pub fn new_pending(author: Author) -> Message {
        return Message {
            id: create_id(),
            author: author.clone(),
            text: "".to_string(),
            mtype: MessageType::Normal,
            pending: true,
        };
    }

    pub fn id(&self) -> &str {
        return &self.id;
    }

    pub fn message_type(&self) -> MessageType {
        return self.mtype;
    }

    pub fn is_pending(&self) -> bool {
        return self.pending;
    }

    pub fn append(&mut self, text: &str) {
        self.text += &text.replace('\t', "  ");
        self.pending = false;
    }

    /// Marks a pending reply as settled without appending text. Used when a
    /// stream ends, fails, or is aborted before delivering any fragments.
    pub fn resolve(&mut self) {
        self.pending = false;
    }

    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();

        for full_line in self.text.split('\n') {
            if full_line.trim().is_empty() {
                lines.push(" ".to_string());
                continue;
            }

            let mut char_count = 0;
            let mut current_lines: Vec<&str> = vec![];

            for word in full_line.split(' ') {
                if word.len() + char_count + 1 > line_max_width {
                    lines.push(current_lines.join(" ").trim_end().to_string());
                    current_lines = vec![word];
                    char_count = word.len() + 1;
                } else {
                    current_lines.push(word);
                    char_count += word.len() + 1;
                }
            }
            if !current_lines.is_empty() {
                lines.push(current_lines.join(" ").trim_end().to_string());
            }
        }

        return lines;
    }
}
