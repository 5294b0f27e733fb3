/// Live text of the search field.
///
/// Every editing operation that changes the text returns the new value so
/// the caller can forward it to the dispatcher in the same step. Cursor moves
/// return nothing.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    text: String,
    /// Byte offset, always on a char boundary
    cursor: usize,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display column of the cursor, for placing the terminal cursor
    pub fn cursor_column(&self) -> usize {
        unicode_width::UnicodeWidthStr::width(&self.text[..self.cursor])
    }

    /// Replace the whole value, cursor at the end
    pub fn on_input_changed(&mut self, text: impl Into<String>) -> &str {
        self.text = text.into();
        self.cursor = self.text.len();
        &self.text
    }

    pub fn insert_char(&mut self, c: char) -> &str {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        &self.text
    }

    pub fn backspace(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        let prev = self.prev_boundary();
        self.text.remove(prev);
        self.cursor = prev;
        Some(&self.text)
    }

    pub fn delete(&mut self) -> Option<&str> {
        if self.cursor >= self.text.len() {
            return None;
        }
        self.text.remove(self.cursor);
        Some(&self.text)
    }

    pub fn clear(&mut self) -> Option<&str> {
        if self.text.is_empty() {
            return None;
        }
        self.text.clear();
        self.cursor = 0;
        Some(&self.text)
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}
