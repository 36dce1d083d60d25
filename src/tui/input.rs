//! Input field handling for the terminal user interface.

/// A single-line text input with a cursor.
///
/// The cursor counts characters, not bytes, so multi-byte input is safe.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub active: bool,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input field with initial text, cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
            active: false,
        }
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Text to the left of the cursor.
    pub fn before_cursor(&self) -> &str {
        &self.value[..self.byte_offset(self.cursor)]
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_offset(self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor position.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_editing() {
        let mut field = InputField::new();
        for c in "Wrk".chars() {
            field.handle_char(c);
        }
        field.move_cursor_left();
        field.move_cursor_left();
        field.handle_char('o');
        assert_eq!(field.value, "Work");
        field.move_end();
        field.handle_backspace();
        assert_eq!(field.value, "Wor");
        field.move_home();
        field.handle_delete();
        assert_eq!(field.value, "or");
    }

    #[test]
    fn multibyte_characters_do_not_split() {
        let mut field = InputField::with_value("café");
        assert_eq!(field.cursor, 4);
        field.handle_backspace();
        assert_eq!(field.value, "caf");
        field.handle_char('🚀');
        field.move_cursor_left();
        field.handle_char('é');
        assert_eq!(field.value, "café🚀");
        field.move_cursor_right();
        field.move_cursor_right();
        assert_eq!(field.cursor, 5);
    }

    #[test]
    fn before_cursor_slices_on_char_boundaries() {
        let mut field = InputField::with_value("🚀ab");
        field.move_cursor_left();
        assert_eq!(field.before_cursor(), "🚀a");
        field.move_home();
        assert_eq!(field.before_cursor(), "");
    }

    #[test]
    fn edges_are_noops() {
        let mut field = InputField::new();
        field.handle_backspace();
        field.handle_delete();
        field.move_cursor_left();
        field.move_cursor_right();
        assert_eq!(field, InputField::new());
    }
}
