//! Emoji picker sheet state.

/// Visibility of the picker overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetState {
    #[default]
    Hidden,
    Visible,
}

/// Cursor movement inside the tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridMove {
    Left,
    Right,
    Up,
    Down,
}

/// Overlay sheet listing emoji tiles in a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiSheet {
    state: SheetState,
    cursor: usize,
    columns: usize,
}

impl Default for EmojiSheet {
    fn default() -> Self {
        Self {
            state: SheetState::Hidden,
            cursor: 0,
            columns: 8,
        }
    }
}

impl EmojiSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SheetState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == SheetState::Visible
    }

    /// Show the sheet. Returns `true` only on the Hidden → Visible transition.
    pub fn open(&mut self) -> bool {
        if self.is_visible() {
            return false;
        }
        self.state = SheetState::Visible;
        self.cursor = 0;
        true
    }

    pub fn close(&mut self) {
        self.state = SheetState::Hidden;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Match the grid width to the rendered area.
    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns.max(1);
    }

    /// Move the tile cursor, staying inside `0..item_count`.
    pub fn move_cursor(&mut self, dir: GridMove, item_count: usize) {
        if item_count == 0 {
            self.cursor = 0;
            return;
        }
        let last = item_count - 1;
        self.cursor = match dir {
            GridMove::Left => self.cursor.saturating_sub(1),
            GridMove::Right => (self.cursor + 1).min(last),
            GridMove::Up => self.cursor.saturating_sub(self.columns),
            GridMove::Down => (self.cursor + self.columns).min(last),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_reports_transition_once() {
        let mut sheet = EmojiSheet::new();
        assert_eq!(sheet.state(), SheetState::Hidden);
        assert!(sheet.open());
        assert!(!sheet.open());
        sheet.close();
        assert!(!sheet.is_visible());
        assert!(sheet.open());
    }

    #[test]
    fn cursor_stays_in_grid() {
        let mut sheet = EmojiSheet::new();
        sheet.set_columns(4);
        sheet.move_cursor(GridMove::Left, 10);
        assert_eq!(sheet.cursor(), 0);
        sheet.move_cursor(GridMove::Down, 10);
        assert_eq!(sheet.cursor(), 4);
        sheet.move_cursor(GridMove::Down, 10);
        sheet.move_cursor(GridMove::Down, 10);
        assert_eq!(sheet.cursor(), 9);
        sheet.move_cursor(GridMove::Right, 10);
        assert_eq!(sheet.cursor(), 9);
        sheet.move_cursor(GridMove::Up, 10);
        assert_eq!(sheet.cursor(), 5);
        sheet.move_cursor(GridMove::Right, 0);
        assert_eq!(sheet.cursor(), 0);
    }

    #[test]
    fn reopening_resets_cursor() {
        let mut sheet = EmojiSheet::new();
        sheet.open();
        sheet.move_cursor(GridMove::Right, 5);
        sheet.close();
        sheet.open();
        assert_eq!(sheet.cursor(), 0);
        sheet.set_columns(0);
        assert_eq!(sheet.columns(), 1);
    }
}
