use ropey::Rope;
use std::cmp;
use unicode_segmentation::UnicodeSegmentation;

/// A tab occupies a fixed number of columns in the status display.
/// This is a flat increment per tab character, not alignment to the
/// next tab stop.
pub const TAB_COLUMNS: usize = 8;

const HISTORY_LIMIT: usize = 100;

/// Emitted by every buffer operation so the owning window can refresh
/// its status display. Content mutations carry `Edited`; pure cursor
/// movement carries the lighter `CursorMoved` since it cannot change
/// any of the counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferSignal {
    Edited,
    CursorMoved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMode {
    Upper,
    Lower,
    Capitalize,
}

/// Derived counts and cursor position, recomputed from the whole buffer
/// rather than maintained incrementally. Display values are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferStats {
    pub chars: usize,
    pub lines: usize,
    pub words: usize,
    pub line: usize,
    pub col: usize,
    pub pos: usize,
}

#[derive(Clone)]
struct Snapshot {
    content: String,
    cursor_line: usize,
    cursor_col: usize,
}

#[derive(Clone)]
pub struct TextBuffer {
    rope: Rope,
    cursor_line: usize,
    cursor_col: usize,
    selection: Option<(usize, usize)>,
    clipboard: String,
    modified: bool,
    viewport_offset: usize,
    viewport_height: usize,
    // Undo/Redo support
    history: Vec<Snapshot>,
    history_index: usize,
    tab_columns: usize,
    stats: BufferStats,
}

impl TextBuffer {
    pub fn new() -> Self {
        let initial = Snapshot {
            content: String::new(),
            cursor_line: 0,
            cursor_col: 0,
        };

        let mut buffer = Self {
            rope: Rope::new(),
            cursor_line: 0,
            cursor_col: 0,
            selection: None,
            clipboard: String::new(),
            modified: false,
            viewport_offset: 0,
            viewport_height: 24, // Default, will be updated
            history: vec![initial],
            history_index: 0,
            tab_columns: TAB_COLUMNS,
            stats: BufferStats::default(),
        };
        buffer.recompute_stats();
        buffer
    }

    pub fn set_content(&mut self, content: String) {
        self.rope = Rope::from_str(&content);
        self.cursor_line = 0;
        self.cursor_col = 0;
        self.viewport_offset = 0;
        self.selection = None;
        self.modified = false;

        // Reset history with new content
        self.history = vec![Snapshot {
            content,
            cursor_line: 0,
            cursor_col: 0,
        }];
        self.history_index = 0;
        self.recompute_stats();
    }

    pub fn content(&self) -> String {
        self.rope.to_string()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    pub fn stats(&self) -> BufferStats {
        self.stats
    }

    pub fn set_tab_columns(&mut self, columns: usize) {
        self.tab_columns = columns.max(1);
        self.refresh_cursor_stats();
    }

    pub fn tab_columns(&self) -> usize {
        self.tab_columns
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn clipboard(&self) -> &str {
        &self.clipboard
    }

    pub fn cursor_position(&self) -> (usize, usize) {
        (self.cursor_line, self.cursor_col)
    }

    /// Full recomputation of counts and cursor. Used on focus-in, where
    /// the buffer may have been edited while the window was not the one
    /// receiving signals.
    pub fn refresh(&mut self) -> BufferSignal {
        self.recompute_stats();
        BufferSignal::Edited
    }

    // ----- cursor movement -------------------------------------------------

    pub fn set_cursor(&mut self, line: usize, col: usize) -> BufferSignal {
        let max_line = self.rope.len_lines().saturating_sub(1);
        self.cursor_line = line.min(max_line);
        self.cursor_col = col.min(self.line_len(self.cursor_line));
        self.adjust_viewport();
        self.refresh_cursor_stats();
        BufferSignal::CursorMoved
    }

    pub fn move_cursor_up(&mut self) -> BufferSignal {
        if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.clamp_cursor_col();
            self.adjust_viewport();
        }
        self.refresh_cursor_stats();
        BufferSignal::CursorMoved
    }

    pub fn move_cursor_down(&mut self) -> BufferSignal {
        if self.cursor_line + 1 < self.rope.len_lines() {
            self.cursor_line += 1;
            self.clamp_cursor_col();
            self.adjust_viewport();
        }
        self.refresh_cursor_stats();
        BufferSignal::CursorMoved
    }

    pub fn move_cursor_left(&mut self) -> BufferSignal {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = self.line_len(self.cursor_line);
            self.adjust_viewport();
        }
        self.refresh_cursor_stats();
        BufferSignal::CursorMoved
    }

    pub fn move_cursor_right(&mut self) -> BufferSignal {
        if self.cursor_col < self.line_len(self.cursor_line) {
            self.cursor_col += 1;
        } else if self.cursor_line + 1 < self.rope.len_lines() {
            self.cursor_line += 1;
            self.cursor_col = 0;
            self.adjust_viewport();
        }
        self.refresh_cursor_stats();
        BufferSignal::CursorMoved
    }

    pub fn move_to_line_start(&mut self) -> BufferSignal {
        self.cursor_col = 0;
        self.refresh_cursor_stats();
        BufferSignal::CursorMoved
    }

    pub fn move_to_line_end(&mut self) -> BufferSignal {
        self.cursor_col = self.line_len(self.cursor_line);
        self.refresh_cursor_stats();
        BufferSignal::CursorMoved
    }

    pub fn page_up(&mut self) -> BufferSignal {
        self.cursor_line = self.cursor_line.saturating_sub(self.viewport_height);
        self.viewport_offset = self.viewport_offset.saturating_sub(self.viewport_height);
        self.clamp_cursor_col();
        self.refresh_cursor_stats();
        BufferSignal::CursorMoved
    }

    pub fn page_down(&mut self) -> BufferSignal {
        let max_line = self.rope.len_lines().saturating_sub(1);
        self.cursor_line = cmp::min(self.cursor_line + self.viewport_height, max_line);
        self.viewport_offset = cmp::min(
            self.viewport_offset + self.viewport_height,
            max_line.saturating_sub(self.viewport_height.saturating_sub(1)),
        );
        self.clamp_cursor_col();
        self.refresh_cursor_stats();
        BufferSignal::CursorMoved
    }

    // ----- selection -------------------------------------------------------

    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.rope.len_chars();
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        self.selection = Some((start.min(len), end.min(len)));
    }

    pub fn select_all(&mut self) {
        self.selection = Some((0, self.rope.len_chars()));
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    pub fn selected_text(&self) -> Option<String> {
        self.selection
            .map(|(start, end)| self.rope.slice(start..end).to_string())
    }

    // ----- editing ---------------------------------------------------------

    pub fn insert_char(&mut self, c: char) -> BufferSignal {
        let idx = self.cursor_char_idx();
        self.rope.insert_char(idx, c);
        if c == '\n' {
            self.cursor_line += 1;
            self.cursor_col = 0;
        } else {
            self.cursor_col += 1;
        }
        self.finish_edit()
    }

    pub fn insert_newline(&mut self) -> BufferSignal {
        self.insert_char('\n')
    }

    pub fn insert_tab(&mut self) -> BufferSignal {
        self.insert_char('\t')
    }

    pub fn delete_char_backward(&mut self) -> BufferSignal {
        let idx = self.cursor_char_idx();
        if idx == 0 {
            return BufferSignal::CursorMoved;
        }
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else {
            self.cursor_line -= 1;
            self.cursor_col = self.line_len(self.cursor_line);
        }
        self.rope.remove(idx - 1..idx);
        self.finish_edit()
    }

    pub fn delete_char_forward(&mut self) -> BufferSignal {
        let idx = self.cursor_char_idx();
        if idx >= self.rope.len_chars() {
            return BufferSignal::CursorMoved;
        }
        self.rope.remove(idx..idx + 1);
        self.finish_edit()
    }

    /// Cut the selection, or the current line when nothing is selected,
    /// replacing the clipboard.
    pub fn cut(&mut self) -> BufferSignal {
        let (start, end) = self.target_range();
        self.clipboard = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        self.move_cursor_to_char(start);
        self.selection = None;
        self.finish_edit()
    }

    /// Copy the selection, or the current line when nothing is selected,
    /// replacing the clipboard. Content and cursor are untouched.
    pub fn copy(&mut self) {
        let (start, end) = self.target_range();
        self.clipboard = self.rope.slice(start..end).to_string();
    }

    /// Insert the clipboard at the cursor. Empty clipboard is a no-op.
    pub fn paste(&mut self) -> BufferSignal {
        if self.clipboard.is_empty() {
            return BufferSignal::CursorMoved;
        }
        let idx = self.cursor_char_idx();
        let pasted = self.clipboard.clone();
        self.rope.insert(idx, &pasted);
        self.move_cursor_to_char(idx + pasted.chars().count());
        self.finish_edit()
    }

    /// Delete the selection, or the current line when nothing is
    /// selected. The clipboard is left alone.
    pub fn delete(&mut self) -> BufferSignal {
        let (start, end) = self.target_range();
        self.rope.remove(start..end);
        self.move_cursor_to_char(start);
        self.selection = None;
        self.finish_edit()
    }

    /// Re-case the selection, or the current line when nothing is
    /// selected.
    pub fn transform_case(&mut self, mode: CaseMode) -> BufferSignal {
        let (start, end) = self.target_range();
        let text = self.rope.slice(start..end).to_string();
        let replacement = match mode {
            CaseMode::Upper => text.to_uppercase(),
            CaseMode::Lower => text.to_lowercase(),
            CaseMode::Capitalize => {
                let mut chars = text.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            }
        };
        self.rope.remove(start..end);
        self.rope.insert(start, &replacement);
        self.move_cursor_to_char(start + replacement.chars().count());
        self.selection = None;
        self.finish_edit()
    }

    // ----- undo/redo -------------------------------------------------------

    /// Restore the previous snapshot. Returns false, without any other
    /// effect, when the history is exhausted.
    pub fn undo(&mut self) -> bool {
        if self.history_index == 0 {
            return false;
        }
        self.history_index -= 1;
        self.restore_snapshot();
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.history_index + 1 >= self.history.len() {
            return false;
        }
        self.history_index += 1;
        self.restore_snapshot();
        true
    }

    fn restore_snapshot(&mut self) {
        let snapshot = &self.history[self.history_index];
        self.rope = Rope::from_str(&snapshot.content);
        self.cursor_line = snapshot.cursor_line;
        self.cursor_col = snapshot.cursor_col;
        self.selection = None;
        self.modified = true;
        self.clamp_cursor_col();
        self.adjust_viewport();
        self.recompute_stats();
    }

    fn save_state(&mut self) {
        let current = Snapshot {
            content: self.rope.to_string(),
            cursor_line: self.cursor_line,
            cursor_col: self.cursor_col,
        };

        // Don't save if the content hasn't changed from current history state
        if let Some(last) = self.history.get(self.history_index) {
            if last.content == current.content {
                return;
            }
        }

        self.history.truncate(self.history_index + 1);
        self.history.push(current);
        self.history_index += 1;

        if self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
            self.history_index -= 1;
        }
    }

    // ----- viewport --------------------------------------------------------

    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height.max(1);
    }

    pub fn viewport_offset(&self) -> usize {
        self.viewport_offset
    }

    pub fn viewport_lines(&self) -> Vec<String> {
        let end_line = cmp::min(
            self.viewport_offset + self.viewport_height,
            self.rope.len_lines(),
        );
        (self.viewport_offset..end_line)
            .map(|i| self.rope.line(i).to_string())
            .collect()
    }

    fn adjust_viewport(&mut self) {
        if self.cursor_line < self.viewport_offset {
            self.viewport_offset = self.cursor_line;
        } else if self.cursor_line >= self.viewport_offset + self.viewport_height {
            self.viewport_offset = self.cursor_line + 1 - self.viewport_height;
        }
    }

    // ----- derived state ---------------------------------------------------

    /// Zero-based display column of the cursor, with each tab counting
    /// as a flat TAB_COLUMNS and every other character as one.
    pub fn display_column(&self) -> usize {
        let line = self.rope.line(self.cursor_line);
        line.chars()
            .take(self.cursor_col)
            .map(|c| if c == '\t' { self.tab_columns } else { 1 })
            .sum()
    }

    /// Map a display column back to a char column on the given line,
    /// for pointer-driven cursor placement. A column landing inside a
    /// tab's span resolves to just past the tab.
    pub fn char_col_at_display(&self, line: usize, display_col: usize) -> usize {
        let line = line.min(self.rope.len_lines().saturating_sub(1));
        let mut width = 0;
        let mut col = 0;
        for c in self.rope.line(line).chars().take(self.line_len(line)) {
            if width >= display_col {
                break;
            }
            width += if c == '\t' { self.tab_columns } else { 1 };
            col += 1;
        }
        col
    }

    fn recompute_stats(&mut self) {
        let content = self.rope.to_string();
        self.stats.chars = self.rope.len_chars();
        self.stats.lines = self.rope.len_lines();
        self.stats.words = content.unicode_words().count();
        self.refresh_cursor_stats();
    }

    fn refresh_cursor_stats(&mut self) {
        self.stats.line = self.cursor_line + 1;
        self.stats.col = self.display_column() + 1;
        self.stats.pos = self.cursor_char_idx() + 1;
    }

    // ----- internal helpers ------------------------------------------------

    fn finish_edit(&mut self) -> BufferSignal {
        self.modified = true;
        self.clamp_cursor_col();
        self.adjust_viewport();
        self.save_state();
        self.recompute_stats();
        BufferSignal::Edited
    }

    fn cursor_char_idx(&self) -> usize {
        self.rope.line_to_char(self.cursor_line) + self.cursor_col
    }

    fn move_cursor_to_char(&mut self, idx: usize) {
        let idx = idx.min(self.rope.len_chars());
        self.cursor_line = self.rope.char_to_line(idx);
        self.cursor_col = idx - self.rope.line_to_char(self.cursor_line);
        self.adjust_viewport();
    }

    /// Length of a line in chars, excluding the trailing newline.
    fn line_len(&self, line: usize) -> usize {
        let slice = self.rope.line(line);
        let len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    fn clamp_cursor_col(&mut self) {
        let max_line = self.rope.len_lines().saturating_sub(1);
        self.cursor_line = self.cursor_line.min(max_line);
        self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_line));
    }

    /// The range an edit operation acts on: the selection when present,
    /// otherwise the current line from its start to its end, excluding
    /// the newline.
    fn target_range(&self) -> (usize, usize) {
        if let Some((start, end)) = self.selection {
            let len = self.rope.len_chars();
            (start.min(len), end.min(len))
        } else {
            let start = self.rope.line_to_char(self.cursor_line);
            (start, start + self.line_len(self.cursor_line))
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_creation() {
        let buffer = TextBuffer::new();
        assert_eq!(buffer.cursor_position(), (0, 0));
        assert_eq!(buffer.line_count(), 1); // Empty buffer has one empty line
        assert!(!buffer.is_modified());

        let stats = buffer.stats();
        assert_eq!(stats.chars, 0);
        assert_eq!(stats.lines, 1);
        assert_eq!(stats.words, 0);
        assert_eq!((stats.line, stats.col, stats.pos), (1, 1, 1));
    }

    #[test]
    fn test_text_insertion() {
        let mut buffer = TextBuffer::new();
        buffer.insert_char('H');
        buffer.insert_char('i');

        assert_eq!(buffer.content(), "Hi");
        assert_eq!(buffer.cursor_position(), (0, 2));
        assert!(buffer.is_modified());
        assert_eq!(buffer.stats().chars, 2);
    }

    #[test]
    fn test_newline_insertion() {
        let mut buffer = TextBuffer::new();
        buffer.insert_char('H');
        buffer.insert_char('i');
        buffer.insert_newline();
        buffer.insert_char('!');

        assert_eq!(buffer.content(), "Hi\n!");
        assert_eq!(buffer.cursor_position(), (1, 1));
        assert_eq!(buffer.stats().lines, 2);
    }

    #[test]
    fn test_backspace() {
        let mut buffer = TextBuffer::new();
        buffer.insert_char('H');
        buffer.insert_char('i');
        buffer.delete_char_backward();

        assert_eq!(buffer.content(), "H");
        assert_eq!(buffer.cursor_position(), (0, 1));
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut buffer = TextBuffer::new();
        buffer.set_content("ab\ncd".to_string());
        buffer.set_cursor(1, 0);
        buffer.delete_char_backward();

        assert_eq!(buffer.content(), "abcd");
        assert_eq!(buffer.cursor_position(), (0, 2));
    }

    #[test]
    fn test_cursor_movement_signals() {
        let mut buffer = TextBuffer::new();
        buffer.set_content("Hello\nWorld".to_string());

        assert_eq!(buffer.move_cursor_right(), BufferSignal::CursorMoved);
        assert_eq!(buffer.cursor_position(), (0, 1));

        buffer.move_cursor_down();
        assert_eq!(buffer.cursor_position(), (1, 1));

        buffer.move_cursor_left();
        assert_eq!(buffer.cursor_position(), (1, 0));

        // Left at the start of a line wraps to the end of the previous one
        buffer.move_cursor_left();
        assert_eq!(buffer.cursor_position(), (0, 5));
    }

    #[test]
    fn test_edit_returns_edited_signal() {
        let mut buffer = TextBuffer::new();
        assert_eq!(buffer.insert_char('a'), BufferSignal::Edited);
        assert_eq!(buffer.cut(), BufferSignal::Edited);
    }

    #[test]
    fn test_word_count_whitespace_runs() {
        let mut buffer = TextBuffer::new();
        buffer.set_content("  a  bb   ".to_string());
        assert_eq!(buffer.stats().words, 2);
    }

    #[test]
    fn test_tab_expands_as_flat_increment() {
        let mut buffer = TextBuffer::new();
        buffer.set_content("héllo\tworld".to_string());

        // Just after the tab: 5 one-column chars, then a flat 8 for the tab
        buffer.set_cursor(0, 6);
        let stats = buffer.stats();
        assert_eq!(stats.col, 14);
        assert_eq!(stats.pos, 7);
        assert_eq!(stats.line, 1);
    }

    #[test]
    fn test_char_col_at_display_round_trips_tabs() {
        let mut buffer = TextBuffer::new();
        buffer.set_content("a\tbc".to_string());

        assert_eq!(buffer.char_col_at_display(0, 0), 0);
        assert_eq!(buffer.char_col_at_display(0, 1), 1);
        // Inside the tab's 8-column span: lands just past the tab
        assert_eq!(buffer.char_col_at_display(0, 5), 2);
        assert_eq!(buffer.char_col_at_display(0, 9), 2);
        // Beyond the line: clamps to the line length
        assert_eq!(buffer.char_col_at_display(0, 50), 4);
    }

    #[test]
    fn test_cut_then_paste_restores_content() {
        let mut buffer = TextBuffer::new();
        buffer.set_content("Line 1\nLine 2\nLine 3".to_string());
        buffer.set_cursor(1, 3);

        buffer.cut();
        assert_eq!(buffer.content(), "Line 1\n\nLine 3");
        assert_eq!(buffer.clipboard(), "Line 2");

        buffer.paste();
        assert_eq!(buffer.content(), "Line 1\nLine 2\nLine 3");
    }

    #[test]
    fn test_cut_selection() {
        let mut buffer = TextBuffer::new();
        buffer.set_content("Hello World".to_string());
        buffer.select(0, 5);

        buffer.cut();
        assert_eq!(buffer.content(), " World");
        assert_eq!(buffer.clipboard(), "Hello");
        assert!(buffer.selection().is_none());
    }

    #[test]
    fn test_copy_defaults_to_current_line() {
        let mut buffer = TextBuffer::new();
        buffer.set_content("first\nsecond".to_string());
        buffer.set_cursor(1, 2);

        buffer.copy();
        assert_eq!(buffer.clipboard(), "second");
        assert_eq!(buffer.content(), "first\nsecond");
    }

    #[test]
    fn test_paste_empty_clipboard_is_noop() {
        let mut buffer = TextBuffer::new();
        buffer.set_content("abc".to_string());

        assert_eq!(buffer.paste(), BufferSignal::CursorMoved);
        assert_eq!(buffer.content(), "abc");
    }

    #[test]
    fn test_delete_leaves_clipboard_alone() {
        let mut buffer = TextBuffer::new();
        buffer.set_content("keep\ndrop me".to_string());
        buffer.set_cursor(0, 0);
        buffer.copy();
        buffer.set_cursor(1, 0);

        buffer.delete();
        assert_eq!(buffer.content(), "keep\n");
        assert_eq!(buffer.clipboard(), "keep");
    }

    #[test]
    fn test_transform_upper_on_selection() {
        let mut buffer = TextBuffer::new();
        buffer.set_content("MixedCase rest".to_string());
        buffer.select(0, 9);

        buffer.transform_case(CaseMode::Upper);
        assert_eq!(buffer.content(), "MIXEDCASE rest");
    }

    #[test]
    fn test_transform_defaults_to_current_line() {
        let mut buffer = TextBuffer::new();
        buffer.set_content("first\nSeCoNd LiNe".to_string());
        buffer.set_cursor(1, 0);

        buffer.transform_case(CaseMode::Lower);
        assert_eq!(buffer.content(), "first\nsecond line");
    }

    #[test]
    fn test_transform_capitalize() {
        let mut buffer = TextBuffer::new();
        buffer.set_content("hELLO wORLD".to_string());

        buffer.transform_case(CaseMode::Capitalize);
        assert_eq!(buffer.content(), "Hello world");
    }

    #[test]
    fn test_select_all() {
        let mut buffer = TextBuffer::new();
        buffer.set_content("a\nb".to_string());
        buffer.select_all();
        assert_eq!(buffer.selected_text().as_deref(), Some("a\nb"));
    }

    #[test]
    fn test_undo_redo() {
        let mut buffer = TextBuffer::new();

        // Empty history: silent no-ops
        assert!(!buffer.undo());
        assert!(!buffer.redo());

        buffer.insert_char('H');
        buffer.insert_char('i');
        assert_eq!(buffer.content(), "Hi");

        assert!(buffer.undo());
        assert_eq!(buffer.content(), "H");

        assert!(buffer.redo());
        assert_eq!(buffer.content(), "Hi");

        assert!(buffer.undo());
        assert!(buffer.undo());
        assert_eq!(buffer.content(), "");
        assert!(!buffer.undo());
    }

    #[test]
    fn test_undo_recomputes_stats() {
        let mut buffer = TextBuffer::new();
        buffer.insert_char('a');
        buffer.insert_newline();
        assert_eq!(buffer.stats().lines, 2);

        buffer.undo();
        assert_eq!(buffer.stats().lines, 1);
        assert_eq!(buffer.stats().chars, 1);
    }

    #[test]
    fn test_history_limit() {
        let mut buffer = TextBuffer::new();
        for i in 0..110 {
            buffer.insert_char((b'a' + (i % 26) as u8) as char);
        }

        assert!(buffer.undo());
        assert!(buffer.history.len() <= HISTORY_LIMIT);
    }

    #[test]
    fn test_set_content_resets_history() {
        let mut buffer = TextBuffer::new();
        buffer.insert_char('x');

        buffer.set_content("fresh".to_string());
        assert!(!buffer.is_modified());
        assert!(!buffer.undo());
    }

    #[test]
    fn test_refresh_recomputes_everything() {
        let mut buffer = TextBuffer::new();
        buffer.set_content("one two three".to_string());
        assert_eq!(buffer.refresh(), BufferSignal::Edited);
        assert_eq!(buffer.stats().words, 3);
    }
}
