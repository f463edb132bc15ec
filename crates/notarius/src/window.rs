use std::path::{Path, PathBuf};

use crate::buffer::{BufferSignal, TextBuffer};
use crate::filetype::FileType;
use crate::status::StatusLine;

/// One open document: buffer, optional file binding, window placement
/// and the status line fed by buffer signals. The registry owns the
/// window; the window owns everything below it.
pub struct DocumentWindow {
    name: String,
    buffer: TextBuffer,
    path: Option<PathBuf>,
    file_type: Option<FileType>,
    position: (u16, u16),
    status: StatusLine,
}

impl DocumentWindow {
    pub fn new(name: String, position: (u16, u16)) -> Self {
        Self {
            name,
            buffer: TextBuffer::new(),
            path: None,
            file_type: None,
            position,
            status: StatusLine::new(),
        }
    }

    pub fn from_file(name: String, position: (u16, u16), path: PathBuf, content: String) -> Self {
        let mut window = Self::new(name, position);
        window.buffer.set_content(content);
        window.bind_path(path);
        window.sync_status(BufferSignal::Edited);
        window
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Bind the window to a file: record the path and re-infer the file
    /// type shown on the status line.
    pub fn bind_path(&mut self, path: PathBuf) {
        let file_type = FileType::from_path(&path);
        self.status.set_file_type(file_type.to_string());
        self.file_type = Some(file_type);
        self.path = Some(path);
    }

    pub fn file_type(&self) -> Option<&FileType> {
        self.file_type.as_ref()
    }

    pub fn position(&self) -> (u16, u16) {
        self.position
    }

    pub fn is_modified(&self) -> bool {
        self.buffer.is_modified()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusLine {
        &mut self.status
    }

    /// Run a buffer operation and feed its signal into the status line.
    /// Every content- or cursor-touching operation goes through here so
    /// the display can never drift from the buffer.
    pub fn apply<F>(&mut self, op: F)
    where
        F: FnOnce(&mut TextBuffer) -> BufferSignal,
    {
        let signal = op(&mut self.buffer);
        self.sync_status(signal);
    }

    /// Copy changes only the clipboard; no signal, no status refresh.
    pub fn copy(&mut self) {
        self.buffer.copy();
    }

    pub fn select_all(&mut self) {
        self.buffer.select_all();
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.buffer.undo();
        if undone {
            self.sync_status(BufferSignal::Edited);
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.buffer.redo();
        if redone {
            self.sync_status(BufferSignal::Edited);
        }
        redone
    }

    /// Focus-in: recompute everything, the buffer may have been changed
    /// by operations that did not go through this window's signals.
    pub fn focus(&mut self) {
        let signal = self.buffer.refresh();
        self.sync_status(signal);
    }

    pub fn mark_saved(&mut self) {
        self.buffer.mark_saved();
    }

    pub fn content(&self) -> String {
        self.buffer.content()
    }

    pub fn set_viewport_height(&mut self, height: usize) {
        self.buffer.set_viewport_height(height);
    }

    pub fn set_tab_columns(&mut self, columns: usize) {
        self.buffer.set_tab_columns(columns);
        self.sync_status(BufferSignal::CursorMoved);
    }

    fn sync_status(&mut self, signal: BufferSignal) {
        let stats = self.buffer.stats();
        self.status.consume(signal, &stats);
    }
}
