use std::time::{Duration, Instant};

use crate::buffer::{BufferSignal, BufferStats};

#[derive(Debug, Clone, PartialEq)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub content: String,
    pub message_type: MessageType,
    pub created_at: Instant,
    pub auto_clear_duration: Option<Duration>,
}

impl StatusMessage {
    pub fn new(content: String, message_type: MessageType) -> Self {
        let auto_clear_duration = Self::default_duration_for_type(&message_type);
        Self {
            content,
            message_type,
            created_at: Instant::now(),
            auto_clear_duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        if let Some(duration) = self.auto_clear_duration {
            self.created_at.elapsed() > duration
        } else {
            false
        }
    }

    fn default_duration_for_type(message_type: &MessageType) -> Option<Duration> {
        match message_type {
            MessageType::Info => Some(Duration::from_secs(3)),
            MessageType::Success => Some(Duration::from_secs(2)),
            MessageType::Warning => Some(Duration::from_secs(5)),
            MessageType::Error => Some(Duration::from_secs(7)),
        }
    }
}

/// Per-window status bar state: the derived document counts plus a
/// transient message slot. Counts are refreshed by buffer signals; an
/// `Edited` signal refreshes everything, a `CursorMoved` signal only the
/// cursor text, since cursor movement cannot change any count.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    file_type: String,
    chars: usize,
    lines: usize,
    words: usize,
    cursor: String,
    message: Option<StatusMessage>,
}

impl StatusLine {
    pub fn new() -> Self {
        let mut status = Self::default();
        status.lines = 1;
        status.cursor = Self::cursor_text(1, 1, 1);
        status
    }

    pub fn consume(&mut self, signal: BufferSignal, stats: &BufferStats) {
        if let BufferSignal::Edited = signal {
            self.chars = stats.chars;
            self.lines = stats.lines;
            self.words = stats.words;
        }
        self.cursor = Self::cursor_text(stats.line, stats.col, stats.pos);
    }

    pub fn set_file_type(&mut self, label: String) {
        self.file_type = label;
    }

    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    pub fn chars_text(&self) -> String {
        format!("Chars {}", self.chars)
    }

    pub fn lines_text(&self) -> String {
        format!("Lines {}", self.lines)
    }

    pub fn words_text(&self) -> String {
        format!("Words {}", self.words)
    }

    pub fn cursor_text_label(&self) -> &str {
        &self.cursor
    }

    fn cursor_text(line: usize, col: usize, pos: usize) -> String {
        format!("Ln {}, Col {}, Pos {}", line, col, pos)
    }

    // ----- transient messages ----------------------------------------------

    pub fn set_info(&mut self, message: String) {
        self.message = Some(StatusMessage::new(message, MessageType::Info));
    }

    pub fn set_success(&mut self, message: String) {
        self.message = Some(StatusMessage::new(message, MessageType::Success));
    }

    pub fn set_warning(&mut self, message: String) {
        self.message = Some(StatusMessage::new(message, MessageType::Warning));
    }

    pub fn set_error(&mut self, message: String) {
        self.message = Some(StatusMessage::new(message, MessageType::Error));
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Drop the message once its display duration has elapsed.
    pub fn tick(&mut self) {
        if let Some(ref message) = self.message {
            if message.is_expired() {
                self.message = None;
            }
        }
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }
}
