use std::io::{self, Write};
use std::path::PathBuf;

use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode},
    execute,
    style::Print,
    terminal::{self, Clear, ClearType},
};

/// The native dialog boxes of the original application, reduced to a
/// capability interface. The core never draws pickers or confirmation
/// boxes itself; it calls these blocking functions and acts on the
/// answer. Tests substitute a scripted implementation.
pub trait DialogProvider {
    /// Ask for the path of a document to open. None means cancelled.
    fn ask_open_path(&mut self) -> Option<PathBuf>;

    /// Ask where to save, suggesting the window name. None means
    /// cancelled.
    fn ask_save_path(&mut self, suggested: &str) -> Option<PathBuf>;

    /// Yes/no prompt for closing a window with unsaved changes. True
    /// means "save before closing".
    fn confirm_unsaved(&mut self, window_name: &str) -> bool;
}

/// Prompt-line dialogs drawn directly on the bottom row of the
/// terminal. Modal: each call blocks on the event stream until the user
/// answers, matching the original's native dialog behavior.
pub struct TerminalDialogs;

impl TerminalDialogs {
    pub fn new() -> Self {
        Self
    }

    fn prompt_line(&self, prompt: &str) -> Option<PathBuf> {
        let mut input = String::new();
        loop {
            if self.draw_prompt(&format!("{}{}", prompt, input)).is_err() {
                return None;
            }
            match event::read() {
                Ok(Event::Key(key)) => match key.code {
                    KeyCode::Enter => {
                        if input.trim().is_empty() {
                            return None;
                        }
                        return Some(PathBuf::from(input.trim()));
                    }
                    KeyCode::Esc => return None,
                    KeyCode::Backspace => {
                        input.pop();
                    }
                    KeyCode::Char(c) => input.push(c),
                    _ => {}
                },
                Ok(_) => {}
                Err(e) => {
                    log::error!("Dialog input error: {}", e);
                    return None;
                }
            }
        }
    }

    fn draw_prompt(&self, text: &str) -> io::Result<()> {
        let (_, rows) = terminal::size()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            MoveTo(0, rows.saturating_sub(1)),
            Clear(ClearType::CurrentLine),
            Print(text)
        )?;
        stdout.flush()
    }
}

impl Default for TerminalDialogs {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogProvider for TerminalDialogs {
    fn ask_open_path(&mut self) -> Option<PathBuf> {
        self.prompt_line("Open file: ")
    }

    fn ask_save_path(&mut self, suggested: &str) -> Option<PathBuf> {
        self.prompt_line(&format!("Save as [{}]: ", suggested))
    }

    fn confirm_unsaved(&mut self, window_name: &str) -> bool {
        let prompt = format!(
            "'{}' contains unsaved changes, save before closing? (Y/n) ",
            window_name
        );
        loop {
            if self.draw_prompt(&prompt).is_err() {
                return false;
            }
            match event::read() {
                Ok(Event::Key(key)) => match key.code {
                    // Yes is the default answer, as in the original prompt
                    KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => return true,
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return false,
                    _ => {}
                },
                Ok(_) => {}
                Err(e) => {
                    log::error!("Dialog input error: {}", e);
                    return false;
                }
            }
        }
    }
}

/// Scripted dialog answers for tests: queued responses are handed out
/// in order, and every call is recorded.
#[cfg(test)]
pub struct ScriptedDialogs {
    open_paths: Vec<Option<PathBuf>>,
    save_paths: Vec<Option<PathBuf>>,
    confirmations: Vec<bool>,
    pub confirm_calls: usize,
    pub save_path_calls: usize,
}

#[cfg(test)]
impl ScriptedDialogs {
    pub fn new() -> Self {
        Self {
            open_paths: Vec::new(),
            save_paths: Vec::new(),
            confirmations: Vec::new(),
            confirm_calls: 0,
            save_path_calls: 0,
        }
    }

    pub fn with_open_path(mut self, path: Option<PathBuf>) -> Self {
        self.open_paths.insert(0, path);
        self
    }

    pub fn with_save_path(mut self, path: Option<PathBuf>) -> Self {
        self.save_paths.insert(0, path);
        self
    }

    pub fn with_confirmation(mut self, answer: bool) -> Self {
        self.confirmations.insert(0, answer);
        self
    }
}

#[cfg(test)]
impl DialogProvider for ScriptedDialogs {
    fn ask_open_path(&mut self) -> Option<PathBuf> {
        self.open_paths.pop().unwrap_or(None)
    }

    fn ask_save_path(&mut self, _suggested: &str) -> Option<PathBuf> {
        self.save_path_calls += 1;
        self.save_paths.pop().unwrap_or(None)
    }

    fn confirm_unsaved(&mut self, _window_name: &str) -> bool {
        self.confirm_calls += 1;
        self.confirmations.pop().unwrap_or(false)
    }
}
