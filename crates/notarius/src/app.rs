use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::buffer::CaseMode;
use crate::config::Config;
use crate::dialogs::DialogProvider;
use crate::registry::WindowRegistry;
use crate::window::DocumentWindow;

/// Application coordinator: owns the registry and the dialog
/// capability, tracks which window has focus, and translates key events
/// into registry and buffer operations. Quits once the registry runs
/// empty.
pub struct App {
    pub config: Config,
    pub registry: WindowRegistry,
    dialogs: Box<dyn DialogProvider>,
    focused: Option<String>,
    should_quit: bool,
}

impl App {
    /// Starts with one blank notebook open, as the original manager
    /// does.
    pub fn new(config: Config, dialogs: Box<dyn DialogProvider>) -> Result<Self> {
        let mut registry = WindowRegistry::new(
            (config.window.origin_x, config.window.origin_y),
            config.window.offset_step,
        );
        registry.set_tab_columns(config.editor.tab_columns);

        let first = registry.open(None)?;
        Ok(Self {
            config,
            registry,
            dialogs,
            focused: Some(first),
            should_quit: false,
        })
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn focused_name(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn focused_window(&self) -> Option<&DocumentWindow> {
        self.focused
            .as_deref()
            .and_then(|name| self.registry.window(name))
    }

    pub fn focused_window_mut(&mut self) -> Option<&mut DocumentWindow> {
        let name = self.focused.clone()?;
        self.registry.window_mut(&name)
    }

    /// Focus-in triggers a full count/cursor recompute on the window.
    pub fn focus(&mut self, name: &str) {
        if let Some(window) = self.registry.window_mut(name) {
            window.focus();
            self.focused = Some(name.to_string());
        }
    }

    pub fn focus_next(&mut self) {
        self.cycle_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.cycle_focus(-1);
    }

    fn cycle_focus(&mut self, step: isize) {
        let names = self.registry.names();
        if names.is_empty() {
            return;
        }
        let current = self
            .focused
            .as_deref()
            .and_then(|f| names.iter().position(|n| n == f))
            .unwrap_or(0);
        let next = (current as isize + step).rem_euclid(names.len() as isize) as usize;
        let name = names[next].clone();
        self.focus(&name);
    }

    /// Expire transient status messages; called once per loop tick.
    pub fn update_status(&mut self) {
        if let Some(window) = self.focused_window_mut() {
            window.status_mut().tick();
        }
    }

    pub async fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return self.handle_control_key(key).await;
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            return self.handle_alt_key(key).await;
        }
        self.handle_editing_key(key);
        Ok(())
    }

    async fn handle_control_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('n') => self.new_book(),
            KeyCode::Char('o') => self.open_file().await,
            KeyCode::Char('s') => self.save_focused().await,
            KeyCode::Char('w') => self.close_focused().await,
            KeyCode::Char('q') => self.close_all().await,
            KeyCode::Char('a') => {
                if let Some(window) = self.focused_window_mut() {
                    window.select_all();
                }
            }
            KeyCode::Char('x') => self.with_focused(|w| w.apply(|b| b.cut())),
            KeyCode::Char('c') => {
                if let Some(window) = self.focused_window_mut() {
                    window.copy();
                }
            }
            KeyCode::Char('v') => self.with_focused(|w| w.apply(|b| b.paste())),
            KeyCode::Char('d') => self.with_focused(|w| w.apply(|b| b.delete())),
            KeyCode::Char('z') => self.undo(),
            KeyCode::Char('y') => self.redo(),
            _ => {}
        }
        Ok(())
    }

    async fn handle_alt_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('s') => self.save_focused_as().await,
            KeyCode::Char('r') => self.rename_focused().await,
            KeyCode::Char('n') => self.focus_next(),
            KeyCode::Char('p') => self.focus_prev(),
            KeyCode::Char('u') => self.with_focused(|w| w.apply(|b| b.transform_case(CaseMode::Upper))),
            KeyCode::Char('l') => self.with_focused(|w| w.apply(|b| b.transform_case(CaseMode::Lower))),
            KeyCode::Char('c') => {
                self.with_focused(|w| w.apply(|b| b.transform_case(CaseMode::Capitalize)))
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        self.with_focused(|window| match key.code {
            KeyCode::Char(c) => window.apply(|b| b.insert_char(c)),
            KeyCode::Enter => window.apply(|b| b.insert_newline()),
            KeyCode::Tab => window.apply(|b| b.insert_tab()),
            KeyCode::Backspace => window.apply(|b| b.delete_char_backward()),
            KeyCode::Delete => window.apply(|b| b.delete_char_forward()),
            KeyCode::Left => window.apply(|b| b.move_cursor_left()),
            KeyCode::Right => window.apply(|b| b.move_cursor_right()),
            KeyCode::Up => window.apply(|b| b.move_cursor_up()),
            KeyCode::Down => window.apply(|b| b.move_cursor_down()),
            KeyCode::Home => window.apply(|b| b.move_to_line_start()),
            KeyCode::End => window.apply(|b| b.move_to_line_end()),
            KeyCode::PageUp => window.apply(|b| b.page_up()),
            KeyCode::PageDown => window.apply(|b| b.page_down()),
            _ => {}
        });
    }

    /// A left click places the cursor. The buffer emits the lighter
    /// cursor signal for this, so the counts stay as they are.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
            return;
        };
        // Row 0 is the title bar
        if mouse.row == 0 {
            return;
        }
        let gutter = if self.config.editor.line_numbers {
            crate::ui::GUTTER_WIDTH
        } else {
            0
        };
        let screen_line = (mouse.row - 1) as usize;
        let display_col = mouse.column.saturating_sub(gutter) as usize;
        self.with_focused(|window| {
            window.apply(|b| {
                let line = b.viewport_offset() + screen_line;
                let col = b.char_col_at_display(line, display_col);
                b.set_cursor(line, col)
            });
        });
    }

    // ----- window commands -------------------------------------------------

    pub fn new_book(&mut self) {
        match self.registry.open(None) {
            Ok(name) => self.focus(&name),
            Err(e) => self.report_error(e.to_string()),
        }
    }

    pub async fn open_file(&mut self) {
        let Some(path) = self.dialogs.ask_open_path() else {
            return;
        };
        match self.registry.open_document(path).await {
            Ok(name) => self.focus(&name),
            Err(e) => self.report_error(e.to_string()),
        }
    }

    pub async fn open_path(&mut self, path: std::path::PathBuf) -> Result<()> {
        let name = self.registry.open_document(path).await?;
        self.focus(&name);
        Ok(())
    }

    pub async fn save_focused(&mut self) {
        let Some(name) = self.focused.clone() else {
            return;
        };
        match self.registry.save(&name, self.dialogs.as_mut()).await {
            Ok(Some(saved)) => {
                // A pathless save went through save-as and spawned a new
                // bound window; move focus there.
                if saved != name {
                    self.focus(&saved);
                }
                self.report_success(format!("Saved '{}'", saved));
            }
            Ok(None) => self.report_info("Save cancelled".to_string()),
            Err(e) => self.report_error(e.to_string()),
        }
    }

    pub async fn save_focused_as(&mut self) {
        let Some(name) = self.focused.clone() else {
            return;
        };
        match self.registry.save_as(&name, self.dialogs.as_mut()).await {
            Ok(Some(saved)) => {
                self.focus(&saved);
                self.report_success(format!("Saved '{}'", saved));
            }
            Ok(None) => self.report_info("Save cancelled".to_string()),
            Err(e) => self.report_error(e.to_string()),
        }
    }

    pub async fn rename_focused(&mut self) {
        let Some(name) = self.focused.clone() else {
            return;
        };
        match self
            .registry
            .rename_document(&name, self.dialogs.as_mut())
            .await
        {
            Ok(Some(renamed)) => {
                self.focus(&renamed);
                self.report_success(format!("Renamed to '{}'", renamed));
            }
            Ok(None) => self.report_info("Rename cancelled".to_string()),
            Err(e) => self.report_error(e.to_string()),
        }
    }

    /// Close the focused window; closing the last one quits the whole
    /// application, by design.
    pub async fn close_focused(&mut self) {
        let Some(name) = self.focused.clone() else {
            return;
        };
        match self.registry.close(&name, self.dialogs.as_mut()).await {
            Ok(true) => {
                log::info!("Last window closed, shutting down");
                self.quit();
            }
            Ok(false) => {
                let names = self.registry.names();
                if let Some(first) = names.first() {
                    let first = first.clone();
                    self.focus(&first);
                }
            }
            Err(e) => self.report_error(e.to_string()),
        }
    }

    pub async fn close_all(&mut self) {
        match self.registry.close_all(self.dialogs.as_mut()).await {
            Ok(true) => self.quit(),
            Ok(false) => {
                // A confirmed save-as during the sweep spawned fresh
                // windows; the registry is not empty, so keep running.
                if let Some(first) = self.registry.names().first().cloned() {
                    self.focus(&first);
                }
            }
            Err(e) => self.report_error(e.to_string()),
        }
    }

    fn undo(&mut self) {
        if let Some(window) = self.focused_window_mut() {
            if !window.undo() {
                window.status_mut().set_warning("Nothing to undo".to_string());
            }
        }
    }

    fn redo(&mut self) {
        if let Some(window) = self.focused_window_mut() {
            if !window.redo() {
                window.status_mut().set_warning("Nothing to redo".to_string());
            }
        }
    }

    // ----- helpers ---------------------------------------------------------

    fn with_focused<F>(&mut self, f: F)
    where
        F: FnOnce(&mut DocumentWindow),
    {
        if let Some(window) = self.focused_window_mut() {
            f(window);
        }
    }

    fn report_error(&mut self, message: String) {
        log::error!("{}", message);
        // The focused window may have been closed by the failing
        // operation; fall back to any surviving one.
        if self.focused_window().is_none() {
            if let Some(first) = self.registry.names().first().cloned() {
                self.focus(&first);
            }
        }
        if let Some(window) = self.focused_window_mut() {
            window.status_mut().set_error(message);
        }
    }

    fn report_success(&mut self, message: String) {
        if let Some(window) = self.focused_window_mut() {
            window.status_mut().set_success(message);
        }
    }

    fn report_info(&mut self, message: String) {
        if let Some(window) = self.focused_window_mut() {
            window.status_mut().set_info(message);
        }
    }
}
