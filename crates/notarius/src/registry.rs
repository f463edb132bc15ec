use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::dialogs::DialogProvider;
use crate::file_manager;
use crate::window::DocumentWindow;

/// Tracks every open document window by name and decides where the next
/// one goes on screen. Injected into the app rather than living in a
/// global; windows are owned here and nowhere else.
pub struct WindowRegistry {
    windows: Vec<DocumentWindow>,
    next_book_number: usize,
    xpos: u16,
    ypos: u16,
    xoffset: u16,
    yoffset: u16,
    offset_step: u16,
    tab_columns: usize,
}

impl WindowRegistry {
    pub fn new(origin: (u16, u16), offset_step: u16) -> Self {
        Self {
            windows: Vec::new(),
            next_book_number: 1,
            xpos: origin.0,
            ypos: origin.1,
            xoffset: 0,
            yoffset: 0,
            offset_step,
            tab_columns: crate::buffer::TAB_COLUMNS,
        }
    }

    /// Applied to every window opened from here on.
    pub fn set_tab_columns(&mut self, columns: usize) {
        self.tab_columns = columns;
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.windows.iter().map(|w| w.name().to_string()).collect()
    }

    pub fn window(&self, name: &str) -> Option<&DocumentWindow> {
        self.windows.iter().find(|w| w.name() == name)
    }

    pub fn window_mut(&mut self, name: &str) -> Option<&mut DocumentWindow> {
        self.windows.iter_mut().find(|w| w.name() == name)
    }

    // ----- lifecycle -------------------------------------------------------

    /// Open a new blank window. Without a name the window is called
    /// "Book<N>"; N comes from a counter that only ever moves forward,
    /// so closed numbers are never handed out again.
    pub fn open(&mut self, name: Option<String>) -> Result<String> {
        let name = name.unwrap_or_else(|| format!("Book{}", self.next_book_number));
        self.ensure_name_free(&name)?;

        let window = DocumentWindow::new(name.clone(), (self.xpos, self.ypos));
        self.register(window);
        log::info!("Opened window '{}'", name);
        Ok(name)
    }

    /// Read a file into a new window named after the file. The window
    /// comes up unmodified with its type inferred from the extension.
    pub async fn open_document(&mut self, path: PathBuf) -> Result<String> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", path.display()))?;
        self.ensure_name_free(&name)?;

        let content = file_manager::read_document(&path).await?;
        let window = DocumentWindow::from_file(name.clone(), (self.xpos, self.ypos), path, content);
        self.register(window);
        log::info!("Opened document window '{}'", name);
        Ok(name)
    }

    /// Move a window to a new registry key. Used when a save binds a
    /// document to a different file name.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        if old == new {
            return Ok(());
        }
        if self.window(new).is_some() {
            return Err(anyhow::anyhow!("A window named '{}' is already open", new));
        }
        let window = self
            .window_mut(old)
            .ok_or_else(|| anyhow::anyhow!("No window named '{}'", old))?;
        window.set_name(new.to_string());
        Ok(())
    }

    /// Close one window. A modified buffer asks the user whether to save
    /// first; declining discards the changes. A confirmed save that
    /// fails aborts the close with the window still open, so the unsaved
    /// content is never destroyed behind the user's back. Returns true
    /// when this was the last window, which the caller turns into
    /// application shutdown.
    pub async fn close(&mut self, name: &str, dialogs: &mut dyn DialogProvider) -> Result<bool> {
        let window = self
            .window(name)
            .ok_or_else(|| anyhow::anyhow!("No window named '{}'", name))?;

        if window.is_modified() && dialogs.confirm_unsaved(name) {
            self.save(name, dialogs).await?;
        }

        if let Some(idx) = self.windows.iter().position(|w| w.name() == name) {
            self.windows.remove(idx);
            log::info!("Closed window '{}'", name);
        }
        Ok(self.windows.is_empty())
    }

    /// Close every window with the same confirmation policy. The name
    /// list is snapshotted up front; closing mutates the collection, so
    /// iterating it live would skip windows.
    pub async fn close_all(&mut self, dialogs: &mut dyn DialogProvider) -> Result<bool> {
        for name in self.names() {
            self.close(&name, dialogs).await?;
        }
        Ok(self.windows.is_empty())
    }

    // ----- file operations -------------------------------------------------

    /// Save a window's content to its bound path, or fall through to
    /// save-as when it has none. Returns the name of the window that
    /// holds the saved document afterwards (save-as creates a new one),
    /// or None when the user cancelled.
    pub async fn save(
        &mut self,
        name: &str,
        dialogs: &mut dyn DialogProvider,
    ) -> Result<Option<String>> {
        let bound_path = self
            .window(name)
            .ok_or_else(|| anyhow::anyhow!("No window named '{}'", name))?
            .path()
            .map(Path::to_path_buf);

        match bound_path {
            Some(path) => {
                let content = self.window(name).map(|w| w.content()).unwrap_or_default();
                file_manager::write_document(&path, &content).await?;
                if let Some(window) = self.window_mut(name) {
                    window.mark_saved();
                }
                Ok(Some(name.to_string()))
            }
            None => self.save_as(name, dialogs).await,
        }
    }

    /// Write the content to a user-chosen path and open a new window
    /// bound to it. The source window is deliberately left as it is,
    /// modified flag included.
    pub async fn save_as(
        &mut self,
        name: &str,
        dialogs: &mut dyn DialogProvider,
    ) -> Result<Option<String>> {
        let content = self
            .window(name)
            .ok_or_else(|| anyhow::anyhow!("No window named '{}'", name))?
            .content();

        let Some(path) = dialogs.ask_save_path(name) else {
            return Ok(None);
        };
        let new_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", path.display()))?;
        // Save-as always registers a new window, so the chosen name must
        // be free even when it matches the source window's own name.
        self.ensure_name_free(&new_name)?;

        file_manager::write_document(&path, &content).await?;

        let window =
            DocumentWindow::from_file(new_name.clone(), (self.xpos, self.ypos), path, content);
        self.register(window);
        log::info!("Saved '{}' as new window '{}'", name, new_name);
        Ok(Some(new_name))
    }

    /// Move the underlying file to a new path and rebind the window,
    /// updating its registry key, title and file type. Windows without a
    /// path fall through to save-as.
    pub async fn rename_document(
        &mut self,
        name: &str,
        dialogs: &mut dyn DialogProvider,
    ) -> Result<Option<String>> {
        let old_path = self
            .window(name)
            .ok_or_else(|| anyhow::anyhow!("No window named '{}'", name))?
            .path()
            .map(Path::to_path_buf);

        let Some(old_path) = old_path else {
            return self.save_as(name, dialogs).await;
        };

        let Some(new_path) = dialogs.ask_save_path(name) else {
            return Ok(None);
        };
        let new_name = new_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", new_path.display()))?;
        if new_name != name {
            self.ensure_name_free(&new_name)?;
        }

        file_manager::move_document(&old_path, &new_path).await?;

        if let Some(window) = self.window_mut(name) {
            window.set_name(new_name.clone());
            window.bind_path(new_path);
        }
        log::info!("Renamed document '{}' to '{}'", name, new_name);
        Ok(Some(new_name))
    }

    // ----- placement -------------------------------------------------------

    fn register(&mut self, mut window: DocumentWindow) {
        window.set_tab_columns(self.tab_columns);
        self.windows.push(window);
        self.advance_placement();
        // The counter advances on every open, named or not, so default
        // numbering reflects how many windows this session has created.
        self.next_book_number += 1;
    }

    // Each new window is staggered a growing step away from the last,
    // reproducing the original placement scheme exactly.
    fn advance_placement(&mut self) {
        self.xoffset = self.xoffset.saturating_add(self.offset_step);
        self.yoffset = self.yoffset.saturating_add(self.offset_step);
        self.xpos = self.xpos.saturating_add(self.xoffset);
        self.ypos = self.ypos.saturating_add(self.yoffset);
    }

    fn ensure_name_free(&self, name: &str) -> Result<()> {
        if self.window(name).is_some() {
            return Err(anyhow::anyhow!("A window named '{}' is already open", name));
        }
        Ok(())
    }
}
