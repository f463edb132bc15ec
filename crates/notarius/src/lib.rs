// Notarius library exports

pub mod app;
pub mod buffer;
pub mod config;
pub mod dialogs;
pub mod file_manager;
pub mod filetype;
pub mod registry;
pub mod status;
pub mod ui;
pub mod window;

pub use app::App;
pub use buffer::{BufferSignal, CaseMode, TextBuffer};
pub use config::Config;
pub use dialogs::{DialogProvider, TerminalDialogs};
pub use filetype::FileType;
pub use registry::WindowRegistry;
pub use window::DocumentWindow;
