use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs::try_exists;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub editor: EditorConfig,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Columns a tab character occupies in the status bar column count.
    pub tab_columns: usize,
    pub line_numbers: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub origin_x: u16,
    pub origin_y: u16,
    pub offset_step: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            editor: EditorConfig {
                tab_columns: 8,
                line_numbers: true,
            },
            window: WindowConfig {
                origin_x: 30,
                origin_y: 30,
                offset_step: 30,
            },
        }
    }
}

impl Config {
    pub async fn load() -> Result<Self> {
        if let Some(config_path) = Self::config_path() {
            if try_exists(&config_path).await? {
                match tokio::fs::read_to_string(&config_path).await {
                    Ok(content) => {
                        if content.trim().is_empty() {
                            log::warn!("Config file is empty, creating new one");
                            let default_config = Self::default();
                            let _ = default_config.save().await;
                            return Ok(default_config);
                        }

                        match serde_json::from_str::<Self>(&content) {
                            Ok(mut config) => {
                                config.validate()?;
                                log::info!(
                                    "Successfully loaded config from: {}",
                                    config_path.display()
                                );
                                return Ok(config);
                            }
                            Err(json_err) => {
                                log::error!("Failed to parse config file: {}", json_err);

                                // Backup broken config
                                let backup_path = config_path.with_extension("bak");
                                if let Err(e) = tokio::fs::copy(&config_path, &backup_path).await {
                                    log::warn!("Failed to backup broken config: {}", e);
                                } else {
                                    log::info!(
                                        "Backed up broken config to: {}",
                                        backup_path.display()
                                    );
                                }

                                let default_config = Self::default();
                                let _ = default_config.save().await;
                                return Ok(default_config);
                            }
                        }
                    }
                    Err(io_err) => {
                        log::error!("Failed to read config file: {}", io_err);
                    }
                }
            } else {
                log::info!("Config file does not exist, creating default");
            }
        }

        let default_config = Self::default();
        let _ = default_config.save().await;
        Ok(default_config)
    }

    pub async fn save(&self) -> Result<()> {
        if let Some(config_path) = Self::config_path() {
            let mut config_to_save = self.clone();
            config_to_save.validate()?;

            if let Some(parent) = config_path.parent() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    anyhow::anyhow!(
                        "Failed to create config directory: {} - {}",
                        parent.display(),
                        e
                    )
                })?;
            }

            let content = serde_json::to_string_pretty(&config_to_save)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            tokio::fs::write(&config_path, content).await.map_err(|e| {
                anyhow::anyhow!(
                    "Failed to write config file: {} - {}",
                    config_path.display(),
                    e
                )
            })?;
            log::info!("Successfully saved config to: {}", config_path.display());
        }
        Ok(())
    }

    /// Validate configuration values and fix invalid ones
    pub fn validate(&mut self) -> Result<()> {
        let mut has_issues = false;

        if self.editor.tab_columns == 0 || self.editor.tab_columns > 16 {
            log::warn!(
                "Invalid tab column count: {}, using default",
                self.editor.tab_columns
            );
            self.editor.tab_columns = 8;
            has_issues = true;
        }

        if self.window.offset_step == 0 || self.window.offset_step > 200 {
            log::warn!(
                "Invalid window offset step: {}, using default",
                self.window.offset_step
            );
            self.window.offset_step = 30;
            has_issues = true;
        }

        if has_issues {
            log::info!("Configuration validation completed with corrections");
        }

        Ok(())
    }

    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("NOTARIUS_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        if let Ok(dir) = std::env::var("NOTARIUS_CONFIG_DIR") {
            return Some(PathBuf::from(dir).join("config.json"));
        }

        ProjectDirs::from("com", "notarius", "notarius")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};
    use tempfile::TempDir;

    fn config_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    fn set_config_dir(path: &std::path::Path) -> (Option<String>, Option<String>) {
        let previous_dir = std::env::var("NOTARIUS_CONFIG_DIR").ok();
        let previous_path = std::env::var("NOTARIUS_CONFIG_PATH").ok();
        std::env::set_var("NOTARIUS_CONFIG_DIR", path);
        std::env::remove_var("NOTARIUS_CONFIG_PATH");
        (previous_dir, previous_path)
    }

    fn restore_config_env(previous: (Option<String>, Option<String>)) {
        match previous.0 {
            Some(value) => std::env::set_var("NOTARIUS_CONFIG_DIR", value),
            None => std::env::remove_var("NOTARIUS_CONFIG_DIR"),
        }

        match previous.1 {
            Some(value) => std::env::set_var("NOTARIUS_CONFIG_PATH", value),
            None => std::env::remove_var("NOTARIUS_CONFIG_PATH"),
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.editor.tab_columns, 8);
        assert!(config.editor.line_numbers);
        assert_eq!(config.window.origin_x, 30);
        assert_eq!(config.window.origin_y, 30);
        assert_eq!(config.window.offset_step, 30);
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = Config::default();

        let json = serde_json::to_string_pretty(&config).unwrap();
        assert!(json.contains("\"editor\""));
        assert!(json.contains("\"window\""));

        let config_from_json: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(
            config.editor.tab_columns,
            config_from_json.editor.tab_columns
        );
        assert_eq!(config.window.offset_step, config_from_json.window.offset_step);
    }

    #[test]
    fn test_validate_fixes_bad_values() {
        let mut config = Config::default();
        config.editor.tab_columns = 0;
        config.window.offset_step = 0;

        config.validate().unwrap();
        assert_eq!(config.editor.tab_columns, 8);
        assert_eq!(config.window.offset_step, 30);
    }

    #[tokio::test]
    async fn test_config_load_default() {
        // Load in an isolated directory to avoid touching user config
        let previous_env = {
            let _guard = config_test_lock().lock().unwrap();
            let temp_dir = TempDir::new().unwrap();
            let previous = set_config_dir(temp_dir.path());
            previous
        }; // release lock before await

        let config = Config::load().await.unwrap();
        assert_eq!(config.editor.tab_columns, 8);

        restore_config_env(previous_env);
    }
}
