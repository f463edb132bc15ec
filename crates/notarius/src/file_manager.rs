use anyhow::Result;
use std::path::Path;
use tokio::fs;

// Documents above this size are unexpected for a plain-text notebook
// and get a log warning rather than a refusal.
const LARGE_FILE_THRESHOLD: u64 = 10 * 1024 * 1024; // 10MB

/// Read a whole document into a string.
///
/// Open errors are recoverable: they come back as descriptive
/// `anyhow` errors for the status line instead of tearing the
/// application down.
pub async fn read_document(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(anyhow::anyhow!("File not found: {}", path.display()));
    }

    if !path.is_file() {
        return Err(anyhow::anyhow!(
            "Path is not a regular file: {}",
            path.display()
        ));
    }

    match fs::metadata(path).await {
        Ok(metadata) => {
            if metadata.len() > LARGE_FILE_THRESHOLD {
                log::warn!(
                    "Large file detected ({} bytes): {}",
                    metadata.len(),
                    path.display()
                );
            }
        }
        Err(e) => {
            log::warn!("Failed to get file metadata: {}", e);
        }
    }

    match fs::read_to_string(path).await {
        Ok(content) => {
            if content.contains('\0') {
                return Err(anyhow::anyhow!(
                    "File appears to be binary: {}",
                    path.display()
                ));
            }
            log::info!("Successfully opened file: {}", path.display());
            Ok(content)
        }
        Err(e) => {
            let error_msg = match e.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    format!("No permission to read file: {}", path.display())
                }
                std::io::ErrorKind::NotFound => {
                    format!("File not found: {}", path.display())
                }
                std::io::ErrorKind::InvalidData => {
                    format!("File is not valid UTF-8: {}", path.display())
                }
                _ => {
                    format!("Failed to read file: {} - {}", path.display(), e)
                }
            };
            Err(anyhow::anyhow!(error_msg))
        }
    }
}

/// Write a whole document, creating the parent directory when missing.
pub async fn write_document(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).await.map_err(|e| {
                anyhow::anyhow!("Failed to create directory: {} - {}", parent.display(), e)
            })?;
            log::info!("Created directory: {}", parent.display());
        }
    }

    match fs::write(path, content.as_bytes()).await {
        Ok(_) => {
            log::info!("Successfully saved file: {}", path.display());
            Ok(())
        }
        Err(e) => {
            let error_msg = match e.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    format!("No permission to write file: {}", path.display())
                }
                std::io::ErrorKind::WriteZero => {
                    format!("Disk may be out of space: {}", path.display())
                }
                _ => {
                    format!("Failed to write file: {} - {}", path.display(), e)
                }
            };
            Err(anyhow::anyhow!(error_msg))
        }
    }
}

/// Move a document to a new path on disk.
pub async fn move_document(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to rename {} to {} - {}",
            from.display(),
            to.display(),
            e
        )
    })?;
    log::info!("Renamed {} to {}", from.display(), to.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[tokio::test]
    async fn test_read_document() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "Hello World\nTest content").unwrap();

        let content = read_document(temp_file.path()).await.unwrap();
        assert_eq!(content, "Hello World\nTest content\n");
    }

    #[tokio::test]
    async fn test_read_missing_document() {
        let result = read_document(Path::new("/definitely/not/here.txt")).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");

        write_document(&path, "saved content").await.unwrap();
        let content = read_document(&path).await.unwrap();
        assert_eq!(content, "saved content");
    }

    #[tokio::test]
    async fn test_write_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("out.txt");

        write_document(&path, "x").await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_move_document() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("old.txt");
        let to = dir.path().join("new.txt");
        write_document(&from, "contents").await.unwrap();

        move_document(&from, &to).await.unwrap();
        assert!(!from.exists());
        assert_eq!(read_document(&to).await.unwrap(), "contents");
    }
}
