use std::fmt;
use std::path::Path;

/// Document type inferred from the file extension. Inference never
/// looks at the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileType {
    Text,
    PythonSource,
    CSource,
    CppSource,
    Other(String),
}

impl FileType {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        match ext.to_ascii_lowercase().as_str() {
            "txt" => FileType::Text,
            "py" => FileType::PythonSource,
            "c" => FileType::CSource,
            "cpp" => FileType::CppSource,
            other => FileType::Other(other.to_ascii_uppercase()),
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Text => write!(f, "Text"),
            FileType::PythonSource => write!(f, "Python Source"),
            FileType::CSource => write!(f, "C Source"),
            FileType::CppSource => write!(f, "C++ Source"),
            FileType::Other(ext) => write!(f, "{} File", ext),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_known_extensions() {
        assert_eq!(
            FileType::from_path(&PathBuf::from("notes.txt")),
            FileType::Text
        );
        assert_eq!(
            FileType::from_path(&PathBuf::from("script.py")),
            FileType::PythonSource
        );
        assert_eq!(
            FileType::from_path(&PathBuf::from("main.c")),
            FileType::CSource
        );
        assert_eq!(
            FileType::from_path(&PathBuf::from("main.cpp")),
            FileType::CppSource
        );
    }

    #[test]
    fn test_unknown_extension_label() {
        let ft = FileType::from_path(&PathBuf::from("lib.rs"));
        assert_eq!(ft, FileType::Other("RS".to_string()));
        assert_eq!(ft.to_string(), "RS File");
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(FileType::Text.to_string(), "Text");
        assert_eq!(FileType::PythonSource.to_string(), "Python Source");
        assert_eq!(FileType::CSource.to_string(), "C Source");
        assert_eq!(FileType::CppSource.to_string(), "C++ Source");
    }
}
