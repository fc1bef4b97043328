use std::path::{Path, PathBuf};

use crate::RenameError;

/// Names of this many characters or fewer are refused.
pub const UNSAFE_TOKEN_LEN: usize = 3;

const DEFAULT_EXCLUDED: &[&str] = &[".git", ".idea", ".vs"];

const DEFAULT_BINARY_EXTENSIONS: &[&str] = &[
    "dll", "exe", "pdb", "so", "dylib", "lib", "obj", "o", "a", "png", "jpg", "jpeg", "gif",
    "ico", "zip", "nupkg", "snk",
];

/// A validated rename request. Built once from the command line.
#[derive(Debug, Clone)]
pub struct RenameTask {
    old_token: String,
    new_token: String,
    root: PathBuf,
}

impl RenameTask {
    pub fn new(
        old_token: impl Into<String>,
        new_token: impl Into<String>,
        root: impl Into<PathBuf>,
    ) -> Result<Self, RenameError> {
        let old_token = old_token.into();
        let new_token = new_token.into();
        let root = root.into();

        if !root.is_dir() {
            return Err(RenameError::RootNotFound(root));
        }

        for token in [&old_token, &new_token] {
            if token.chars().count() <= UNSAFE_TOKEN_LEN {
                return Err(RenameError::UnsafeToken {
                    token: token.clone(),
                });
            }
            if token.contains(['/', '\\']) {
                return Err(RenameError::SeparatorInToken {
                    token: token.clone(),
                });
            }
        }

        Ok(Self {
            old_token,
            new_token,
            root,
        })
    }

    pub fn old_token(&self) -> &str {
        &self.old_token
    }

    pub fn new_token(&self) -> &str {
        &self.new_token
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Directory markers that stop the walk. A directory is skipped when its path
/// relative to the root contains any marker as a plain substring, so `.vs`
/// also matches `.vscode`.
#[derive(Debug, Clone)]
pub struct ExcludedDirectories {
    markers: Vec<String>,
}

impl Default for ExcludedDirectories {
    fn default() -> Self {
        Self {
            markers: DEFAULT_EXCLUDED.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl ExcludedDirectories {
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        let marker = marker.into();
        if !marker.is_empty() && !self.markers.contains(&marker) {
            self.markers.push(marker);
        }
        self
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn matches(&self, relative: &Path) -> bool {
        let path = relative.to_string_lossy();
        self.markers.iter().any(|marker| path.contains(marker.as_str()))
    }
}

/// Extensions whose files are renamed but never have their contents touched.
#[derive(Debug, Clone)]
pub struct BinaryExtensions {
    extensions: Vec<String>,
}

impl Default for BinaryExtensions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_BINARY_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl BinaryExtensions {
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenameOptions {
    pub dry_run: bool,
    pub excluded: ExcludedDirectories,
    pub binary_extensions: BinaryExtensions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_valid_task() {
        let dir = TempDir::new().unwrap();

        let task = RenameTask::new("Contoso", "Fabrikam", dir.path()).unwrap();

        assert_eq!(task.old_token(), "Contoso");
        assert_eq!(task.new_token(), "Fabrikam");
        assert_eq!(task.root(), dir.path());
    }

    #[test]
    fn test_short_tokens_are_unsafe() {
        let dir = TempDir::new().unwrap();

        let err = RenameTask::new("App", "Fabrikam", dir.path()).unwrap_err();
        assert!(matches!(err, RenameError::UnsafeToken { ref token } if token == "App"));

        let err = RenameTask::new("Contoso", "Web", dir.path()).unwrap_err();
        assert!(matches!(err, RenameError::UnsafeToken { ref token } if token == "Web"));
    }

    #[test]
    fn test_four_characters_is_enough() {
        let dir = TempDir::new().unwrap();

        assert!(RenameTask::new("Core", "Main", dir.path()).is_ok());
    }

    #[test]
    fn test_token_length_counts_characters() {
        let dir = TempDir::new().unwrap();

        // three characters, six bytes
        let err = RenameTask::new("äöü", "Fabrikam", dir.path()).unwrap_err();
        assert!(matches!(err, RenameError::UnsafeToken { .. }));
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        let err = RenameTask::new("Contoso", "Fabrikam", &missing).unwrap_err();

        assert!(matches!(err, RenameError::RootNotFound(path) if path == missing));
    }

    #[test]
    fn test_root_must_be_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("Contoso.sln");
        std::fs::write(&file, "").unwrap();

        let err = RenameTask::new("Contoso", "Fabrikam", &file).unwrap_err();

        assert!(matches!(err, RenameError::RootNotFound(_)));
    }

    #[test]
    fn test_missing_root_reported_before_unsafe_token() {
        let dir = TempDir::new().unwrap();

        let err = RenameTask::new("App", "Web", dir.path().join("missing")).unwrap_err();

        assert!(matches!(err, RenameError::RootNotFound(_)));
    }

    #[test]
    fn test_separator_in_token() {
        let dir = TempDir::new().unwrap();

        let err = RenameTask::new("Contoso", "Fabrikam/Web", dir.path()).unwrap_err();

        assert!(matches!(err, RenameError::SeparatorInToken { .. }));
    }

    #[test]
    fn test_default_exclusions() {
        let excluded = ExcludedDirectories::default();

        assert!(excluded.matches(Path::new(".git")));
        assert!(excluded.matches(Path::new("src/.idea")));
        assert!(excluded.matches(Path::new(".vs")));
        assert!(!excluded.matches(Path::new("src/Contoso.Web")));
    }

    #[test]
    fn test_exclusion_is_substring_based() {
        let excluded = ExcludedDirectories::default();

        assert!(excluded.matches(Path::new("my.gitignore-backup")));
        assert!(excluded.matches(Path::new(".vscode")));
    }

    #[test]
    fn test_extra_exclusion() {
        let excluded = ExcludedDirectories::default()
            .with_marker("node_modules")
            .with_marker("node_modules");

        assert_eq!(excluded.markers().len(), 4);
        assert!(excluded.matches(Path::new("web/node_modules")));
    }

    #[test]
    fn test_binary_extensions() {
        let binary = BinaryExtensions::default();

        assert!(binary.matches(Path::new("bin/Contoso.dll")));
        assert!(binary.matches(Path::new("Contoso.EXE")));
        assert!(!binary.matches(Path::new("Contoso.csproj")));
        assert!(!binary.matches(Path::new("Makefile")));
    }
}
