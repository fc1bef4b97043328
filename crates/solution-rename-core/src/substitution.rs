use std::path::{Path, PathBuf};
use tracing::debug;

/// Literal, case-sensitive replacement of one token with another.
pub struct TokenSubstitution {
    token: String,
    replacement: String,
}

impl TokenSubstitution {
    pub fn new(token: &str, replacement: &str) -> Self {
        Self {
            token: token.to_string(),
            replacement: replacement.to_string(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn process_content(&self, content: &str) -> Option<String> {
        if !content.contains(&self.token) {
            return None;
        }
        let new_content = content.replace(&self.token, &self.replacement);
        if new_content == content {
            return None;
        }
        debug!(
            "Content replacement: found {} occurrences",
            content.matches(&self.token).count()
        );
        Some(new_content)
    }

    /// Replaces the token in the last path segment only. Parent segments are
    /// left alone since the walker renames them on the way down.
    pub fn rename_segment(&self, path: &Path) -> Option<PathBuf> {
        let file_name = path.file_name()?;
        let Some(name_str) = file_name.to_str() else {
            debug!("Skipping non UTF-8 name: {:?}", path);
            return None;
        };
        if !name_str.contains(&self.token) {
            return None;
        }
        let new_name = name_str.replace(&self.token, &self.replacement);
        if new_name == name_str {
            return None;
        }
        debug!("Path replacement: '{}' -> '{}'", name_str, new_name);
        Some(path.with_file_name(new_name))
    }
}
