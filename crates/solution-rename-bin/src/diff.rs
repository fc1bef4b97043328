use similar::{ChangeTag, TextDiff};
use std::fmt::Write;
use std::path::Path;

/// Colored line diff of a planned content change, with three lines of context.
pub fn render_content_diff(file_path: &Path, old_content: &str, new_content: &str) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "\n📝 Content change: {}", file_path.display());

    let diff = TextDiff::from_lines(old_content, new_content);
    for (i, group) in diff.grouped_ops(3).iter().enumerate() {
        if i > 0 {
            let _ = writeln!(output, "{:-^1$}", "", 40);
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let (sign, style) = match change.tag() {
                    ChangeTag::Delete => ("- ", "\x1b[31m"), // Red
                    ChangeTag::Insert => ("+ ", "\x1b[32m"), // Green
                    ChangeTag::Equal => ("  ", "\x1b[0m"),
                };
                let _ = write!(output, "{}{}{}\x1b[0m", style, sign, change.value());
                if change.missing_newline() {
                    output.push('\n');
                }
            }
        }
    }

    output
}
