use std::path::Path;

use similar::TextDiff;

const NEW_FILE_HEADER: &str = "/dev/null";

/// Unified diff of an output file before and after regeneration.
///
/// `before` is `None` when the file does not exist yet; the diff then shows
/// the whole document as added under a `/dev/null` old header. Returns
/// `None` when an existing file keeps its content.
pub fn output_diff(path: &Path, before: Option<&str>, after: &str) -> Option<String> {
    let display = path.display();
    let new_header = format!("b/{display}");
    let (old_header, old_text) = match before {
        Some(text) if text == after => return None,
        Some(text) => (format!("a/{display}"), text),
        None => (NEW_FILE_HEADER.to_string(), ""),
    };

    let rendered = TextDiff::from_lines(old_text, after)
        .unified_diff()
        .header(&old_header, &new_header)
        .to_string();
    Some(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_file_has_no_diff() {
        let path = Path::new("README.md");
        assert!(output_diff(path, Some("same\n"), "same\n").is_none());
    }

    #[test]
    fn regenerated_lines_show_as_replaced() {
        let diff = output_diff(
            Path::new("README.md"),
            Some("npx --yes old-pkg\n"),
            "npx --yes new-pkg\n",
        )
        .unwrap();
        assert!(diff.contains("--- a/README.md"));
        assert!(diff.contains("+++ b/README.md"));
        assert!(diff.contains("-npx --yes old-pkg"));
        assert!(diff.contains("+npx --yes new-pkg"));
    }

    #[test]
    fn new_file_is_diffed_against_dev_null() {
        let diff = output_diff(Path::new("docs/USAGE.md"), None, "### Local installation\n").unwrap();
        assert!(diff.contains("--- /dev/null"));
        assert!(diff.contains("+++ b/docs/USAGE.md"));
        assert!(diff.contains("+### Local installation"));
    }
}
