use std::io::Read;
use std::path::Path;

use anyhow::Context;

const STDIN_MARKER: &str = "-";

/// Read a whole response from `input`, or from stdin when it is absent or
/// `-`.
pub fn read_response(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) if path != Path::new(STDIN_MARKER) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read response from {}", path.display())),
        _ => {
            let mut response = String::new();
            std::io::stdin()
                .read_to_string(&mut response)
                .context("failed to read response from stdin")?;
            Ok(response)
        }
    }
}

/// Read a project file given on the command line.
pub fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_response_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("reply.md");
        std::fs::write(&path, "```gdscript\nextends Node\n```\n").expect("write");

        assert_eq!(
            read_response(Some(&path)).expect("read"),
            "```gdscript\nextends Node\n```\n"
        );
    }

    #[test]
    fn missing_file_names_the_path() {
        let error = read_file(Path::new("/nonexistent/scene.tscn")).unwrap_err();
        assert!(format!("{error:#}").contains("/nonexistent/scene.tscn"));
    }
}
