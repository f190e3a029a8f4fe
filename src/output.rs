//! Append-only image list output.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// One image per line, newline-terminated.
///
/// Empty input renders as "" so an empty run leaves the image list as it was.
/// Legacy tooling appended a lone newline in that case.
pub fn render_image_list(images: &[String]) -> String {
    if images.is_empty() {
        return String::new();
    }
    let mut out = images.join("\n");
    out.push('\n');
    out
}

/// Append `images` to `path`, creating the file when needed.
///
/// Existing content is never truncated and nothing is de-duplicated. An empty
/// list leaves the file untouched.
pub fn append_image_list(path: &Path, images: &[String]) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening image list {}", path.display()))?;
    file.write_all(render_image_list(images).as_bytes())
        .with_context(|| format!("writing image list {}", path.display()))?;
    info!(path = %path.display(), count = images.len(), "appended images");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn renders_trailing_newline() {
        let images = vec!["a".to_string(), "b".to_string()];
        assert_eq!(render_image_list(&images), "a\nb\n");
        assert_eq!(render_image_list(&[]), "");
    }

    #[test]
    fn appends_instead_of_truncating() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("images.txt");
        fs::write(&path, "existing\n").unwrap();
        let images = vec!["registry/a:1".to_string(), "registry/a:1".to_string()];
        append_image_list(&path, &images).unwrap();
        append_image_list(&path, &images).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "existing\nregistry/a:1\nregistry/a:1\nregistry/a:1\nregistry/a:1\n"
        );
    }
}
