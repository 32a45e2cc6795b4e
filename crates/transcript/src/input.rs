//! Message input: a file path, or stdin when absent or `-`.

use std::io::Read;
use std::path::Path;

use crate::error::CliError;

/// Read the whole message.
pub(crate) fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => {
            tracing::debug!(path = %path.display(), "Reading message file");
            std::fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            tracing::debug!("Reading message from stdin");
            let mut content = String::new();
            std::io::stdin().lock().read_to_string(&mut content)?;
            Ok(content)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("message.md");
        std::fs::write(&path, "# Hi\n").unwrap();

        assert_eq!(read_input(Some(&path)).unwrap(), "# Hi\n");
    }

    #[test]
    fn test_read_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.md");

        let err = read_input(Some(&path)).unwrap_err();

        assert!(matches!(err, CliError::Read { .. }));
        assert!(err.to_string().contains("missing.md"), "{err}");
    }
}
