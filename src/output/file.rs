//! Structured output file

use std::io::Write;
use std::path::Path;

use log::debug;
use tempfile::NamedTempFile;

use crate::cli::OutputFormat;
use crate::error::{Result, SlackError};
use crate::output::render_document;
use crate::slack::Member;

/// Check that `path` can be written before any network activity
///
/// A scratch file is created next to `path` and removed again, so an
/// unwritable destination fails here. The output file itself is only
/// created once the full roster is in hand.
pub fn validate_outfile(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(SlackError::Config("outfile path is empty".to_string()));
    }
    if path.is_dir() {
        return Err(SlackError::Config(format!(
            "outfile '{}' is a directory",
            path.display()
        )));
    }

    let dir = outfile_dir(path);
    if !dir.is_dir() {
        return Err(SlackError::Config(format!(
            "directory '{}' for outfile does not exist",
            dir.display()
        )));
    }

    NamedTempFile::new_in(dir).map_err(|e| {
        SlackError::Config(format!("outfile '{}' is not writable: {}", path.display(), e))
    })?;
    Ok(())
}

/// Write the whole member list to `path` as one document
///
/// Rendered in memory, written to a temp file in the same directory, then
/// persisted over `path`, so a failure never leaves a truncated document.
pub fn write_members_file(path: &Path, members: &[Member], format: OutputFormat) -> Result<()> {
    let mut document = render_document(members, format)?;
    if !document.ends_with('\n') {
        document.push('\n');
    }

    let write_error =
        |e: std::io::Error| SlackError::Io(format!("failed to write '{}': {}", path.display(), e));

    let mut tmp = NamedTempFile::new_in(outfile_dir(path)).map_err(write_error)?;
    tmp.write_all(document.as_bytes()).map_err(write_error)?;
    tmp.persist(path).map_err(|e| write_error(e.error))?;

    debug!("Wrote {} members to {}", members.len(), path.display());
    Ok(())
}

fn outfile_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample() -> Vec<Member> {
        vec![
            Member::new(serde_json::json!({"id": "U1", "profile": {"email": "a@example.com"}})),
            Member::new(serde_json::json!({"id": "U2", "deleted": true})),
        ]
    }

    #[test]
    fn test_validate_outfile_in_existing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_outfile(&dir.path().join("users.json")).is_ok());
    }

    #[test]
    fn test_validate_outfile_relative_name() {
        assert!(validate_outfile(Path::new("users.json")).is_ok());
    }

    #[test]
    fn test_validate_outfile_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("users.json");
        match validate_outfile(&path) {
            Err(SlackError::Config(msg)) => assert!(msg.contains("does not exist")),
            other => panic!("Expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_outfile_is_directory() {
        let dir = tempfile::tempdir().unwrap();
        match validate_outfile(dir.path()) {
            Err(SlackError::Config(msg)) => assert!(msg.contains("is a directory")),
            other => panic!("Expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        validate_outfile(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_write_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");

        write_members_file(&path, &sample(), OutputFormat::Json).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["profile"]["email"], "a@example.com");
        assert_eq!(parsed[1]["deleted"], true);
    }

    #[test]
    fn test_write_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.yaml");

        write_members_file(&path, &sample(), OutputFormat::Yaml).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("id: U1"));
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        fs::write(&path, "stale content that is much longer than the new document").unwrap();

        write_members_file(&path, &[], OutputFormat::Json).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]\n");
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");

        write_members_file(&path, &sample(), OutputFormat::Json).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_validate_leaves_directory_empty() {
        let dir = tempfile::tempdir().unwrap();
        validate_outfile(&dir.path().join("users.json")).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_validate_outfile_unwritable_target() {
        // procfs refuses new files even for root
        match validate_outfile(Path::new("/proc/users.json")) {
            Err(SlackError::Config(msg)) => assert!(msg.contains("not writable")),
            other => panic!("Expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("users.json");
        match write_members_file(&path, &sample(), OutputFormat::Json) {
            Err(SlackError::Io(msg)) => assert!(msg.contains("users.json")),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }
}
