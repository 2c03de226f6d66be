use std::path::Path;

use clap::Subcommand;
use serde_json::Value;

use crate::domain::DomainError;

#[derive(Subcommand)]
pub enum Commands {
    /// Send a single message and print the assistant's answer as JSON
    Ask { message: String },

    /// Read messages from stdin, one per line, and print each answer
    Chat,
}

/// Load a JSON document to forward as grounding (e.g. an exported SmartPlan).
pub fn load_grounding(path: &Path) -> Result<Value, DomainError> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| {
        DomainError::invalid_input(format!(
            "grounding file {} is not valid JSON: {e}",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_grounding_reads_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"smartPlan": {{"Food": 5000, "Transport": 3000}}}}"#).unwrap();

        let grounding = load_grounding(file.path()).unwrap();
        assert_eq!(grounding["smartPlan"]["Transport"], 3000);
    }

    #[test]
    fn test_load_grounding_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Food = 5000").unwrap();

        let err = load_grounding(file.path()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn test_load_grounding_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_grounding(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, DomainError::IoError(_)));
    }
}
