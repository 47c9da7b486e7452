//! Baseline primings: inline in the config file or loaded from priming files.

use crate::priming::{Baseline, DefaultPrimingDefinition, PrimingDefinition};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BaselineConfig {
    #[serde(default)]
    pub primings: Vec<PrimingDefinition>,
    #[serde(default)]
    pub defaults: Vec<DefaultPrimingDefinition>,
}

impl BaselineConfig {
    pub fn into_baseline(self) -> Baseline {
        Baseline::new()
            .with_primings(self.primings)
            .with_defaults(self.defaults)
    }

    pub fn is_empty(&self) -> bool {
        self.primings.is_empty() && self.defaults.is_empty()
    }

    /// Append another set, keeping order: ours first, then `other`.
    pub fn merge(&mut self, other: BaselineConfig) {
        self.primings.extend(other.primings);
        self.defaults.extend(other.defaults);
    }
}

/// Load a JSON priming file.
///
/// The file is either a bare list of priming definitions, or an object with
/// `primings` and `defaults` lists.
pub fn load_priming_file<P: AsRef<Path>>(path: P) -> Result<BaselineConfig, anyhow::Error> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read priming file {}", path.display()))?;
    parse_priming_file(&contents)
        .with_context(|| format!("Invalid priming file {}", path.display()))
}

fn parse_priming_file(contents: &str) -> Result<BaselineConfig, anyhow::Error> {
    let value: serde_json::Value = serde_json::from_str(contents)?;
    if value.is_array() {
        Ok(BaselineConfig {
            primings: serde_json::from_value(value)?,
            defaults: Vec::new(),
        })
    } else {
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_list_file() {
        let config = parse_priming_file(
            r#"[
                {"request": {"method": "GET", "path": "/a"}, "response": {"status": 200}},
                {"request": {"method": "GET", "path": "/b"}, "responses": [{"status": 201}, {"status": 202}]}
            ]"#,
        )
        .unwrap();
        assert_eq!(config.primings.len(), 2);
        assert_eq!(config.primings[1].responses.len(), 2);
        assert!(config.defaults.is_empty());
    }

    #[test]
    fn test_parse_full_file() {
        let config = parse_priming_file(
            r#"{
                "primings": [{"request": {"method": "GET", "path": "/a"}, "response": {}}],
                "defaults": [{"request": {"method": "GET", "path": "/.*"}, "response": {"status": 404}}]
            }"#,
        )
        .unwrap();
        assert_eq!(config.primings.len(), 1);
        assert_eq!(config.defaults[0].response.status, 404);
    }

    #[test]
    fn test_load_priming_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"request": {{"method": "POST", "path": "/orders"}}, "response": {{"status": 201}}}}]"#
        )
        .unwrap();

        let config = load_priming_file(file.path()).unwrap();
        let baseline = config.into_baseline();
        assert_eq!(baseline.primings[0].request.path, "/orders");
    }

    #[test]
    fn test_missing_priming_file_names_the_path() {
        let err = load_priming_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_invalid_priming_file_is_rejected() {
        assert!(parse_priming_file(r#"[{"request": {"path": "/no-method"}}]"#).is_err());
        assert!(parse_priming_file("not json").is_err());
    }
}
