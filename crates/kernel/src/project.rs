//! Reader for the project-level `project.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where the project configuration lives, relative to the working directory.
pub const PROJECT_CONFIG_FILE: &str = "project.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error reading {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: config::ConfigError,
    },
    #[error("error encoding configuration: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationSettings {
    #[serde(default = "enabled")]
    pub github_pages_enabled: bool,
    #[serde(default = "enabled")]
    pub build_on_push: bool,
    #[serde(default = "enabled")]
    pub build_strict: bool,
}

impl Default for DocumentationSettings {
    fn default() -> Self {
        Self {
            github_pages_enabled: true,
            build_on_push: true,
            build_strict: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSettings {
    #[serde(default = "enabled")]
    pub auto_generate_api_docs: bool,
    #[serde(default = "enabled")]
    pub include_demo_apps: bool,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            auto_generate_api_docs: true,
            include_demo_apps: true,
        }
    }
}

fn enabled() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct Sections {
    #[serde(default)]
    documentation: DocumentationSettings,
    #[serde(default)]
    project: ProjectSettings,
}

/// Project settings plus whatever other metadata the file carries.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub documentation: DocumentationSettings,
    pub project: ProjectSettings,
    raw: serde_json::Value,
    source: Option<PathBuf>,
}

impl ProjectConfig {
    /// Reads `project.toml` from the working directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(PROJECT_CONFIG_FILE)
    }

    /// Reads the file at `path`, falling back to defaults when it is absent.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "project configuration not found, using defaults"
            );
            return Self::defaults();
        }

        let parse_error = |source: config::ConfigError| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        };

        let cfg = config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()).format(config::FileFormat::Toml))
            .build()
            .map_err(parse_error)?;

        let raw: serde_json::Value = cfg.clone().try_deserialize().map_err(parse_error)?;
        let sections: Sections = cfg.try_deserialize().map_err(parse_error)?;

        tracing::info!(path = %path.display(), "loaded project configuration");

        Ok(Self {
            documentation: sections.documentation,
            project: sections.project,
            raw,
            source: Some(path.to_path_buf()),
        })
    }

    /// The configuration used when no file exists.
    pub fn defaults() -> Result<Self, ConfigError> {
        let sections = Sections::default();
        let raw = serde_json::to_value(&sections)?;
        Ok(Self {
            documentation: sections.documentation,
            project: sections.project,
            raw,
            source: None,
        })
    }

    pub fn github_pages_enabled(&self) -> bool {
        self.documentation.github_pages_enabled
    }

    /// File the configuration came from; `None` for defaults.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// The full configuration as read, including keys this crate does not know.
    pub fn as_value(&self) -> &serde_json::Value {
        &self.raw
    }

    /// Two-space indented JSON rendering of [`as_value`](Self::as_value).
    pub fn to_pretty_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(&self.raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ProjectConfig::load_from(dir.path().join("project.toml")).unwrap();

        assert!(cfg.github_pages_enabled());
        assert!(cfg.source().is_none());
        assert_eq!(
            cfg.as_value(),
            &json!({
                "documentation": {
                    "github_pages_enabled": true,
                    "build_on_push": true,
                    "build_strict": true
                },
                "project": {
                    "auto_generate_api_docs": true,
                    "include_demo_apps": true
                }
            })
        );
    }

    #[test]
    fn file_values_and_extra_metadata_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.toml");
        fs::write(
            &path,
            r#"
[documentation]
github_pages_enabled = false

[metadata]
name = "demo"
"#,
        )
        .unwrap();

        let cfg = ProjectConfig::load_from(&path).unwrap();
        assert!(!cfg.github_pages_enabled());
        assert!(cfg.documentation.build_strict);
        assert!(cfg.project.include_demo_apps);
        assert_eq!(cfg.as_value()["metadata"]["name"], "demo");
        assert_eq!(cfg.source(), Some(path.as_path()));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.toml");
        fs::write(&path, "[documentation\ngithub_pages_enabled = ").unwrap();

        let err = ProjectConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn pretty_json_is_indented() {
        let cfg = ProjectConfig::defaults().unwrap();
        let rendered = cfg.to_pretty_json().unwrap();
        assert!(rendered.starts_with("{\n  \"documentation\": {"));
    }
}
