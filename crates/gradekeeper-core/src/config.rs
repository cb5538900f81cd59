//! Configuration loading: grade scale, GPA tables, and output location.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::block::GpaScales;
use crate::scale::GradeScale;

/// Top-level gradekeeper configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradekeeperConfig {
    /// Output directory for reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Cutoff → letter scale applied to every course.
    #[serde(default)]
    pub grade_scale: GradeScale,
    /// Grade point tables for the block GPA estimates.
    #[serde(default)]
    pub gpa: GpaScales,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./gradekeeper-results")
}

impl Default for GradekeeperConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            grade_scale: GradeScale::default(),
            gpa: GpaScales::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not rescanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `gradekeeper.toml` in the current directory
/// 2. `~/.config/gradekeeper/config.toml`
///
/// Environment variable override: `GRADEKEEPER_OUTPUT_DIR`.
pub fn load_config() -> Result<GradekeeperConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GradekeeperConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradekeeper.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config_file(&path)?
        }
        None => GradekeeperConfig::default(),
    };

    if let Ok(dir) = std::env::var("GRADEKEEPER_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    let resolved = resolve_env_vars(&config.output_dir.to_string_lossy());
    config.output_dir = PathBuf::from(resolved);

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<GradekeeperConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<GradekeeperConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradekeeper"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_GRADEKEEPER_TEST_VAR", "results");
        assert_eq!(resolve_env_vars("${_GRADEKEEPER_TEST_VAR}"), "results");
        assert_eq!(
            resolve_env_vars("./${_GRADEKEEPER_TEST_VAR}/2024"),
            "./results/2024"
        );
        assert_eq!(resolve_env_vars("no vars"), "no vars");
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_GRADEKEEPER_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_rescan_values() {
        std::env::set_var("_GRADEKEEPER_SELF_REF", "${_GRADEKEEPER_SELF_REF}");
        assert_eq!(
            resolve_env_vars("${_GRADEKEEPER_SELF_REF}/out"),
            "${_GRADEKEEPER_SELF_REF}/out"
        );
        std::env::remove_var("_GRADEKEEPER_SELF_REF");

        assert_eq!(resolve_env_vars("${_GRADEKEEPER_UNSET_VAR}x"), "x");
    }

    #[test]
    fn default_config() {
        let config = GradekeeperConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("./gradekeeper-results"));
        assert_eq!(config.grade_scale, GradeScale::default());
        assert_eq!(config.gpa, GpaScales::default());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
output_dir = "./out"

[grade_scale]
"0" = "Fail"
"0.5" = "Pass"
"0.85" = "Distinction"

[[gpa.local]]
letter = "Distinction"
points = 3.0

[[gpa.local]]
letter = "Pass"
points = 1.0
"#;
        let config: GradekeeperConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("./out"));
        assert_eq!(config.grade_scale.resolve(0.9), "Distinction");
        assert_eq!(config.grade_scale.resolve(0.6), "Pass");
        assert_eq!(config.gpa.local.points_for("Pass"), Some(1.0));
        assert_eq!(config.gpa.us.points_for("A-"), Some(3.7));
    }

    #[test]
    fn bad_scale_key_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradekeeper.toml");
        std::fs::write(&path, "[grade_scale]\nhigh = \"A\"\n").unwrap();

        let err = load_config_from(Some(&path)).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("failed to parse config"), "{message}");
        assert!(message.contains("invalid grade cutoff 'high'"), "{message}");
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/gradekeeper.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[grade_scale]\n\"0.5\" = \"P\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.grade_scale.len(), 1);
        assert_eq!(config.gpa, GpaScales::default());
    }
}
