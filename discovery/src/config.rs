//! Launcher configuration.
//!
//! An optional YAML file that names the executable, pins the manual page
//! path, bounds how long a launch may run, and pre-fills form fields.
//!
//! # Example YAML
//!
//! ```yaml
//! executable: scrcpy
//! manpage: /usr/share/man/man1/scrcpy.1.gz
//! timeout_secs: 0
//! defaults:
//!   --max-size: 1024
//!   --fullscreen: true
//! ```

use std::collections::BTreeMap;
use std::env;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use scrcpy_form_core::{FieldValue, FormState};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "SCRCPY_FORM_CONFIG";

/// Executable launched when nothing else is configured.
pub const DEFAULT_EXECUTABLE: &str = "scrcpy";

/// Top-level launcher configuration.
///
/// Every field is optional in the file; missing fields take their
/// [`Default`] values.
///
/// # Examples
///
/// ```
/// use scrcpy_form_discovery::config::FormConfig;
///
/// let config: FormConfig = serde_yaml::from_str("executable: scrcpy-beta\n").unwrap();
/// assert_eq!(config.executable, "scrcpy-beta");
/// assert!(config.timeout().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Program to run (looked up on `PATH`).
    pub executable: String,
    /// Manual page path; located automatically when unset.
    pub manpage: Option<PathBuf>,
    /// Seconds before a launched process is killed; `0` waits indefinitely.
    pub timeout_secs: u64,
    /// Initial field values keyed by option name.
    pub defaults: BTreeMap<String, FieldValue>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            manpage: None,
            timeout_secs: 0,
            defaults: BTreeMap::new(),
        }
    }
}

impl FormConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ConfigError::IoError) if the file cannot be read,
    /// or [`YamlError`](ConfigError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Loads the explicit file, else the file named by [`CONFIG_ENV`], else
    /// the defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match env::var_os(CONFIG_ENV) {
            Some(raw) if !raw.is_empty() => {
                debug!(path = ?raw, "Loading configuration from environment");
                Self::load(PathBuf::from(raw))
            }
            _ => Ok(Self::default()),
        }
    }

    /// Launch timeout, `None` when unbounded.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Pre-fills `form` with the configured defaults.
    ///
    /// Defaults that do not fit the form (unknown option or wrong kind) are
    /// logged and returned; they never abort the fill.
    pub fn apply_defaults(&self, form: &mut FormState) -> Vec<String> {
        let mut ignored = Vec::new();
        for (name, value) in &self.defaults {
            if let Err(err) = form.apply(name, value.clone()) {
                warn!(option = %name, error = %err, "Ignoring configured default");
                ignored.push(name.clone());
            }
        }
        ignored
    }
}

#[cfg(test)]
mod tests {
    use scrcpy_form_core::OptionDescriptor;

    use super::*;

    #[test]
    fn test_full_config_parses() {
        let yaml = r#"
executable: /opt/scrcpy/bin/scrcpy
manpage: /opt/scrcpy/share/man/man1/scrcpy.1
timeout_secs: 30
defaults:
  --max-size: "1024"
  --fullscreen: true
"#;
        let config: FormConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.executable, "/opt/scrcpy/bin/scrcpy");
        assert_eq!(
            config.manpage.as_deref(),
            Some(Path::new("/opt/scrcpy/share/man/man1/scrcpy.1"))
        );
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(
            config.defaults.get("--fullscreen"),
            Some(&FieldValue::Flag(true))
        );
    }

    #[test]
    fn test_unquoted_numeric_defaults_load_as_text() {
        let yaml = "defaults:\n  --max-size: 1024\n  --max-fps: 30\n";
        let config: FormConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.defaults.get("--max-size"),
            Some(&FieldValue::Text("1024".into()))
        );

        let mut form = FormState::from_descriptors(&[
            OptionDescriptor::value("--max-size"),
            OptionDescriptor::value("--max-fps"),
        ]);
        assert!(config.apply_defaults(&mut form).is_empty());
        assert_eq!(form.to_args(), vec!["--max-size", "1024", "--max-fps", "30"]);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FormConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, FormConfig::default());
        assert_eq!(config.executable, DEFAULT_EXECUTABLE);
    }

    #[test]
    fn test_load_from_file_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scrcpy-form.yml");
        std::fs::write(&path, "timeout_secs: 5\n").unwrap();
        assert_eq!(FormConfig::load(&path).unwrap().timeout_secs, 5);

        let missing = dir.path().join("missing.yml");
        assert!(matches!(
            FormConfig::resolve(Some(&missing)),
            Err(ConfigError::IoError(_))
        ));
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yml");
        std::fs::write(&path, "timeout_secs: [not, a, number]\n").unwrap();
        assert!(matches!(
            FormConfig::load(&path),
            Err(ConfigError::YamlError(_))
        ));
    }

    #[test]
    fn test_apply_defaults_skips_unfit_entries() {
        let mut form = FormState::from_descriptors(&[
            OptionDescriptor::flag("--fullscreen"),
            OptionDescriptor::value("--max-size"),
        ]);
        let mut config = FormConfig::default();
        config
            .defaults
            .insert("--fullscreen".into(), FieldValue::Flag(true));
        config
            .defaults
            .insert("--max-size".into(), FieldValue::Flag(true));
        config
            .defaults
            .insert("--turbo".into(), FieldValue::Text("on".into()));

        let ignored = config.apply_defaults(&mut form);
        assert_eq!(ignored, vec!["--max-size".to_string(), "--turbo".to_string()]);
        assert_eq!(form.to_args(), vec!["--fullscreen"]);
    }
}
