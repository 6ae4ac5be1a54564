use crate::config::Settings;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load, parse and validate settings from a YAML file
pub fn load_settings(settings_path: &Path) -> Result<Settings> {
    info!("Loading settings from: {:?}", settings_path);

    let file = File::open(settings_path)
        .wrap_err_with(|| format!("Failed to open settings file '{}'", settings_path.display()))?;

    let settings: Settings = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse settings file '{}'", settings_path.display()))?;

    settings.validate()?;

    Ok(settings)
}

/// Load settings from `settings_path` if given, defaults otherwise
pub fn load_or_default(settings_path: Option<&Path>) -> Result<Settings> {
    match settings_path {
        Some(path) => load_settings(path),
        None => {
            info!("No settings file given, using defaults");
            Ok(Settings::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_settings() {
        let yaml = r##"
general:
  log_level: debug
chunker:
  step: 25
  delimiter: "#"
  prefix: core
output:
  directory: /tmp/bart
credentials:
  username_env: LAB_USER
  password_env: LAB_PASS
"##;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let settings = load_settings(temp_file.path()).unwrap();
        assert_eq!(settings.general.log_level.as_deref(), Some("debug"));
        assert_eq!(settings.chunker.step, 25);
        assert_eq!(settings.chunker.delimiter, "#");
        assert_eq!(settings.chunker.prefix, "core");
        assert_eq!(settings.credentials.username_env, "LAB_USER");
    }

    #[test]
    fn test_load_invalid_settings() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "chunker:\n  step: 0\n").unwrap();

        let err = load_settings(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("step"));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_settings(Path::new("/no/such/settings.yaml")).is_err());
    }

    #[test]
    fn test_load_or_default() {
        let settings = load_or_default(None).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
