//! Runtime configuration loading.
//!
//! Layers the YAML configuration file with `SENTINEL`-prefixed environment
//! variable overrides (e.g. `SENTINEL__DAYS=14`). Loading happens once,
//! before any domain is checked; a load failure is fatal.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use domain_sentinel_core::CheckConfig;

/// Load the run configuration from `path`.
pub fn load(path: &Path) -> Result<CheckConfig, ConfigError> {
    Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(Environment::with_prefix("SENTINEL").separator("__"))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use domain_sentinel_core::DeliveryMethod;

    fn write_config(contents: &str) -> tempfile::TempPath {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.into_temp_path()
    }

    #[test]
    fn test_load_full_config() {
        let path = write_config(
            "domains:\n  - example.com\n  - example.org\ndays: 30\nexternal: /usr/local/bin/notify\nmethod: args\nargs: \"-m {message}\"\n",
        );
        let config = load(&path).unwrap();
        assert_eq!(config.domains, vec!["example.com", "example.org"]);
        assert_eq!(config.days, 30);
        assert_eq!(config.external, "/usr/local/bin/notify");
        assert_eq!(config.method, DeliveryMethod::Args);
        assert_eq!(config.args_template, "-m {message}");
    }

    #[test]
    fn test_load_minimal_config_defaults() {
        let path = write_config("domains:\n  - example.com\ndays: 14\nexternal: notify-send\n");
        let config = load(&path).unwrap();
        assert_eq!(config.method, DeliveryMethod::Stdin);
        assert!(config.args_template.is_empty());
    }

    #[test]
    fn test_load_unknown_method_falls_back_to_stdin() {
        let path = write_config(
            "domains:\n  - example.com\ndays: 7\nexternal: notify\nmethod: carrier-pigeon\n",
        );
        let config = load(&path).unwrap();
        assert_eq!(config.method, DeliveryMethod::Stdin);
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(load(Path::new("/nonexistent/domain-sentinel.yaml")).is_err());
    }
}
