use config::{Config, ConfigError, File, FileFormat};
use std::path::Path;

/// Load config from a specific TOML file
pub fn load_toml_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    Config::builder()
        .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
        .add_source(config::Environment::with_prefix("APP").separator("_"))
        .build()
}

/// Load config from a specific YAML file
pub fn load_yaml_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    Config::builder()
        .add_source(File::from(path.as_ref()).format(FileFormat::Yaml))
        .add_source(config::Environment::with_prefix("APP").separator("_"))
        .build()
}

/// Resolve config placeholder like ${app.enabled} or ${app.enabled:default}
pub fn resolve_config_value(value: &str, config: &Config) -> Result<String, ConfigError> {
    if value.starts_with("${") && value.ends_with('}') {
        let inner = &value[2..value.len() - 1];

        // Check if there's a default value (e.g., ${app.enabled:true})
        if let Some(colon_pos) = inner.find(':') {
            let key = &inner[..colon_pos];
            let default_value = &inner[colon_pos + 1..];

            match config.get_string(key) {
                Ok(resolved) => Ok(resolved),
                Err(_) => Ok(default_value.to_string()),
            }
        } else {
            config.get_string(inner)
        }
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        Config::builder()
            .set_override("app.poll.enabled", "false")
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn literals_pass_through() {
        let config = sample_config();
        assert_eq!(resolve_config_value("true", &config).unwrap(), "true");
    }

    #[test]
    fn placeholders_resolve_from_config() {
        let config = sample_config();
        assert_eq!(
            resolve_config_value("${app.poll.enabled}", &config).unwrap(),
            "false"
        );
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = sample_config();
        assert_eq!(
            resolve_config_value("${app.missing:true}", &config).unwrap(),
            "true"
        );
        assert!(resolve_config_value("${app.missing}", &config).is_err());
    }
}
