use serde::{Deserialize, Serialize};

/// User configuration.
///
/// Example YAML:
/// ```yaml
/// theme: auto
/// format: text
/// breakdown: false
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Colour palette for the interactive form
    #[serde(default)]
    pub theme: ThemeMode,

    /// Default output format for `wellscore score`
    #[serde(default)]
    pub format: OutputFormat,

    /// Show which rules fired alongside the scores
    #[serde(default)]
    pub breakdown: bool,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Detect from the terminal background
    #[default]
    Auto,
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Tsv,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, ThemeMode::Auto);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.breakdown);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            theme: ThemeMode::Light,
            format: OutputFormat::Json,
            breakdown: true,
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_config_parse() {
        let config: Config = serde_saphyr::from_str("theme: dark\n").unwrap();
        assert_eq!(config.theme, ThemeMode::Dark);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.breakdown);
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("colour: red\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_format_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("format: xml\n");
        assert!(result.is_err());
    }
}
